use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::super::domain::Motive;

/// One motive dimension and the score it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedDimension {
    pub dimension: Motive,
    pub score: f64,
}

/// Rank motives by score, highest first.
///
/// Ties fall back to [`Motive::PRIORITY`]; NaN sorts below every number so a
/// corrupt score can never become dominant.
pub(crate) fn rank_motives<F>(score: F) -> Vec<RankedDimension>
where
    F: Fn(Motive) -> f64,
{
    let mut ranked: Vec<RankedDimension> = Motive::PRIORITY
        .into_iter()
        .map(|dimension| RankedDimension {
            dimension,
            score: score(dimension),
        })
        .collect();

    ranked.sort_by(|a, b| {
        descending(a.score, b.score)
            .then_with(|| a.dimension.priority_rank().cmp(&b.dimension.priority_rank()))
    });
    ranked
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
