//! Implicit Association Test: block layout, D-score and trial records.
//!
//! Block boundaries are derived from [`IatBlockLayout`]; the session reads
//! trial counts from it and the aggregator slices the compatible and
//! incompatible blocks from the same value.

mod import;

pub use import::{IatImportError, IatTrialImporter};

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Role a block plays in the five-block procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IatBlockKind {
    /// Self vs. others sorting practice.
    TargetPractice,
    /// Receptive vs. repressive sorting practice.
    AttributePractice,
    /// Self paired with receptive.
    Compatible,
    /// Attribute sides swapped.
    ReversedAttributePractice,
    /// Self paired with repressive.
    Incompatible,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IatBlock {
    pub kind: IatBlockKind,
    pub left_label: String,
    pub right_label: String,
    pub trials: usize,
}

impl IatBlock {
    fn new(kind: IatBlockKind, left: &str, right: &str, trials: usize) -> Self {
        Self {
            kind,
            left_label: left.to_string(),
            right_label: right.to_string(),
            trials,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IatBlockLayout {
    blocks: Vec<IatBlock>,
}

impl Default for IatBlockLayout {
    fn default() -> Self {
        Self::standard()
    }
}

impl IatBlockLayout {
    /// The 12/12/40/10/40 procedure the instrument ships with.
    pub fn standard() -> Self {
        Self::new(vec![
            IatBlock::new(IatBlockKind::TargetPractice, "Me", "Others", 12),
            IatBlock::new(IatBlockKind::AttributePractice, "Receptive", "Repressive", 12),
            IatBlock::new(
                IatBlockKind::Compatible,
                "Me / Receptive",
                "Others / Repressive",
                40,
            ),
            IatBlock::new(
                IatBlockKind::ReversedAttributePractice,
                "Repressive",
                "Receptive",
                10,
            ),
            IatBlock::new(
                IatBlockKind::Incompatible,
                "Me / Repressive",
                "Others / Receptive",
                40,
            ),
        ])
    }

    pub fn new(blocks: Vec<IatBlock>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[IatBlock] {
        &self.blocks
    }

    pub fn total_trials(&self) -> usize {
        self.blocks.iter().map(|block| block.trials).sum()
    }

    /// Trial index range of the first block of `kind`, derived from the counts.
    pub fn block_range(&self, kind: IatBlockKind) -> Option<Range<usize>> {
        let mut start = 0;
        for block in &self.blocks {
            let end = start + block.trials;
            if block.kind == kind {
                return Some(start..end);
            }
            start = end;
        }
        None
    }

    /// Zero-based block position and in-block trial index for a flat trial index.
    pub fn locate(&self, trial_index: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (position, block) in self.blocks.iter().enumerate() {
            if trial_index < start + block.trials {
                return Some((position, trial_index - start));
            }
            start += block.trials;
        }
        None
    }

    /// Index of the first record whose `(block, trial)` tag disagrees with
    /// its position in the flattened sequence. Short logs are fine; records
    /// past the end of the layout count as misplaced.
    pub fn first_misplaced(&self, trials: &[IatTrial]) -> Option<usize> {
        trials.iter().enumerate().position(|(index, trial)| {
            let tagged = trial
                .block
                .checked_sub(1)
                .map(|block| (block, trial.trial));
            tagged.is_none() || self.locate(index) != tagged
        })
    }
}

/// D-score of the incompatible block against the compatible block.
///
/// Returns `None` when the sequence is shorter than the layout or either
/// scored block is absent or empty. The pooled SD is the population SD over
/// both blocks together, floored at 1 ms.
pub fn d_score(reaction_times: &[f64], layout: &IatBlockLayout) -> Option<f64> {
    if reaction_times.len() < layout.total_trials() {
        return None;
    }

    let compatible = reaction_times.get(layout.block_range(IatBlockKind::Compatible)?)?;
    let incompatible = reaction_times.get(layout.block_range(IatBlockKind::Incompatible)?)?;
    if compatible.is_empty() || incompatible.is_empty() {
        return None;
    }

    let mean_compatible = mean(compatible);
    let mean_incompatible = mean(incompatible);

    let pooled: Vec<f64> = compatible.iter().chain(incompatible).copied().collect();
    let pooled_mean = mean(&pooled);
    let variance = pooled
        .iter()
        .map(|value| (value - pooled_mean).powi(2))
        .sum::<f64>()
        / pooled.len() as f64;
    let sd = variance.sqrt();
    let sd = if sd >= 1.0 { sd } else { 1.0 };

    Some((mean_incompatible - mean_compatible) / sd)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// One recorded trial as produced by the instrument runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IatTrial {
    /// One-based block number.
    pub block: usize,
    /// Zero-based index inside the block.
    pub trial: usize,
    pub stimulus: String,
    pub category: String,
    pub rt_ms: f64,
    #[serde(default)]
    pub is_error: bool,
}

/// Flatten trial records into the reaction-time sequence the aggregator reads.
///
/// Records are taken in the order given; check them with
/// [`IatBlockLayout::first_misplaced`] first.
pub fn reaction_times(trials: &[IatTrial]) -> Vec<f64> {
    trials.iter().map(|trial| trial.rt_ms).collect()
}

/// Which pairing the respondent sorted faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IatBias {
    Receptive,
    Repressive,
}

/// Descriptive block means over error-free trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IatSummary {
    pub compatible_mean_rt: f64,
    pub incompatible_mean_rt: f64,
    /// Incompatible minus compatible mean, in milliseconds.
    pub difference_ms: f64,
    pub bias: IatBias,
    pub error_count: usize,
}

impl IatSummary {
    pub fn from_trials(trials: &[IatTrial], layout: &IatBlockLayout) -> Self {
        let block_number = |kind| {
            layout
                .blocks()
                .iter()
                .position(|block| block.kind == kind)
                .map(|position| position + 1)
        };
        let compatible = block_number(IatBlockKind::Compatible);
        let incompatible = block_number(IatBlockKind::Incompatible);

        let block_mean = |number: Option<usize>| {
            let times: Vec<f64> = trials
                .iter()
                .filter(|trial| Some(trial.block) == number && !trial.is_error)
                .map(|trial| trial.rt_ms)
                .collect();
            if times.is_empty() {
                0.0
            } else {
                mean(&times)
            }
        };

        let compatible_mean_rt = block_mean(compatible);
        let incompatible_mean_rt = block_mean(incompatible);
        let bias = if compatible_mean_rt < incompatible_mean_rt {
            IatBias::Receptive
        } else {
            IatBias::Repressive
        };

        Self {
            compatible_mean_rt,
            incompatible_mean_rt,
            difference_ms: incompatible_mean_rt - compatible_mean_rt,
            bias,
            error_count: trials.iter().filter(|trial| trial.is_error).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_derives_scored_block_boundaries() {
        let layout = IatBlockLayout::standard();
        assert_eq!(layout.total_trials(), 114);
        assert_eq!(layout.block_range(IatBlockKind::Compatible), Some(24..64));
        assert_eq!(
            layout.block_range(IatBlockKind::ReversedAttributePractice),
            Some(64..74)
        );
        assert_eq!(layout.block_range(IatBlockKind::Incompatible), Some(74..114));
    }

    #[test]
    fn locate_maps_flat_index_to_block() {
        let layout = IatBlockLayout::standard();
        assert_eq!(layout.locate(0), Some((0, 0)));
        assert_eq!(layout.locate(24), Some((2, 0)));
        assert_eq!(layout.locate(113), Some((4, 39)));
        assert_eq!(layout.locate(114), None);
    }

    #[test]
    fn first_misplaced_flags_records_out_of_layout_order() {
        let layout = IatBlockLayout::standard();
        let record = |block, trial| IatTrial {
            block,
            trial,
            stimulus: "I".to_string(),
            category: "Me".to_string(),
            rt_ms: 600.0,
            is_error: false,
        };

        let in_order: Vec<IatTrial> = (0..12).map(|trial| record(1, trial)).collect();
        assert_eq!(layout.first_misplaced(&in_order), None);

        let skipped = vec![record(1, 0), record(1, 2)];
        assert_eq!(layout.first_misplaced(&skipped), Some(1));

        let unnumbered = vec![record(0, 0)];
        assert_eq!(layout.first_misplaced(&unnumbered), Some(0));

        let mut overflow: Vec<IatTrial> = layout
            .blocks()
            .iter()
            .enumerate()
            .flat_map(|(position, block)| (0..block.trials).map(move |trial| (position, trial)))
            .map(|(position, trial)| record(position + 1, trial))
            .collect();
        assert_eq!(layout.first_misplaced(&overflow), None);
        overflow.push(record(5, 40));
        assert_eq!(layout.first_misplaced(&overflow), Some(114));
    }

    #[test]
    fn zero_variance_blocks_use_unit_sd() {
        let layout = IatBlockLayout::standard();
        let times = vec![600.0; 114];
        assert_eq!(d_score(&times, &layout), Some(0.0));
    }

    #[test]
    fn layout_without_incompatible_block_has_no_score() {
        let layout = IatBlockLayout::new(vec![IatBlock::new(
            IatBlockKind::Compatible,
            "Me / Receptive",
            "Others / Repressive",
            4,
        )]);
        assert_eq!(d_score(&[500.0; 4], &layout), None);
    }
}
