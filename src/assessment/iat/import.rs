use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::{IatBlockLayout, IatTrial};

#[derive(Debug)]
pub enum IatImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidReactionTime { row: usize, value: f64 },
    TrialOutOfPlace { row: usize, block: usize, trial: usize },
}

impl std::fmt::Display for IatImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IatImportError::Io(err) => write!(f, "failed to read IAT trial log: {}", err),
            IatImportError::Csv(err) => write!(f, "invalid IAT trial CSV data: {}", err),
            IatImportError::InvalidReactionTime { row, value } => write!(
                f,
                "row {} has a reaction time of {} ms; expected a positive duration",
                row, value
            ),
            IatImportError::TrialOutOfPlace { row, block, trial } => write!(
                f,
                "row {} is tagged block {} trial {}, which does not match the block layout",
                row, block, trial
            ),
        }
    }
}

impl std::error::Error for IatImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IatImportError::Io(err) => Some(err),
            IatImportError::Csv(err) => Some(err),
            IatImportError::InvalidReactionTime { .. }
            | IatImportError::TrialOutOfPlace { .. } => None,
        }
    }
}

impl From<std::io::Error> for IatImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IatImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads the instrument's per-trial CSV export.
///
/// Expected header: `block,trial,stimulus,category,rt_ms,is_error`. Rows keep
/// file order, which must be trial order; [`IatTrialImporter::check_layout`]
/// confirms it against a block layout.
pub struct IatTrialImporter;

impl IatTrialImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<IatTrial>, IatImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<IatTrial>, IatImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut trials = Vec::new();

        for (index, record) in csv_reader.deserialize::<TrialRow>().enumerate() {
            let row = record?;
            if !(row.rt_ms.is_finite() && row.rt_ms > 0.0) {
                return Err(IatImportError::InvalidReactionTime {
                    row: index + 1,
                    value: row.rt_ms,
                });
            }

            trials.push(IatTrial {
                block: row.block,
                trial: row.trial,
                stimulus: row.stimulus,
                category: row.category,
                rt_ms: row.rt_ms,
                is_error: row.is_error,
            });
        }

        tracing::debug!(trials = trials.len(), "imported IAT trial log");
        Ok(trials)
    }

    /// Confirm an imported log follows `layout` row by row.
    pub fn check_layout(trials: &[IatTrial], layout: &IatBlockLayout) -> Result<(), IatImportError> {
        match layout.first_misplaced(trials) {
            Some(index) => Err(IatImportError::TrialOutOfPlace {
                row: index + 1,
                block: trials[index].block,
                trial: trials[index].trial,
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TrialRow {
    block: usize,
    trial: usize,
    #[serde(default)]
    stimulus: String,
    #[serde(default)]
    category: String,
    rt_ms: f64,
    #[serde(default, deserialize_with = "flexible_bool")]
    is_error: bool,
}

/// Accepts `true/false`, `1/0`, `yes/no` and blanks.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim).map(str::to_ascii_lowercase) {
        None => Ok(false),
        Some(value) => match value.as_str() {
            "" | "0" | "false" | "no" => Ok(false),
            "1" | "true" | "yes" => Ok(true),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean flag, got '{other}'"
            ))),
        },
    }
}
