//! Scoring and profiling core for the PAIMA motive assessment.
//!
//! Raw instrument answers flow one way through the crate:
//! [`RawInputs`](assessment::RawInputs) are turned into a sixteen-field
//! [`ScoreVector`](assessment::ScoreVector) by the score aggregator, and the
//! profile classifier reduces that vector to a single
//! [`ProfileKey`](assessment::ProfileKey) plus supporting rankings. Both
//! stages are pure functions; session bookkeeping, report views and the
//! HTTP surface sit around them.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
