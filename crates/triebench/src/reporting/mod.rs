pub mod types;

pub use types::{AverageReport, RunSetSummary};
