pub mod averager;
pub mod bench_config;
pub mod errors;
pub mod io_utils;
pub mod layout;
pub mod reporting;
pub mod runners;
pub mod work_dir;

// Re-export main components for easier use
pub use averager::ColumnAverager;
pub use bench_config::AverageConfig;
pub use errors::{BenchError, BenchResult};
pub use reporting::{AverageReport, RunSetSummary};
pub use runners::average_runner::AverageRunner;
