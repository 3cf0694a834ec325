pub mod average_runner;

pub use average_runner::AverageRunner;
