use crate::averager::DEFAULT_PRECISION;
use crate::errors::{util::ensure_file_exists, BenchError, BenchResult};
use crate::layout::{DataStructure, Workload};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

pub const NUM_RUNS_ENV: &str = "TRIEBENCH_NUM_RUNS";
pub const PRECISION_ENV: &str = "TRIEBENCH_PRECISION";

const DEFAULT_NUM_RUNS: usize = 30;
const DEFAULT_COPY_PATTERN: &str = "mem";
/// Enough digits to round-trip any f64
pub const MAX_PRECISION: usize = 17;

/// Settings for one averaging pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AverageConfig {
    /// Repeated runs per benchmark configuration
    pub num_runs: usize,
    pub data_structures: Vec<DataStructure>,
    pub workloads: Vec<Workload>,
    /// Digits after the decimal point in averaged files
    pub precision: usize,
    /// Files whose name contains this are copied through unchanged
    pub copy_pattern: String,
    pub output_dir: Option<PathBuf>,
}

impl Default for AverageConfig {
    fn default() -> Self {
        Self {
            num_runs: DEFAULT_NUM_RUNS,
            data_structures: DataStructure::ALL.to_vec(),
            workloads: Workload::all(),
            precision: DEFAULT_PRECISION,
            copy_pattern: DEFAULT_COPY_PATTERN.to_string(),
            output_dir: None,
        }
    }
}

impl AverageConfig {
    pub fn from_string(cfg: String) -> BenchResult<Self> {
        let config: AverageConfig = serde_json::from_str(&cfg)?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> BenchResult<Self> {
        let path = path.as_ref();
        ensure_file_exists(path)?;
        Self::from_string(read_to_string(path)?)
    }

    pub fn to_string(&self) -> BenchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Override settings from `TRIEBENCH_*` environment variables
    pub fn apply_env(mut self) -> BenchResult<Self> {
        if let Some(runs) = env_usize(NUM_RUNS_ENV)? {
            self.num_runs = runs;
        }
        if let Some(precision) = env_usize(PRECISION_ENV)? {
            self.precision = precision;
        }
        Ok(self)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.num_runs == 0 {
            return Err(BenchError::ConfigError(
                "num_runs must be at least 1".to_string(),
            ));
        }
        if self.data_structures.is_empty() {
            return Err(BenchError::ConfigError(
                "no data structures selected".to_string(),
            ));
        }
        if self.workloads.is_empty() {
            return Err(BenchError::ConfigError("no workloads selected".to_string()));
        }
        if self.precision > MAX_PRECISION {
            return Err(BenchError::ConfigError(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, self.precision
            )));
        }
        if self.copy_pattern.is_empty() {
            return Err(BenchError::ConfigError(
                "copy_pattern must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_usize(key: &str) -> BenchResult<Option<usize>> {
    match env::var(key) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            BenchError::ConfigError(format!("{} must be a non-negative integer, got {:?}", key, value))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(BenchError::ConfigError(format!("{}: {}", key, e))),
    }
}
