use crate::averager::ColumnAverager;
use crate::bench_config::AverageConfig;
use crate::errors::{util::ensure_dir_exists, BenchError, BenchResult};
use crate::io_utils::copy_matching;
use crate::layout::{plan_run_sets, RunSet};
use crate::reporting::AverageReport;
use crate::work_dir::AveragedDir;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Averages every run set of a results directory, one after another.
pub struct AverageRunner {
    config: AverageConfig,
    results_dir: PathBuf,
    output_dir: PathBuf,
}

impl AverageRunner {
    pub fn new(config: AverageConfig, results_dir: impl Into<PathBuf>) -> BenchResult<Self> {
        config.validate()?;
        let results_dir = results_dir.into();
        let output_dir = match &config.output_dir {
            Some(dir) => dir.clone(),
            None => AveragedDir::default_for(&results_dir)?,
        };
        Ok(Self {
            config,
            results_dir,
            output_dir,
        })
    }

    pub fn config(&self) -> &AverageConfig {
        &self.config
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The run sets a pass would average, without touching the filesystem
    pub fn plan(&self) -> Vec<RunSet> {
        plan_run_sets(&self.config, &self.results_dir, &self.output_dir)
    }

    /// Run the pass. The first failing run set aborts it.
    pub fn run(&self) -> BenchResult<AverageReport> {
        ensure_dir_exists(&self.results_dir)?;
        self.check_distinct_dirs()?;

        let averaged = AveragedDir::recreate(&self.output_dir)?;
        info!(
            "Averaging {} runs per set from {} into {}",
            self.config.num_runs,
            self.results_dir.display(),
            averaged.path.display()
        );

        let averager = ColumnAverager::new(self.config.precision);
        let mut report = AverageReport::new(averaged.path.clone());

        for run_set in self.plan() {
            let summary = averager.average_run_set(&run_set)?;
            info!("Averaged {} ({} lines)", summary.name, summary.lines);
            report.add_run_set(summary);
        }

        report.copied = copy_matching(&self.results_dir, &averaged.path, &self.config.copy_pattern)?;
        if report.copied.is_empty() {
            warn!(
                "No files matching {:?} found in {}",
                self.config.copy_pattern,
                self.results_dir.display()
            );
        } else {
            debug!("Copied {} memory reports", report.copied.len());
        }

        Ok(report)
    }

    /// The output directory is wiped before use, so it must not hold the results.
    fn check_distinct_dirs(&self) -> BenchResult<()> {
        // a missing output directory cannot be an ancestor of an existing one
        if !self.output_dir.exists() {
            return Ok(());
        }
        let results = fs::canonicalize(&self.results_dir)?;
        let output = fs::canonicalize(&self.output_dir)?;
        if results.starts_with(&output) {
            return Err(BenchError::ConfigError(format!(
                "output directory {} contains the results directory {}",
                self.output_dir.display(),
                self.results_dir.display()
            )));
        }
        Ok(())
    }
}
