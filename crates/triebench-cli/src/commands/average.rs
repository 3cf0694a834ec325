use anyhow::{Context, Result};
use console::style;
use std::path::PathBuf;
use triebench::{AverageConfig, AverageReport, AverageRunner};

use crate::cli::OutputFormat;

#[derive(Debug)]
pub struct AverageOptions {
    pub results_dir: PathBuf,
    pub runs: Option<usize>,
    pub precision: Option<usize>,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub summary: bool,
    pub list: bool,
}

/// Config file (or defaults), then environment, then command-line flags.
pub fn resolve_config(opts: &AverageOptions) -> Result<AverageConfig> {
    let base = match &opts.config {
        Some(path) => AverageConfig::from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AverageConfig::default(),
    };
    let mut config = base.apply_env()?;

    if let Some(runs) = opts.runs {
        config.num_runs = runs;
    }
    if let Some(precision) = opts.precision {
        config.precision = precision;
    }
    if let Some(output) = &opts.output {
        config.output_dir = Some(output.clone());
    }
    Ok(config)
}

/// Run (or list) the averaging pass and render what should be printed.
pub fn handle_average(opts: AverageOptions) -> Result<String> {
    let config = resolve_config(&opts)?;
    let runner = AverageRunner::new(config, &opts.results_dir)?;

    if opts.list {
        return Ok(render_plan(&runner));
    }

    let report = runner.run().with_context(|| {
        format!(
            "Failed to average results in {}",
            opts.results_dir.display()
        )
    })?;
    render_report(&report, opts.format, opts.summary)
}

fn render_plan(runner: &AverageRunner) -> String {
    let plan = runner.plan();
    let mut lines = vec![format!(
        "{} {} run sets, {} runs each, from {} into {}",
        style("Planned").green().bold(),
        plan.len(),
        runner.config().num_runs,
        runner.results_dir().display(),
        runner.output_dir().display()
    )];
    lines.extend(plan.iter().map(|set| {
        format!(
            "  {:<36} data structure {}",
            set.name(),
            set.data_structure.id()
        )
    }));
    lines.join("\n")
}

fn render_report(report: &AverageReport, format: OutputFormat, summary: bool) -> Result<String> {
    Ok(match (format, summary) {
        (OutputFormat::Json, _) => serde_json::to_string_pretty(report)?,
        (OutputFormat::Text, true) => report.summary(),
        (OutputFormat::Text, false) => report.to_string(),
    })
}
