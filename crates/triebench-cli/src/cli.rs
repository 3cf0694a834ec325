use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::commands::average::{handle_average, AverageOptions};
use crate::logging::setup_logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the per-run result files
    #[arg(value_name = "RESULTS_DIRECTORY")]
    results_dir: PathBuf,

    #[arg(
        long = "runs",
        short = 'n',
        value_name = "QUANTITY",
        help = "Number of repeated runs per benchmark configuration",
        long_help = "Number of repeated runs per benchmark configuration. Overrides the config file and TRIEBENCH_NUM_RUNS."
    )]
    runs: Option<usize>,

    #[arg(
        long = "precision",
        value_name = "DIGITS",
        help = "Digits after the decimal point in averaged files"
    )]
    precision: Option<usize>,

    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        help = "JSON file with averaging settings"
    )]
    config: Option<PathBuf>,

    #[arg(
        long = "output",
        short = 'o',
        value_name = "DIR",
        help = "Write averaged files here instead of averaged_<RESULTS_DIRECTORY>"
    )]
    output: Option<PathBuf>,

    #[arg(
        long = "format",
        value_name = "FORMAT",
        help = "Report format",
        default_value = "text"
    )]
    format: OutputFormat,

    #[arg(
        long = "summary",
        help = "Show only summary results",
        action = clap::ArgAction::SetTrue
    )]
    summary: bool,

    #[arg(
        long = "list",
        help = "List the run sets that would be averaged and exit",
        action = clap::ArgAction::SetTrue
    )]
    list: bool,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    verbose: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn into_options(self) -> AverageOptions {
        AverageOptions {
            results_dir: self.results_dir,
            runs: self.runs,
            precision: self.precision,
            config: self.config,
            output: self.output,
            format: self.format,
            summary: self.summary,
            list: self.list,
        }
    }
}

pub fn cli() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let rendered = handle_average(cli.into_options())?;
    println!("{}", rendered);
    Ok(())
}
