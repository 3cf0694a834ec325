use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of averaging one run set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSetSummary {
    pub name: String,
    pub output: PathBuf,
    /// Number of runs averaged
    pub inputs: usize,
    /// Lines written, i.e. the length of the shortest run
    pub lines: usize,
}

/// Everything one averaging pass produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct AverageReport {
    pub output_dir: PathBuf,
    pub run_sets: Vec<RunSetSummary>,
    pub copied: Vec<PathBuf>,
}

impl AverageReport {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Default::default()
        }
    }

    pub fn add_run_set(&mut self, summary: RunSetSummary) {
        self.run_sets.push(summary);
    }

    pub fn total_lines(&self) -> usize {
        self.run_sets.iter().map(|s| s.lines).sum()
    }

    pub fn summary(&self) -> String {
        format!(
            "Averaged {} run sets ({} lines) and copied {} memory reports into {}",
            self.run_sets.len(),
            self.total_lines(),
            self.copied.len(),
            self.output_dir.display()
        )
    }
}

impl fmt::Display for AverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Averaged results in {}", self.output_dir.display())?;
        for set in &self.run_sets {
            writeln!(
                f,
                "  {:<36} {:>3} runs {:>6} lines",
                set.name, set.inputs, set.lines
            )?;
        }
        if !self.copied.is_empty() {
            writeln!(f, "Copied memory reports:")?;
            for path in &self.copied {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                writeln!(f, "  {}", name)?;
            }
        }
        write!(f, "{}", self.summary())
    }
}
