use crate::bench_config::AverageConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Containers exercised by the benchmark binary, in the order of its numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStructure {
    Map,
    BTree,
    STree,
    LpcBTrie,
    LpcQTrie,
}

impl DataStructure {
    pub const ALL: [DataStructure; 5] = [
        DataStructure::Map,
        DataStructure::BTree,
        DataStructure::STree,
        DataStructure::LpcBTrie,
        DataStructure::LpcQTrie,
    ];

    /// Name used in result file names
    pub fn name(&self) -> &'static str {
        match self {
            DataStructure::Map => "map",
            DataStructure::BTree => "btree",
            DataStructure::STree => "stree",
            DataStructure::LpcBTrie => "lpcbtrie",
            DataStructure::LpcQTrie => "lpcqtrie",
        }
    }

    /// Numeric id the benchmark binary takes as its first argument
    pub fn id(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DataStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataStructure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataStructure::ALL
            .into_iter()
            .find(|ds| ds.name() == s)
            .ok_or_else(|| format!("unknown data structure: {}", s))
    }
}

/// Memory-access traces replayed by the valgrind workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceName {
    Top,
    Amarok,
    Konq,
    Kpdf,
}

impl TraceName {
    pub const ALL: [TraceName; 4] = [
        TraceName::Top,
        TraceName::Amarok,
        TraceName::Konq,
        TraceName::Kpdf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraceName::Top => "top_trace_bin",
            TraceName::Amarok => "amarok_trace_bin",
            TraceName::Konq => "konq_trace_bin",
            TraceName::Kpdf => "kpdf_trace_bin",
        }
    }
}

/// A benchmark workload as it appears in result file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Workload {
    /// Random inserts followed by locates
    IRandom,
    /// Random insert/delete mix
    DRandom,
    Genome,
    Trace(TraceName),
}

impl Workload {
    /// Every workload in the order the result files are produced
    pub fn all() -> Vec<Workload> {
        let mut workloads = vec![Workload::IRandom, Workload::DRandom, Workload::Genome];
        workloads.extend(TraceName::ALL.into_iter().map(Workload::Trace));
        workloads
    }

    pub fn name(&self) -> &'static str {
        match self {
            Workload::IRandom => "irandom",
            Workload::DRandom => "drandom",
            Workload::Genome => "genome",
            Workload::Trace(trace) => trace.name(),
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Workload {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Workload::all()
            .into_iter()
            .find(|wl| wl.name() == s)
            .ok_or_else(|| format!("unknown workload: {}", s))
    }
}

impl TryFrom<String> for Workload {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Workload> for String {
    fn from(value: Workload) -> Self {
        value.name().to_string()
    }
}

/// `<ds>_<workload>_time`
pub fn averaged_file_name(ds: DataStructure, workload: Workload) -> String {
    format!("{}_{}_time", ds, workload)
}

/// `<ds>_<workload>_time_<run>`
pub fn run_file_name(ds: DataStructure, workload: Workload, run: usize) -> String {
    format!("{}_{}", averaged_file_name(ds, workload), run)
}

/// The repeated runs of one benchmark configuration and where their average goes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSet {
    pub data_structure: DataStructure,
    pub workload: Workload,
    /// Ordered by run index
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
}

impl RunSet {
    pub fn new(
        results_dir: &Path,
        output_dir: &Path,
        data_structure: DataStructure,
        workload: Workload,
        num_runs: usize,
    ) -> Self {
        let inputs = (0..num_runs)
            .map(|run| results_dir.join(run_file_name(data_structure, workload, run)))
            .collect();
        Self {
            data_structure,
            workload,
            inputs,
            output: output_dir.join(averaged_file_name(data_structure, workload)),
        }
    }

    pub fn name(&self) -> String {
        averaged_file_name(self.data_structure, self.workload)
    }
}

/// Every run set named by the config, data structure major.
pub fn plan_run_sets(config: &AverageConfig, results_dir: &Path, output_dir: &Path) -> Vec<RunSet> {
    let mut sets = Vec::with_capacity(config.data_structures.len() * config.workloads.len());
    for &ds in &config.data_structures {
        for &wl in &config.workloads {
            sets.push(RunSet::new(results_dir, output_dir, ds, wl, config.num_runs));
        }
    }
    sets
}
