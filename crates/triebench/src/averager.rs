use crate::errors::{BenchError, BenchResult};
use crate::layout::RunSet;
use crate::reporting::RunSetSummary;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_PRECISION: usize = 6;

/// Averages corresponding lines of repeated benchmark runs column by column.
///
/// Lines are consumed from every source in order. The pass ends at the first
/// source that runs out, so the output is as long as the shortest input and
/// leftover lines in longer inputs are ignored.
#[derive(Debug, Clone, Copy)]
pub struct ColumnAverager {
    precision: usize,
}

impl Default for ColumnAverager {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl ColumnAverager {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    /// Average `sources` line by line into `out`, returning the number of lines written.
    ///
    /// Each source is paired with a label used in error messages. A line is only
    /// parsed once every source has produced it. The first source fixes the
    /// column count of each line; any other source disagreeing on that line is
    /// an error, as is any token that is not a number.
    pub fn average<R: BufRead, W: Write>(
        &self,
        mut sources: Vec<(String, R)>,
        mut out: W,
    ) -> BenchResult<usize> {
        if sources.is_empty() {
            return Err(BenchError::ConfigError(
                "cannot average an empty run set".to_string(),
            ));
        }

        let divisor = sources.len() as f64;
        let mut lines = vec![String::new(); sources.len()];
        let mut line_no = 0;
        let mut written = 0;

        loop {
            line_no += 1;

            for ((label, reader), buf) in sources.iter_mut().zip(lines.iter_mut()) {
                buf.clear();
                if reader.read_line(buf)? == 0 {
                    debug!("{} ended after {} lines", label, line_no - 1);
                    out.flush()?;
                    return Ok(written);
                }
            }

            let mut totals: Vec<f64> = Vec::new();
            for (idx, ((label, _), buf)) in sources.iter().zip(&lines).enumerate() {
                let values = parse_line(buf, label, line_no)?;
                if idx == 0 {
                    totals = values;
                    continue;
                }
                if values.len() != totals.len() {
                    return Err(BenchError::ArityMismatch {
                        file: label.clone(),
                        line: line_no,
                        expected: totals.len(),
                        found: values.len(),
                    });
                }
                for (total, value) in totals.iter_mut().zip(values) {
                    *total += value;
                }
            }

            let row: Vec<String> = totals
                .iter()
                .map(|total| format!("{:.*}", self.precision, total / divisor))
                .collect();
            writeln!(out, "{}", row.join(" "))?;
            written += 1;
        }
    }

    /// Average every input of `run_set` into its output file.
    ///
    /// All inputs are opened before the output is created, so a missing run
    /// leaves no output behind.
    pub fn average_run_set(&self, run_set: &RunSet) -> BenchResult<RunSetSummary> {
        let mut sources = Vec::with_capacity(run_set.inputs.len());
        for path in &run_set.inputs {
            sources.push((label_for(path), BufReader::new(open_input(path)?)));
        }

        let output = File::create(&run_set.output)?;
        let lines = self.average(sources, BufWriter::new(output))?;

        Ok(RunSetSummary {
            name: run_set.name(),
            output: run_set.output.clone(),
            inputs: run_set.inputs.len(),
            lines,
        })
    }
}

fn parse_line(line: &str, label: &str, line_no: usize) -> BenchResult<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| BenchError::ParseError {
                file: label.to_string(),
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

fn open_input(path: &Path) -> BenchResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => BenchError::FileNotFound(path.to_path_buf()),
        _ => BenchError::IoError(e),
    })
}

fn label_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DataStructure, Workload};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;
    use test_case::test_case;

    fn sources(contents: &[&str]) -> Vec<(String, Cursor<Vec<u8>>)> {
        contents
            .iter()
            .enumerate()
            .map(|(i, c)| (format!("run_{}", i), Cursor::new(c.as_bytes().to_vec())))
            .collect()
    }

    fn run(contents: &[&str]) -> BenchResult<String> {
        let mut out = Vec::new();
        ColumnAverager::default().average(sources(contents), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn identical_files_average_to_themselves() {
        let out = run(&["1 2 3\n4 4 4\n", "1 2 3\n4 4 4\n"]).unwrap();
        assert_eq!(
            out,
            "1.000000 2.000000 3.000000\n4.000000 4.000000 4.000000\n"
        );
    }

    #[test]
    fn fields_are_averaged_position_wise() {
        let out = run(&["16384 0.5 1.0\n", "16384 1.5 2.0\n", "16384 1.0 6.0\n"]).unwrap();
        assert_eq!(out, "16384.000000 1.000000 3.000000\n");
    }

    #[test]
    fn single_run_reproduces_the_input() {
        let out = run(&["1 2.25\n3 -4\n"]).unwrap();
        assert_eq!(out, "1.000000 2.250000\n3.000000 -4.000000\n");
    }

    #[test_case(&["1\n2\n3\n4\n5\n", "1\n2\n3\n"], 3 ; "second shorter")]
    #[test_case(&["1\n2\n", "1\n2\n3\n4\n5\n"], 2 ; "first shorter")]
    #[test_case(&["1\n2\n3\n", "1\n2\n3\n", ""], 0 ; "one empty")]
    fn output_stops_at_the_shortest_run(contents: &[&str], expected: usize) {
        let mut out = Vec::new();
        let lines = ColumnAverager::default()
            .average(sources(contents), &mut out)
            .unwrap();
        assert_eq!(lines, expected);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), expected);
    }

    #[test]
    fn arity_follows_the_data_not_a_fixed_width() {
        let out = run(&["1 2 3 4 5\n7\n", "3 4 5 6 7\n9\n"]).unwrap();
        assert_eq!(
            out,
            "2.000000 3.000000 4.000000 5.000000 6.000000\n8.000000\n"
        );
    }

    #[test]
    fn missing_trailing_newline_still_counts() {
        let out = run(&["1 1\n2 2", "3 3\n4 4"]).unwrap();
        assert_eq!(out, "2.000000 2.000000\n3.000000 3.000000\n");
    }

    #[test]
    fn blank_lines_average_to_blank_lines() {
        let out = run(&["\n1\n", "  \n3\n"]).unwrap();
        assert_eq!(out, "\n2.000000\n");
    }

    #[test]
    fn lines_past_the_shortest_run_are_never_parsed() {
        let mut out = Vec::new();
        let lines = ColumnAverager::default()
            .average(sources(&["1 2\n1 2\n", "1 2\n1\n", "1 2\n"]), &mut out)
            .unwrap();
        assert_eq!(lines, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "1.000000 2.000000\n");

        let out = run(&["1\n2\n", "3\nnot-a-number\n", "5\n"]).unwrap();
        assert_eq!(out, "3.000000\n");
    }

    #[test]
    fn arity_mismatch_names_file_and_line() {
        let err = run(&["1 2\n1 2\n", "1 2\n1 2 3\n"]).unwrap_err();
        match err {
            BenchError::ArityMismatch {
                file,
                line,
                expected,
                found,
            } => {
                assert_eq!(file, "run_1");
                assert_eq!(line, 2);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn malformed_token_fails_the_set() {
        let err = run(&["1 2\n", "1 two\n"]).unwrap_err();
        assert!(
            matches!(err, BenchError::ParseError { ref file, line: 1, ref token } if file == "run_1" && token == "two")
        );
    }

    #[test]
    fn empty_run_set_is_rejected() {
        let err = ColumnAverager::default()
            .average(Vec::<(String, Cursor<Vec<u8>>)>::new(), Vec::new())
            .unwrap_err();
        assert!(matches!(err, BenchError::ConfigError(_)));
    }

    #[test]
    fn precision_is_configurable() {
        let mut out = Vec::new();
        ColumnAverager::new(2)
            .average(sources(&["1 2\n", "2 2\n"]), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.50 2.00\n");
    }

    #[test]
    fn run_set_on_disk() {
        let dir = tempdir().unwrap();
        let results = dir.path().join("results");
        let averaged = dir.path().join("averaged_results");
        fs::create_dir_all(&results).unwrap();
        fs::create_dir_all(&averaged).unwrap();
        fs::write(results.join("stree_genome_time_0"), "10 20\n").unwrap();
        fs::write(results.join("stree_genome_time_1"), "20 40\n").unwrap();

        let set = RunSet::new(&results, &averaged, DataStructure::STree, Workload::Genome, 2);
        let summary = ColumnAverager::default().average_run_set(&set).unwrap();

        assert_eq!(summary.name, "stree_genome_time");
        assert_eq!(summary.inputs, 2);
        assert_eq!(summary.lines, 1);
        assert_eq!(
            fs::read_to_string(averaged.join("stree_genome_time")).unwrap(),
            "15.000000 30.000000\n"
        );
    }

    #[test]
    fn missing_run_is_file_not_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("map_drandom_time_0"), "1 1\n").unwrap();

        let set = RunSet::new(dir.path(), dir.path(), DataStructure::Map, Workload::DRandom, 2);
        let err = ColumnAverager::default().average_run_set(&set).unwrap_err();

        assert!(
            matches!(err, BenchError::FileNotFound(ref p) if p == &dir.path().join("map_drandom_time_1"))
        );
        assert!(!dir.path().join("map_drandom_time").exists());
    }
}
