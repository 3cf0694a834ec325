use crate::errors::{util::to_bench_error, BenchError, BenchResult};
use std::fs;
use std::path::{Path, PathBuf};

const AVERAGED_PREFIX: &str = "averaged_";

/// The directory averaged results are written into.
pub struct AveragedDir {
    pub path: PathBuf,
}

impl AveragedDir {
    /// `averaged_<name>` next to the results directory
    pub fn default_for(results_dir: &Path) -> BenchResult<PathBuf> {
        let name = results_dir
            .file_name()
            .ok_or_else(|| {
                BenchError::ConfigError(format!(
                    "cannot derive an output directory from {}",
                    results_dir.display()
                ))
            })?
            .to_string_lossy();
        let parent = results_dir.parent().unwrap_or_else(|| Path::new(""));
        Ok(parent.join(format!("{}{}", AVERAGED_PREFIX, name)))
    }

    /// Remove whatever averaged output is at `path` and start from an empty directory.
    pub fn recreate(path: &Path) -> BenchResult<AveragedDir> {
        match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)
                .map_err(|e| to_bench_error(e, &format!("removing {}", path.display())))?,
            Ok(_) => {
                return Err(BenchError::Other(format!(
                    "{} exists and is not a directory",
                    path.display()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(BenchError::IoError(e)),
        }
        fs::create_dir_all(path)
            .map_err(|e| to_bench_error(e, &format!("creating {}", path.display())))?;
        Ok(AveragedDir {
            path: path.to_path_buf(),
        })
    }
}
