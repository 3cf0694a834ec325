use crate::errors::{util::ensure_dir_exists, BenchResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy every regular file in `src_dir` whose name contains `pattern` into `dst_dir`.
///
/// Returns the destination paths sorted by file name.
pub fn copy_matching(src_dir: &Path, dst_dir: &Path, pattern: &str) -> BenchResult<Vec<PathBuf>> {
    ensure_dir_exists(src_dir)?;

    let mut sources: Vec<PathBuf> = fs::read_dir(src_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let name = path.file_name()?.to_string_lossy();
            if path.is_file() && name.contains(pattern) {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    sources.sort();

    let mut copied = Vec::with_capacity(sources.len());
    for src in sources {
        if let Some(name) = src.file_name() {
            let dst = dst_dir.join(name);
            fs::copy(&src, &dst)?;
            copied.push(dst);
        }
    }
    Ok(copied)
}
