use std::path::{Path, PathBuf};

use eyre::Result;
use walkdir::WalkDir;

/// A candidate file inside the source directory, captured at enumeration
/// time. The simulation never rewrites the file, so the size recorded here
/// stays valid for the whole transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

/// List the regular files directly inside `root`.
///
/// The listing is re-taken before every selection, so callers always see the
/// directory as it currently is. Entries that fail to stat are skipped; a
/// missing root is an error so "cannot enumerate" stays distinct from
/// "nothing to do".
pub fn enumerate_source_files(root: &Path) -> Result<Vec<SourceFile>> {
    if !root.exists() {
        eyre::bail!("source directory does not exist: {}", root.display());
    }

    let mut files = Vec::new();
    for next in WalkDir::new(root).max_depth(1) {
        let entry = match next {
            Ok(entry) => entry,
            Err(err) => {
                if err.depth() == 0 {
                    return Err(err.into());
                }
                continue;
            }
        };

        if entry.depth() == 0 || !entry.file_type().is_file() {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(err) => {
                log::debug!("skipping {}: {err}", entry.path().display());
                continue;
            }
        };

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
        });
    }

    Ok(files)
}
