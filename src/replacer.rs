use crate::error::{FsrError, Result};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Puts a copy of one file in place of each match
#[derive(Debug, Clone)]
pub struct Replacer {
    source: PathBuf,
    file_name: OsString,
}

impl Replacer {
    /// Returns `None` when `source` has no file name (`..`, `/`)
    pub fn new(source: impl Into<PathBuf>) -> Option<Self> {
        let source = source.into();
        let file_name = source.file_name()?.to_os_string();
        Some(Self { source, file_name })
    }

    /// Path of the file copied over each match
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where the copy for a match at `matched` ends up
    pub fn destination(&self, matched: &Path) -> PathBuf {
        matched
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.file_name)
    }

    /// Delete `matched`, then copy the replacement next to where it was
    ///
    /// Progress for each step goes to `out` as soon as the step succeeds.
    /// The delete is not rolled back when the copy fails.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the copy that was written
    pub fn replace<W: Write>(&self, matched: &Path, out: &mut W) -> Result<PathBuf> {
        fs::remove_file(matched).map_err(|source| FsrError::Remove {
            path: matched.to_path_buf(),
            source,
        })?;
        writeln!(out, "{} 已删除！", matched.display())?;

        let destination = self.destination(matched);
        if same_file(&self.source, &destination) {
            // Copying a file onto itself would truncate it first
            debug!("{} is the replacement itself", destination.display());
        } else {
            let bytes = fs::copy(&self.source, &destination).map_err(|source| FsrError::Copy {
                from: self.source.clone(),
                to: destination.clone(),
                source,
            })?;
            debug!("copied {} bytes to {}", bytes, destination.display());
        }
        writeln!(out, "{} 已复制！", destination.display())?;

        Ok(destination)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
