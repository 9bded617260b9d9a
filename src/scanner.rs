use crate::error::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use regex::Regex;
use std::env;
use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

/// What one traversal pass looks for
#[derive(Debug, Clone)]
pub struct Target {
    /// Root directory of the walk
    pub root: PathBuf,

    /// Pattern applied to each entry's base name
    pub pattern: Regex,

    /// The replacement file, never reported as a match
    pub exclude: Option<PathBuf>,
}

impl Target {
    /// Describe a pass over `root`
    ///
    /// # Arguments
    /// * `root` - Directory to walk
    /// * `pattern` - Compiled name pattern
    /// * `exclude` - Path of the replacement file, when it is known
    pub fn new(root: impl Into<PathBuf>, pattern: Regex, exclude: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pattern,
            exclude,
        }
    }

    /// Walk `root` and call `handler` for every match
    ///
    /// Directories are descended into but never matched. Entries in each
    /// directory are visited in file name order, so two passes over an
    /// unchanged tree see the same matches in the same order.
    ///
    /// The walk stops at the first error, whether it comes from reading the
    /// tree or from `handler`, and that error is returned. Matches handled
    /// before it are not undone.
    ///
    /// # Returns
    /// * `Result<usize>` - Number of matches handed to `handler`
    pub fn for_each_match<F>(&self, mut handler: F) -> Result<usize>
    where
        F: FnMut(&Path, &Metadata) -> Result<()>,
    {
        let excluded = self.exclude.as_deref().map(comparable);
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false) // Plain tree walk: hidden and ignored files too
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut matched = 0;

        for result in walker {
            let entry = result?;
            let path = entry.path();

            if entry.file_type().map_or(false, |ft| ft.is_dir()) {
                continue;
            }

            if excluded.is_some() && excluded == Some(comparable(path)) {
                debug!("skipping replacement file {}", path.display());
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if !self.pattern.is_match(&name) {
                trace!("no match: {}", path.display());
                continue;
            }

            let metadata = entry.metadata()?;
            handler(path, &metadata)?;
            matched += 1;
        }

        Ok(matched)
    }
}

/// Absolute, lexically normalized, lower-cased form of `path`
///
/// Two paths naming the same file compare equal here regardless of
/// relative spelling or letter case.
fn comparable(path: &Path) -> String {
    absolute(path).to_string_lossy().to_lowercase()
}

/// Join relative paths onto the current directory and fold `.`/`..`
fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
