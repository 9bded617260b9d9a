use std::path::PathBuf;

/// Failures that stop a traversal pass.
///
/// The messages are what the operator sees on stdout, so they follow the
/// same wording as the rest of the console output.
#[derive(Debug, thiserror::Error)]
pub enum FsrError {
    #[error("{0}")]
    Walk(#[from] ignore::Error),

    #[error("{} 删除失败：{source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} 复制到 {} 失败：{source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type alias using FsrError.
pub type Result<T> = std::result::Result<T, FsrError>;
