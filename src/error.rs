use std::path::PathBuf;

/// Problems with the run setup. These stop the run before any record is read.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no source archives were given")]
    NoArchives,

    #[error("javadoc dump file not found: {}", path.display())]
    DumpNotFound { path: PathBuf },
}

/// An archive argument that could not be opened. The archive is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveOpenError {
    #[error("archive not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("not a zip archive: {}", path.display())]
    NotAnArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to read archive {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ArchiveOpenError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::NotAnArchive { path, .. } | Self::Io { path, .. } => {
                path
            }
        }
    }
}

/// A dump line without the three `=`-separated fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed dump record on line {line_number}: {content:?}")]
pub struct MalformedRecord {
    pub line_number: usize,
    pub content: String,
}
