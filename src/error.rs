use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the repo store and the operations built on it.
#[derive(Debug, Error)]
pub enum GopathsError {
    #[error("storage error: reading {}", path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage error: writing {}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage error: parsing {}", path.display())]
    StorageParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("storage error: serializing repo record")]
    StorageSerialize(#[from] toml::ser::Error),

    #[error("storage error: {} has schema version {found}, this build supports up to {supported}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },

    #[error("io error: {what}")]
    Io {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {} is not valid UTF-8", path.display())]
    NonUnicodePath { path: PathBuf },

    #[error("io error: environment variable {name} is not valid UTF-8")]
    NonUnicodeVar { name: String },

    #[error("`{0}` is not implemented yet")]
    NotImplemented(&'static str),
}
