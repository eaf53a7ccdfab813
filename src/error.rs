//! Error types for metadata generation and loading.
//!
//! Generation failures carry the qualified name of the offending module so a
//! driver processing many modules can report which one failed. Loading
//! failures carry the path or a description of the malformed content
//! instead, since no descriptor exists yet at that point.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while generating or loading module metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Rendering a module's metadata document failed.
    #[error("failed to serialise metadata for {module}: {reason}")]
    Serialise {
        /// Qualified name of the module being serialised.
        module: String,
        /// Description of the serialisation failure.
        reason: String,
    },

    /// The rendered document could not be written to its destination.
    #[error("failed to write metadata for {module} to {path}")]
    Write {
        /// Qualified name of the module being written.
        module: String,
        /// Destination path of the failed write.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A metadata document could not be read from disk.
    #[error("failed to read metadata from {path}")]
    Read {
        /// Path of the unreadable document.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A metadata document did not have the expected shape.
    #[error("malformed metadata document: {reason}")]
    Malformed {
        /// Description of the mismatch.
        reason: String,
    },

    /// A module element carried a label naming no known category.
    #[error("unknown module type label: {label}")]
    UnknownModuleType {
        /// The unrecognised element label.
        label: String,
    },
}

/// Convenience alias for results using [`MetadataError`].
pub type Result<T> = std::result::Result<T, MetadataError>;
