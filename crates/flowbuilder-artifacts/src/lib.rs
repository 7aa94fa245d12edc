//! Flowbuilder Artifacts
//!
//! Packages code artifacts into the archives uploaded alongside flow
//! versions, and keeps track of step code edited in the builder but not
//! yet saved.

use thiserror::Error;

pub mod archive;
pub mod cache;

pub use archive::{package_artifact, package_artifacts, PackagedArtifact, ARCHIVE_MIME, ENTRY_FILE, MANIFEST_FILE};
pub use cache::{InMemoryCodeArtifactCache, HELLO_WORLD_CODE, HELLO_WORLD_PACKAGE};

/// Errors that can occur while packaging artifacts
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to write archive entry {entry} for {artifact}: {source}")]
    ArchiveWrite {
        artifact: String,
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Failed to finish archive for {artifact}: {source}")]
    ArchiveFinish {
        artifact: String,
        #[source]
        source: zip::result::ZipError,
    },
}

/// Result type for artifact operations
pub type ArtifactResult<T> = Result<T, ArtifactError>;
