//! Artifact packaging
//!
//! Each artifact becomes a zip archive holding the code as `index.js` and
//! the dependency manifest as `package.json`.

use std::io::{Cursor, Write};

use flowbuilder_core::NamedArtifact;
use tracing::debug;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{ArtifactError, ArtifactResult};

/// Archive entry holding the artifact code
pub const ENTRY_FILE: &str = "index.js";

/// Archive entry holding the dependency manifest
pub const MANIFEST_FILE: &str = "package.json";

/// MIME type of a packaged artifact
pub const ARCHIVE_MIME: &str = "application/zip";

/// An artifact ready to be attached to a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    /// Multipart part name
    pub name: String,

    /// File name of the part
    pub file_name: String,

    /// Archive bytes
    pub bytes: Vec<u8>,
}

impl PackagedArtifact {
    /// MIME type of the archive
    pub fn mime(&self) -> &'static str {
        ARCHIVE_MIME
    }
}

/// File name of the archive for an artifact name
///
/// Path separators are replaced; the part name itself is never changed.
fn archive_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "artifact.zip".to_string()
    } else {
        format!("{}.zip", stem)
    }
}

/// Package a single artifact
pub fn package_artifact(named: &NamedArtifact) -> ArtifactResult<PackagedArtifact> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for (entry, data) in [
        (ENTRY_FILE, named.artifact.content.as_bytes()),
        (MANIFEST_FILE, named.artifact.package.as_bytes()),
    ] {
        writer
            .start_file(entry, options)
            .and_then(|_| writer.write_all(data).map_err(ZipError::from))
            .map_err(|source| ArtifactError::ArchiveWrite {
                artifact: named.name.clone(),
                entry: entry.to_string(),
                source,
            })?;
    }

    let bytes = writer
        .finish()
        .map_err(|source| ArtifactError::ArchiveFinish {
            artifact: named.name.clone(),
            source,
        })?
        .into_inner();

    debug!(artifact = %named.name, size = bytes.len(), "Packaged artifact");

    Ok(PackagedArtifact {
        file_name: archive_file_name(&named.name),
        name: named.name.clone(),
        bytes,
    })
}

/// Package every artifact, preserving order
pub fn package_artifacts(artifacts: &[NamedArtifact]) -> ArtifactResult<Vec<PackagedArtifact>> {
    artifacts.iter().map(package_artifact).collect()
}
