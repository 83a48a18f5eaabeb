//! Binary media artifacts.

use derive_getters::Getters;
use std::path::Path;
use vitrine_error::{ArtifactError, ArtifactErrorKind};

/// An opaque binary payload plus the filename it was read from.
///
/// Artifacts are immutable once constructed. The byte size is always the
/// length of the payload, and neither the filename nor the payload may be
/// empty, so a fallback built from an artifact is never empty either.
///
/// # Examples
///
/// ```
/// use vitrine_core::MediaArtifact;
///
/// let artifact = MediaArtifact::new("brake-pad.png", vec![0x89, 0x50, 0x4E, 0x47]).unwrap();
/// assert_eq!(artifact.filename(), "brake-pad.png");
/// assert_eq!(artifact.size(), 4);
/// assert_eq!(artifact.content_type(), "image/png");
///
/// assert!(MediaArtifact::new("empty.png", Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct MediaArtifact {
    /// Filename the artifact is known by
    filename: String,
    /// Raw payload
    bytes: Vec<u8>,
}

impl MediaArtifact {
    /// Creates an artifact from a filename and its payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the filename or the payload is empty.
    #[track_caller]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<Self, ArtifactError> {
        let filename = filename.into();
        let bytes = bytes.into();

        if filename.trim().is_empty() {
            return Err(ArtifactError::new(ArtifactErrorKind::EmptyFilename));
        }
        if bytes.is_empty() {
            return Err(ArtifactError::new(ArtifactErrorKind::EmptyPayload(filename)));
        }

        Ok(Self { filename, bytes })
    }

    /// Reads an artifact from disk, named after the final path component.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has no filename, or is empty.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| ArtifactError::new(ArtifactErrorKind::EmptyFilename))?;

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ArtifactError::new(ArtifactErrorKind::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        Self::new(filename, bytes)
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// MIME type guessed from the filename extension.
    pub fn content_type(&self) -> &'static str {
        let extension = Path::new(&self.filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "application/octet-stream",
        }
    }

    /// Consumes the artifact, returning its payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
