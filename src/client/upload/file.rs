use crate::client::error::ClientError;
use crate::common::upload::FileInfo;
use bytes::Bytes;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Bytes(Bytes),
}

/// A file picked for upload but not yet confirmed stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub info: FileInfo,
    pub source: FileSource,
}

impl CandidateFile {
    /// Reads the size from disk and guesses the media type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(ClientError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            )));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let media_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();

        Ok(Self {
            info: FileInfo::new(name, metadata.len(), media_type),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn from_bytes(name: impl Into<String>, media_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            info: FileInfo::new(name, bytes.len() as u64, media_type),
            source: FileSource::Bytes(bytes),
        }
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn size(&self) -> u64 {
        self.info.size
    }
}
