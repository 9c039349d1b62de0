//! Upload validation rules shared by the upload endpoint and the client-side
//! upload session.

use rand::{distr::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// 3 GiB.
pub const DEFAULT_MAX_SIZE: u64 = 3 * 1024 * 1024 * 1024;

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// What the validation rules look at. Content is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub media_type: String,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            media_type: media_type.into(),
        }
    }
}

/// Limits a file has to satisfy. An empty `allowed_types` accepts any media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConstraint {
    pub max_size: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadConstraint {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            allowed_types: Vec::new(),
        }
    }
}

impl UploadConstraint {
    pub fn new(max_size: u64) -> Self {
        Self {
            max_size,
            allowed_types: Vec::new(),
        }
    }

    pub fn with_allowed_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Caps the size limit, keeping the tighter of the two.
    pub fn capped_at(mut self, max_size: u64) -> Self {
        self.max_size = self.max_size.min(max_size);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("File size exceeds the maximum allowed size ({})", format_bytes(*max_size))]
    TooLarge { size: u64, max_size: u64 },
    #[error("Invalid file type. Allowed types: {}", allowed.join(", "))]
    UnsupportedType { media_type: String, allowed: Vec<String> },
}

/// Size is checked first; the type check only applies when a type list was given.
pub fn validate(file: &FileInfo, constraint: &UploadConstraint) -> Result<(), Rejection> {
    if file.size > constraint.max_size {
        return Err(Rejection::TooLarge {
            size: file.size,
            max_size: constraint.max_size,
        });
    }

    if !constraint.allowed_types.is_empty()
        && !constraint.allowed_types.iter().any(|t| t == &file.media_type)
    {
        return Err(Rejection::UnsupportedType {
            media_type: file.media_type.clone(),
            allowed: constraint.allowed_types.clone(),
        });
    }

    Ok(())
}

/// Renders a byte count in the largest fitting unit at 1024 scale, two decimals at most.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Destination bucket of an upload, which also decides its default limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Movie,
    Trailer,
    Thumbnail,
}

impl UploadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadKind::Movie => "movie",
            UploadKind::Trailer => "trailer",
            UploadKind::Thumbnail => "thumbnail",
        }
    }

    pub fn directory(&self) -> &'static str {
        match self {
            UploadKind::Movie => "movies",
            UploadKind::Trailer => "trailers",
            UploadKind::Thumbnail => "thumbnails",
        }
    }

    pub fn constraint(&self) -> UploadConstraint {
        match self {
            UploadKind::Movie => UploadConstraint::new(DEFAULT_MAX_SIZE).with_allowed_types([
                "video/mp4",
                "video/quicktime",
                "video/x-msvideo",
                "video/webm",
            ]),
            UploadKind::Trailer => UploadConstraint::new(500 * 1024 * 1024)
                .with_allowed_types(["video/mp4", "video/quicktime", "video/webm"]),
            UploadKind::Thumbnail => UploadConstraint::new(10 * 1024 * 1024)
                .with_allowed_types(["image/jpeg", "image/png", "image/webp"]),
        }
    }
}

impl fmt::Display for UploadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UploadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Ok(UploadKind::Movie),
            "trailer" => Ok(UploadKind::Trailer),
            "thumbnail" => Ok(UploadKind::Thumbnail),
            other => Err(format!("Unknown upload kind: {}", other)),
        }
    }
}

/// `<unix-millis>-<8 random chars>.<ext>`, keeping the original extension.
pub fn generate_unique_filename(original: &str) -> String {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let random: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    match Path::new(original).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{}-{}.{}", millis, random, ext),
        None => format!("{}-{}", millis, random),
    }
}

/// Where the upload endpoint reports a stored file to live.
pub fn simulated_url(kind: UploadKind, filename: &str) -> String {
    format!("/uploads/{}/{}", kind.directory(), filename)
}
