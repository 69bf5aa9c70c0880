//! Managed item definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Store-assigned identifier of an item
pub type ItemId = i64;

/// Container/codec family of a media file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Mp3,
    Flac,
    Ogg,
    Unknown,
}

impl MediaType {
    /// Every recognized media type, in a stable order
    pub const KNOWN: [Self; 3] = [Self::Mp3, Self::Flac, Self::Ogg];

    /// Derive the media type from a file extension (case-insensitive)
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Self::Mp3,
            "flac" => Self::Flac,
            "ogg" | "oga" | "opus" => Self::Ogg,
            _ => Self::Unknown,
        }
    }

    /// Derive the media type from a path
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Parse the stored/display name back into a media type
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "ogg" => Some(Self::Ogg),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file under management
///
/// The store owns path and media type; verification only ever reads them and
/// touches the `checksum` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub path: PathBuf,
    pub media_type: MediaType,
    /// Hex-encoded digest, if one has been recorded
    pub checksum: Option<String>,
}

impl Item {
    /// Create an item without a stored checksum, deriving its media type
    pub fn new(id: ItemId, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = MediaType::from_path(&path);
        Self {
            id,
            path,
            media_type,
            checksum: None,
        }
    }

    /// Attach a stored checksum
    #[must_use]
    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    #[must_use]
    pub fn has_checksum(&self) -> bool {
        self.checksum.is_some()
    }
}
