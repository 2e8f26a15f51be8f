/// Video domain types
use crate::types::{OwnerScope, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a video's content lives
///
/// Exactly one variant is populated per video, mirroring the invariant that
/// a catalog entry is either a managed local file (filename + content hash)
/// or an external link, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sourceType", rename_all = "lowercase")]
pub enum VideoSource {
    /// File stored in the managed directory
    Local {
        /// Store-relative, system-generated filename (never the original name)
        filename: String,
        /// SHA-256 digest of the file bytes, the dedupe key
        #[serde(rename = "contentHash")]
        content_hash: String,
        /// Best-effort MIME type guessed at import
        #[serde(rename = "mimeType")]
        mime_type: String,
        /// Size of the stored file in bytes
        #[serde(rename = "byteSize")]
        byte_size: i64,
    },
    /// Externally hosted video, referenced by URL
    External {
        /// Normalized http/https URL
        #[serde(rename = "externalUrl")]
        url: String,
        /// Optional provider label, e.g. "youtube"
        provider: Option<String>,
    },
}

/// Source discriminant, used for list filters and persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Managed local file
    Local,
    /// External link
    External,
}

impl SourceKind {
    /// Convert kind to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Local => "local",
            SourceKind::External => "external",
        }
    }

    /// Parse kind from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "local" => Some(SourceKind::Local),
            "external" => Some(SourceKind::External),
            _ => None,
        }
    }
}

/// Catalog entry for a local or externally-linked video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Unique video identifier
    pub id: VideoId,

    /// Owner scope this video belongs to
    pub owner: OwnerScope,

    /// Display title, unique within the owner scope
    pub title: String,

    /// Content location
    #[serde(flatten)]
    pub source: VideoSource,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a new locally-stored video entry
    pub fn new_local(
        owner: OwnerScope,
        title: impl Into<String>,
        filename: impl Into<String>,
        content_hash: impl Into<String>,
        mime_type: impl Into<String>,
        byte_size: i64,
    ) -> Self {
        Self {
            id: VideoId::generate(),
            owner,
            title: title.into(),
            source: VideoSource::Local {
                filename: filename.into(),
                content_hash: content_hash.into(),
                mime_type: mime_type.into(),
                byte_size,
            },
            created_at: Utc::now(),
        }
    }

    /// Create a new externally-linked video entry
    pub fn new_external(
        owner: OwnerScope,
        title: impl Into<String>,
        url: impl Into<String>,
        provider: Option<String>,
    ) -> Self {
        Self {
            id: VideoId::generate(),
            owner,
            title: title.into(),
            source: VideoSource::External {
                url: url.into(),
                provider,
            },
            created_at: Utc::now(),
        }
    }

    /// Create a video with a specific ID (for database loading)
    pub fn with_id(
        id: VideoId,
        owner: OwnerScope,
        title: impl Into<String>,
        source: VideoSource,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            title: title.into(),
            source,
            created_at,
        }
    }

    /// Source discriminant for this entry
    pub fn kind(&self) -> SourceKind {
        match self.source {
            VideoSource::Local { .. } => SourceKind::Local,
            VideoSource::External { .. } => SourceKind::External,
        }
    }

    /// Whether the content is a managed local file
    pub fn is_local(&self) -> bool {
        matches!(self.source, VideoSource::Local { .. })
    }

    /// Store-relative filename, for local videos
    pub fn filename(&self) -> Option<&str> {
        match &self.source {
            VideoSource::Local { filename, .. } => Some(filename),
            VideoSource::External { .. } => None,
        }
    }

    /// Content hash, for local videos
    pub fn content_hash(&self) -> Option<&str> {
        match &self.source {
            VideoSource::Local { content_hash, .. } => Some(content_hash),
            VideoSource::External { .. } => None,
        }
    }

    /// External URL, for linked videos
    pub fn external_url(&self) -> Option<&str> {
        match &self.source {
            VideoSource::Local { .. } => None,
            VideoSource::External { url, .. } => Some(url),
        }
    }
}

/// Optional filters for catalog listings
///
/// Listings are always newest-first; filters narrow by source kind and
/// title substring only (no further indexing is in scope).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFilter {
    /// Restrict to one source kind
    pub kind: Option<SourceKind>,
    /// Case-sensitive title substring
    pub title_contains: Option<String>,
}

impl VideoFilter {
    /// Filter by source kind
    pub fn kind(kind: SourceKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Filter by title substring
    pub fn title_contains(needle: impl Into<String>) -> Self {
        Self {
            title_contains: Some(needle.into()),
            ..Self::default()
        }
    }
}
