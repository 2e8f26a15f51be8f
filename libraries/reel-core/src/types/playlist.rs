/// Playlist domain types
use crate::types::{OwnerScope, PlaylistId, Video, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named, ordered collection of videos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Owner scope this playlist belongs to
    pub owner: OwnerScope,

    /// Playlist name, unique within the owner scope
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new playlist
    pub fn new(owner: OwnerScope, name: impl Into<String>) -> Self {
        Self {
            id: PlaylistId::generate(),
            owner,
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Create a playlist with a specific ID (for database loading)
    pub fn with_id(
        id: PlaylistId,
        owner: OwnerScope,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            name: name.into(),
            created_at,
        }
    }
}

/// Membership edge between a playlist and a video
///
/// Positions are assigned monotonically per playlist and are never reused
/// or renumbered; removal leaves gaps, only relative order is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Playlist ID
    pub playlist_id: PlaylistId,

    /// Video ID (reference only, never a copy of the video)
    pub video_id: VideoId,

    /// Position in the playlist (0-indexed, gaps permitted)
    pub position: i64,

    /// When the video was added to the playlist
    pub added_at: DateTime<Utc>,
}

/// A playlist entry joined with its video, as returned by listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// The referenced video
    pub video: Video,

    /// Position within the playlist
    pub position: i64,

    /// When the membership was created
    pub added_at: DateTime<Utc>,
}
