//! Domain types for the Reel Vault media library

mod ids;
mod playlist;
mod video;

pub use ids::{OwnerScope, PlaylistId, VideoId};
pub use playlist::{Playlist, PlaylistEntry, PlaylistItem};
pub use video::{SourceKind, Video, VideoFilter, VideoSource};
