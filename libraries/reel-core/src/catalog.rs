//! Catalog storage trait
//!
//! The original system shipped two parallel storage backends (a
//! document-oriented one and a relational one) with the business rules
//! duplicated in each. Here the logical model is defined once: backends
//! implement this trait, callers never see which engine is underneath.

use crate::error::Result;
use crate::types::{
    OwnerScope, Playlist, PlaylistEntry, PlaylistId, Video, VideoFilter, VideoId,
};
use async_trait::async_trait;

/// Catalog context bound to a single owner scope
///
/// Every operation is implicitly filtered by the scope the context was
/// created with; an ownership mismatch is indistinguishable from the row
/// not existing. Implementations must make the documented multi-row
/// operations atomic (see the individual methods).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Owner scope this context operates under
    fn owner(&self) -> OwnerScope;

    // ========================================================================
    // Videos
    // ========================================================================

    /// Insert a fully-populated video row
    ///
    /// Fails with `Conflict` on duplicate title, content hash, or external
    /// URL (the three uniqueness constraints are independent).
    async fn insert_video(&self, video: &Video) -> Result<()>;

    /// Get a video by ID within the owner scope
    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>>;

    /// Find a local video by content hash within the owner scope
    async fn find_video_by_hash(&self, content_hash: &str) -> Result<Option<Video>>;

    /// Find an external video by exact normalized URL within the owner scope
    async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>>;

    /// Whether a video with this exact title exists in the owner scope
    async fn video_title_exists(&self, title: &str) -> Result<bool>;

    /// List videos matching the filter, newest first
    async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>>;

    /// Delete a video and all playlist memberships referencing it, in one
    /// transaction; returns the deleted row so the caller can release the
    /// backing file afterwards
    ///
    /// Fails with `NotFound` if the video is absent or owned by another
    /// scope.
    async fn delete_video(&self, id: &VideoId) -> Result<Video>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a playlist; fails with `Conflict` if the name is taken in
    /// this scope
    async fn create_playlist(&self, name: &str) -> Result<Playlist>;

    /// List the scope's playlists, newest first
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Get a playlist by ID within the owner scope
    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>>;

    /// Add a video to a playlist at the next free position
    ///
    /// `NotFound` if either entity is absent or in another scope. An
    /// existing membership is an idempotent success. Position assignment
    /// (max + 1, or 0 for an empty playlist) must be atomic per playlist.
    async fn add_playlist_item(&self, playlist_id: &PlaylistId, video_id: &VideoId) -> Result<()>;

    /// Remove a membership edge; remaining positions are not renumbered
    async fn remove_playlist_item(
        &self,
        playlist_id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<()>;

    /// List playlist entries joined with their videos, by position ascending
    async fn list_playlist_items(&self, playlist_id: &PlaylistId) -> Result<Vec<PlaylistEntry>>;

    /// Delete a playlist and all its membership rows in one transaction
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;
}
