use crate::{playlists, videos};
use async_trait::async_trait;
use reel_core::{catalog::CatalogStore, error::Result, types::*};
use sqlx::SqlitePool;

/// `SQLite` catalog bound to one owner scope
///
/// The scope is fixed at construction and threaded into every query; there
/// is no process-wide current identity.
pub struct SqliteCatalog {
    pool: SqlitePool,
    owner: OwnerScope,
}

impl SqliteCatalog {
    /// Create a catalog context for the given owner scope
    pub fn new(pool: SqlitePool, owner: OwnerScope) -> Self {
        Self { pool, owner }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    fn owner(&self) -> OwnerScope {
        self.owner.clone()
    }

    // Videos

    async fn insert_video(&self, video: &Video) -> Result<()> {
        videos::insert(&self.pool, video).await
    }

    async fn get_video(&self, id: &VideoId) -> Result<Option<Video>> {
        videos::get_by_id(&self.pool, &self.owner, id).await
    }

    async fn find_video_by_hash(&self, content_hash: &str) -> Result<Option<Video>> {
        videos::find_by_content_hash(&self.pool, &self.owner, content_hash).await
    }

    async fn find_video_by_url(&self, url: &str) -> Result<Option<Video>> {
        videos::find_by_external_url(&self.pool, &self.owner, url).await
    }

    async fn video_title_exists(&self, title: &str) -> Result<bool> {
        videos::title_exists(&self.pool, &self.owner, title).await
    }

    async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>> {
        videos::list(&self.pool, &self.owner, filter).await
    }

    async fn delete_video(&self, id: &VideoId) -> Result<Video> {
        videos::delete(&self.pool, &self.owner, id).await
    }

    // Playlists

    async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        playlists::create(&self.pool, &self.owner, name).await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        playlists::list(&self.pool, &self.owner).await
    }

    async fn get_playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, &self.owner, id).await
    }

    async fn add_playlist_item(&self, playlist_id: &PlaylistId, video_id: &VideoId) -> Result<()> {
        playlists::add_item(&self.pool, &self.owner, playlist_id, video_id).await
    }

    async fn remove_playlist_item(
        &self,
        playlist_id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<()> {
        playlists::remove_item(&self.pool, &self.owner, playlist_id, video_id).await
    }

    async fn list_playlist_items(&self, playlist_id: &PlaylistId) -> Result<Vec<PlaylistEntry>> {
        playlists::list_items(&self.pool, &self.owner, playlist_id).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, &self.owner, id).await
    }
}
