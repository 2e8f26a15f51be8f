//! Library orchestration
//!
//! Owns the cross-component rules: hash-first dedupe ordering on import,
//! copy-before-commit, catalog-before-unlink on removal.

use crate::resolver::validate_external_url;
use reel_content::{guess_mime_type, ContentStore};
use reel_core::{types::*, CatalogStore, ReelError, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Outcome of a register operation
///
/// `deduped` marks the benign path where the content (or URL) was already
/// known and the existing entry was returned; it is a success, not an
/// error.
#[derive(Debug, Clone)]
pub struct Registration {
    /// The registered (or pre-existing) video
    pub video: Video,
    /// Whether an existing entry was reused
    pub deduped: bool,
}

/// Media library bound to one owner scope
///
/// The scope comes from the catalog context; there is no process-wide
/// current identity.
pub struct Library {
    catalog: Arc<dyn CatalogStore>,
    content: ContentStore,
    // Serializes "dedupe check -> copy-if-new -> insert" so two concurrent
    // imports of identical content cannot both believe they are first.
    import_lock: Mutex<()>,
}

impl Library {
    /// Create a library over a catalog context and a content store
    pub fn new(catalog: Arc<dyn CatalogStore>, content: ContentStore) -> Self {
        Self {
            catalog,
            content,
            import_lock: Mutex::new(()),
        }
    }

    /// Owner scope this library operates under
    pub fn owner(&self) -> OwnerScope {
        self.catalog.owner()
    }

    /// The content store backing local imports
    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    // ========================================================================
    // Videos
    // ========================================================================

    /// Import a local file under the given title
    ///
    /// The hash is computed first, over a streaming read; a dedupe hit
    /// returns the existing entry before any copy is attempted. Title
    /// uniqueness is an independent constraint checked after dedupe, so a
    /// duplicate title fails with `Conflict` regardless of hash status.
    pub async fn import_local(&self, title: &str, source: &Path) -> Result<Registration> {
        let title = clean_title(title)?;

        // Hash first: a dedupe hit must cost no copy.
        let probed_hash = self.content.hash_file(source).await?;

        let _import = self.import_lock.lock().await;

        if let Some(existing) = self.catalog.find_video_by_hash(&probed_hash).await? {
            debug!("import of {:?} deduped onto video {}", title, existing.id);
            return Ok(Registration {
                video: existing,
                deduped: true,
            });
        }

        if self.catalog.video_title_exists(title).await? {
            return Err(ReelError::conflict("a video with this title already exists"));
        }

        let staged = self.content.stage(source).await?;
        if staged.content_hash() != probed_hash {
            // Source changed between probe and copy; the staged temp is
            // dropped here and nothing was committed.
            return Err(ReelError::internal("source file changed during import"));
        }

        let record = staged.persist()?;
        let video = Video::new_local(
            self.catalog.owner(),
            title,
            &record.filename,
            &record.content_hash,
            guess_mime_type(source),
            record.byte_size,
        );

        if let Err(err) = self.catalog.insert_video(&video).await {
            // The catalog never saw this file; take the copy back out.
            self.content.delete(&record.filename);
            return Err(err);
        }

        info!("imported {:?} as video {}", title, video.id);
        Ok(Registration {
            video,
            deduped: false,
        })
    }

    /// Register an externally hosted video by URL
    ///
    /// The URL must parse and be http/https. Dedupe is by exact normalized
    /// URL; a hit returns the existing entry.
    pub async fn register_external(
        &self,
        title: &str,
        url: &str,
        provider: Option<&str>,
    ) -> Result<Registration> {
        let title = clean_title(title)?;

        let url = url.trim();
        if url.is_empty() {
            return Err(ReelError::validation("externalUrl is required"));
        }
        let normalized = validate_external_url(url)?;
        let provider = provider
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from);

        let _import = self.import_lock.lock().await;

        if let Some(existing) = self.catalog.find_video_by_url(&normalized).await? {
            debug!("registration of {:?} deduped onto video {}", title, existing.id);
            return Ok(Registration {
                video: existing,
                deduped: true,
            });
        }

        if self.catalog.video_title_exists(title).await? {
            return Err(ReelError::conflict("a video with this title already exists"));
        }

        let video = Video::new_external(self.catalog.owner(), title, normalized, provider);
        self.catalog.insert_video(&video).await?;

        info!("registered external video {}", video.id);
        Ok(Registration {
            video,
            deduped: false,
        })
    }

    /// Remove a video; memberships cascade, then the file is released
    ///
    /// The catalog transaction commits before the unlink is requested, and
    /// the unlink itself is best-effort: a crash or a failed unlink leaves
    /// at worst an orphan file, never a dangling row. A video whose file is
    /// already missing removes cleanly.
    pub async fn remove_video(&self, id: &VideoId) -> Result<Video> {
        let video = self.catalog.delete_video(id).await?;

        if let Some(filename) = video.filename() {
            self.content.delete(filename);
        }

        info!("removed video {}", video.id);
        Ok(video)
    }

    /// Get a video by ID
    pub async fn get_video(&self, id: &VideoId) -> Result<Video> {
        self.catalog
            .get_video(id)
            .await?
            .ok_or_else(|| ReelError::not_found("Video", id.as_str()))
    }

    /// List videos matching the filter, newest first
    pub async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>> {
        self.catalog.list_videos(filter).await
    }

    /// Duplicate-title precheck used by import front-ends
    pub async fn video_exists(&self, title: &str) -> Result<bool> {
        let title = clean_title(title)?;
        self.catalog.video_title_exists(title).await
    }

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Create a playlist; `Conflict` if the name is taken in this scope
    pub async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ReelError::validation("name is required"));
        }
        self.catalog.create_playlist(name).await
    }

    /// List this scope's playlists, newest first
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        self.catalog.list_playlists().await
    }

    /// Get a playlist by ID
    pub async fn get_playlist(&self, id: &PlaylistId) -> Result<Playlist> {
        self.catalog
            .get_playlist(id)
            .await?
            .ok_or_else(|| ReelError::not_found("Playlist", id.as_str()))
    }

    /// Add a video to a playlist; idempotent for existing memberships
    pub async fn add_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<()> {
        self.catalog.add_playlist_item(playlist_id, video_id).await
    }

    /// Remove a video from a playlist; positions keep their gaps
    pub async fn remove_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        video_id: &VideoId,
    ) -> Result<()> {
        self.catalog
            .remove_playlist_item(playlist_id, video_id)
            .await
    }

    /// List a playlist's entries with their videos, by position ascending
    pub async fn playlist_items(&self, playlist_id: &PlaylistId) -> Result<Vec<PlaylistEntry>> {
        self.catalog.list_playlist_items(playlist_id).await
    }

    /// Delete a playlist and all its memberships
    pub async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        self.catalog.delete_playlist(id).await
    }
}

// Helper functions

fn clean_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ReelError::validation("title is required"));
    }
    Ok(title)
}
