use chrono::{DateTime, Utc};
use reel_core::{error::Result, types::*, ReelError};
use sqlx::{Row, SqlitePool};

use crate::is_unique_violation;
use crate::videos::video_from_row;

/// Create a new playlist
pub async fn create(pool: &SqlitePool, owner: &OwnerScope, name: &str) -> Result<Playlist> {
    let playlist = Playlist::new(owner.clone(), name);

    let result = sqlx::query(
        "INSERT INTO playlists (id, owner_id, name, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(playlist.id.as_str())
    .bind(owner.as_str())
    .bind(&playlist.name)
    .bind(playlist.created_at.timestamp())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(playlist),
        Err(err) if is_unique_violation(&err) => {
            Err(ReelError::conflict("playlist name already exists"))
        }
        Err(err) => Err(err.into()),
    }
}

/// Get playlist by ID within the owner scope
pub async fn get_by_id(
    pool: &SqlitePool,
    owner: &OwnerScope,
    id: &PlaylistId,
) -> Result<Option<Playlist>> {
    let row = sqlx::query(
        "SELECT id, owner_id, name, created_at FROM playlists WHERE id = ? AND owner_id = ?",
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(|row| {
        Ok(Playlist::with_id(
            PlaylistId::new(row.get::<String, _>("id")),
            OwnerScope::new(row.get::<String, _>("owner_id")),
            row.get::<String, _>("name"),
            DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
                .ok_or_else(|| ReelError::storage("invalid timestamp"))?,
        ))
    })
    .transpose()
}

/// List the owner's playlists, newest first
pub async fn list(pool: &SqlitePool, owner: &OwnerScope) -> Result<Vec<Playlist>> {
    let rows = sqlx::query(
        r#"
        SELECT id, owner_id, name, created_at
        FROM playlists
        WHERE owner_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(owner.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Playlist::with_id(
                PlaylistId::new(row.get::<String, _>("id")),
                OwnerScope::new(row.get::<String, _>("owner_id")),
                row.get::<String, _>("name"),
                DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
                    .ok_or_else(|| ReelError::storage("invalid timestamp"))?,
            ))
        })
        .collect()
}

/// Add a video to a playlist at the next free position
///
/// Both entities must exist in the owner scope; a scope mismatch reads the
/// same as not-found. An existing membership is an idempotent success.
/// Position assignment and the insert are one SQL statement, so two
/// concurrent adds on the same playlist cannot compute the same position.
pub async fn add_item(
    pool: &SqlitePool,
    owner: &OwnerScope,
    playlist_id: &PlaylistId,
    video_id: &VideoId,
) -> Result<()> {
    ensure_playlist_in_scope(pool, owner, playlist_id).await?;

    let video_found = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM videos WHERE id = ? AND owner_id = ?) AS found",
    )
    .bind(video_id.as_str())
    .bind(owner.as_str())
    .fetch_one(pool)
    .await?;
    if video_found.get::<i64, _>("found") == 0 {
        return Err(ReelError::not_found("Video", video_id.as_str()));
    }

    sqlx::query(
        r#"
        INSERT INTO playlist_items (playlist_id, video_id, position, added_at)
        SELECT ?, ?, COALESCE(MAX(position), -1) + 1, ?
        FROM playlist_items
        WHERE playlist_id = ?
        ON CONFLICT(playlist_id, video_id) DO NOTHING
        "#,
    )
    .bind(playlist_id.as_str())
    .bind(video_id.as_str())
    .bind(Utc::now().timestamp())
    .bind(playlist_id.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove a membership edge
///
/// Remaining positions are not renumbered; gaps are permitted and only
/// relative order is meaningful.
pub async fn remove_item(
    pool: &SqlitePool,
    owner: &OwnerScope,
    playlist_id: &PlaylistId,
    video_id: &VideoId,
) -> Result<()> {
    ensure_playlist_in_scope(pool, owner, playlist_id).await?;

    sqlx::query("DELETE FROM playlist_items WHERE playlist_id = ? AND video_id = ?")
        .bind(playlist_id.as_str())
        .bind(video_id.as_str())
        .execute(pool)
        .await?;

    Ok(())
}

/// List playlist entries joined with their videos, by position ascending
pub async fn list_items(
    pool: &SqlitePool,
    owner: &OwnerScope,
    playlist_id: &PlaylistId,
) -> Result<Vec<PlaylistEntry>> {
    ensure_playlist_in_scope(pool, owner, playlist_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT
            v.id, v.owner_id, v.title, v.filename, v.content_hash, v.source_type,
            v.external_url, v.provider, v.mime_type, v.byte_size, v.created_at,
            pi.position, pi.added_at
        FROM playlist_items pi
        JOIN videos v ON v.id = pi.video_id
        WHERE pi.playlist_id = ?
        ORDER BY pi.position ASC
        "#,
    )
    .bind(playlist_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(PlaylistEntry {
                video: video_from_row(row)?,
                position: row.get::<i64, _>("position"),
                added_at: DateTime::from_timestamp(row.get::<i64, _>("added_at"), 0)
                    .ok_or_else(|| ReelError::storage("invalid timestamp"))?,
            })
        })
        .collect()
}

/// Delete a playlist and all its membership rows in one transaction
pub async fn delete(pool: &SqlitePool, owner: &OwnerScope, id: &PlaylistId) -> Result<()> {
    ensure_playlist_in_scope(pool, owner, id).await?;

    let mut tx = pool.begin().await?;

    // Cascade would cover this too; the explicit delete keeps the
    // transaction self-describing and engine-agnostic.
    sqlx::query("DELETE FROM playlist_items WHERE playlist_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(())
}

// Helper functions

async fn ensure_playlist_in_scope(
    pool: &SqlitePool,
    owner: &OwnerScope,
    id: &PlaylistId,
) -> Result<()> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM playlists WHERE id = ? AND owner_id = ?) AS found",
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .fetch_one(pool)
    .await?;

    if row.get::<i64, _>("found") == 0 {
        return Err(ReelError::not_found("Playlist", id.as_str()));
    }

    Ok(())
}
