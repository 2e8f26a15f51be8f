use chrono::DateTime;
use reel_core::{error::Result, types::*, ReelError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::is_unique_violation;

/// Insert a fully-populated video row
///
/// The three uniqueness constraints (owner+title, content hash, external
/// URL) are enforced by the schema; violations surface as `Conflict`.
pub async fn insert(pool: &SqlitePool, video: &Video) -> Result<()> {
    let (filename, content_hash, mime_type, byte_size, external_url, provider) =
        match &video.source {
            VideoSource::Local {
                filename,
                content_hash,
                mime_type,
                byte_size,
            } => (
                Some(filename.as_str()),
                Some(content_hash.as_str()),
                Some(mime_type.as_str()),
                Some(*byte_size),
                None,
                None,
            ),
            VideoSource::External { url, provider } => (
                None,
                None,
                None,
                None,
                Some(url.as_str()),
                provider.as_deref(),
            ),
        };

    let result = sqlx::query(
        r#"
        INSERT INTO videos
            (id, owner_id, title, filename, content_hash, source_type,
             external_url, provider, mime_type, byte_size, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(video.id.as_str())
    .bind(video.owner.as_str())
    .bind(&video.title)
    .bind(filename)
    .bind(content_hash)
    .bind(video.kind().as_str())
    .bind(external_url)
    .bind(provider)
    .bind(mime_type)
    .bind(byte_size)
    .bind(video.created_at.timestamp())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(()),
        Err(err) if is_unique_violation(&err) => Err(unique_conflict(&err)),
        Err(err) => Err(err.into()),
    }
}

/// Get video by ID within the owner scope
pub async fn get_by_id(
    pool: &SqlitePool,
    owner: &OwnerScope,
    id: &VideoId,
) -> Result<Option<Video>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, title, filename, content_hash, source_type,
               external_url, provider, mime_type, byte_size, created_at
        FROM videos
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id.as_str())
    .bind(owner.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(video_from_row).transpose()
}

/// Find a local video by content hash within the owner scope
///
/// A hit here is the benign dedupe path, not an error.
pub async fn find_by_content_hash(
    pool: &SqlitePool,
    owner: &OwnerScope,
    content_hash: &str,
) -> Result<Option<Video>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, title, filename, content_hash, source_type,
               external_url, provider, mime_type, byte_size, created_at
        FROM videos
        WHERE content_hash = ? AND owner_id = ?
        LIMIT 1
        "#,
    )
    .bind(content_hash)
    .bind(owner.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(video_from_row).transpose()
}

/// Find an external video by exact normalized URL within the owner scope
pub async fn find_by_external_url(
    pool: &SqlitePool,
    owner: &OwnerScope,
    url: &str,
) -> Result<Option<Video>> {
    let row = sqlx::query(
        r#"
        SELECT id, owner_id, title, filename, content_hash, source_type,
               external_url, provider, mime_type, byte_size, created_at
        FROM videos
        WHERE external_url = ? AND owner_id = ?
        LIMIT 1
        "#,
    )
    .bind(url)
    .bind(owner.as_str())
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(video_from_row).transpose()
}

/// Whether a video with this exact title exists in the owner scope
pub async fn title_exists(pool: &SqlitePool, owner: &OwnerScope, title: &str) -> Result<bool> {
    let row = sqlx::query(
        "SELECT EXISTS(SELECT 1 FROM videos WHERE owner_id = ? AND title = ?) AS found",
    )
    .bind(owner.as_str())
    .bind(title)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>("found") != 0)
}

/// List videos matching the filter, newest first
pub async fn list(
    pool: &SqlitePool,
    owner: &OwnerScope,
    filter: &VideoFilter,
) -> Result<Vec<Video>> {
    let mut sql = String::from(
        "SELECT id, owner_id, title, filename, content_hash, source_type, \
         external_url, provider, mime_type, byte_size, created_at \
         FROM videos WHERE owner_id = ?",
    );
    if filter.kind.is_some() {
        sql.push_str(" AND source_type = ?");
    }
    if filter.title_contains.is_some() {
        sql.push_str(" AND title LIKE ?");
    }
    sql.push_str(" ORDER BY created_at DESC, rowid DESC");

    let mut query = sqlx::query(&sql).bind(owner.as_str());
    if let Some(kind) = filter.kind {
        query = query.bind(kind.as_str());
    }
    if let Some(needle) = &filter.title_contains {
        query = query.bind(format!("%{}%", needle));
    }

    let rows = query.fetch_all(pool).await?;

    rows.iter().map(video_from_row).collect()
}

/// Delete a video and every membership referencing it, in one transaction
///
/// Returns the deleted row so the caller can release the backing file once
/// the commit has gone through. Metadata is deleted before any file is
/// touched; a crash between commit and unlink leaves at worst an orphan
/// file, never a dangling row.
pub async fn delete(pool: &SqlitePool, owner: &OwnerScope, id: &VideoId) -> Result<Video> {
    let video = get_by_id(pool, owner, id)
        .await?
        .ok_or_else(|| ReelError::not_found("Video", id.as_str()))?;

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM playlist_items WHERE video_id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM videos WHERE id = ?")
        .bind(id.as_str())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(video)
}

// Helper functions

pub(crate) fn video_from_row(row: &SqliteRow) -> Result<Video> {
    let source_type: String = row.get("source_type");

    let source = match source_type.as_str() {
        "local" => VideoSource::Local {
            filename: row
                .get::<Option<String>, _>("filename")
                .ok_or_else(|| ReelError::storage("local video row missing filename"))?,
            content_hash: row
                .get::<Option<String>, _>("content_hash")
                .ok_or_else(|| ReelError::storage("local video row missing content_hash"))?,
            mime_type: row
                .get::<Option<String>, _>("mime_type")
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            byte_size: row.get::<Option<i64>, _>("byte_size").unwrap_or(0),
        },
        "external" => VideoSource::External {
            url: row
                .get::<Option<String>, _>("external_url")
                .ok_or_else(|| ReelError::storage("external video row missing external_url"))?,
            provider: row.get("provider"),
        },
        other => {
            return Err(ReelError::storage(format!("invalid source_type: {other}")));
        }
    };

    Ok(Video::with_id(
        VideoId::new(row.get::<String, _>("id")),
        OwnerScope::new(row.get::<String, _>("owner_id")),
        row.get::<String, _>("title"),
        source,
        DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
            .ok_or_else(|| ReelError::storage("invalid timestamp"))?,
    ))
}

fn unique_conflict(err: &sqlx::Error) -> ReelError {
    let message = match err {
        sqlx::Error::Database(db) => db.message().to_string(),
        _ => String::new(),
    };

    if message.contains("content_hash") {
        ReelError::conflict("content already stored")
    } else if message.contains("external_url") {
        ReelError::conflict("external URL already registered")
    } else {
        ReelError::conflict("a video with this title already exists")
    }
}
