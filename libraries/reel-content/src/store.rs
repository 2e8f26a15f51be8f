//! Managed directory storage
//!
//! Copies land in a temp file inside the managed directory and are renamed
//! into place only after the full content hash is known, so a crash or a
//! cancelled import can leave at worst a temp file that its guard removes,
//! never a half-written store entry.

use crate::error::{ContentError, Result};
use crate::hash::{sha256_file, BUFFER_SIZE};
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Identity of a stored file, as referenced by catalog rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// Store-relative, system-generated filename
    pub filename: String,
    /// SHA-256 hash of the stored bytes
    pub content_hash: String,
    /// Size of the stored file in bytes
    pub byte_size: i64,
}

/// A fully-copied, fully-hashed file that has not yet entered the store
///
/// Dropping a staged file before calling [`StagedFile::persist`] removes
/// the underlying temp copy.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    dest: PathBuf,
    filename: String,
    content_hash: String,
    byte_size: i64,
}

impl StagedFile {
    /// Generated filename the file will be stored under
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Content hash computed during the copy
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Number of bytes copied
    pub fn byte_size(&self) -> i64 {
        self.byte_size
    }

    /// Atomically rename the staged copy into the managed directory
    pub fn persist(self) -> Result<ContentRecord> {
        self.temp
            .persist(&self.dest)
            .map_err(|err| ContentError::Io(err.error))?;

        info!("stored {} ({} bytes)", self.filename, self.byte_size);

        Ok(ContentRecord {
            filename: self.filename,
            content_hash: self.content_hash,
            byte_size: self.byte_size,
        })
    }
}

/// Exclusive owner of the managed media directory
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Open (creating if needed) a store over the given directory
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The managed directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compute the content hash of an arbitrary source file
    ///
    /// Runs on a blocking worker; the caller suspends. Used for the
    /// hash-first dedupe probe, before any copy is attempted.
    pub async fn hash_file(&self, source: &Path) -> Result<String> {
        let source = source.to_path_buf();
        tokio::task::spawn_blocking(move || sha256_file(&source))
            .await
            .map_err(|err| ContentError::Unknown(err.to_string()))?
    }

    /// Copy a source file into a staged temp file, hashing in the same pass
    ///
    /// The returned [`StagedFile`] carries the final generated filename and
    /// hash; nothing is visible in the store until it is persisted.
    pub async fn stage(&self, source: &Path) -> Result<StagedFile> {
        let root = self.root.clone();
        let source = source.to_path_buf();
        tokio::task::spawn_blocking(move || stage_blocking(&root, &source))
            .await
            .map_err(|err| ContentError::Unknown(err.to_string()))?
    }

    /// Whether a stored file is present on disk
    ///
    /// Used to report "missing" status for files moved or deleted outside
    /// the system. Invalid names probe as absent.
    pub fn exists(&self, filename: &str) -> bool {
        match self.entry_path(filename) {
            Ok(path) => path.exists(),
            Err(_) => false,
        }
    }

    /// Best-effort unlink of a stored file
    ///
    /// Catalog deletion has already committed by the time this runs; a
    /// failure here is logged and swallowed, never propagated.
    pub fn delete(&self, filename: &str) {
        let path = match self.entry_path(filename) {
            Ok(path) => path,
            Err(err) => {
                warn!("refusing to delete invalid store filename: {err}");
                return;
            }
        };

        match fs::remove_file(&path) {
            Ok(()) => debug!("unlinked {}", filename),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("{} already absent", filename);
            }
            Err(err) => warn!("failed to unlink {}: {err}", filename),
        }
    }

    /// Resolve a stored filename to its on-disk path
    ///
    /// This is the trust boundary: only the process-local playback
    /// collaborator (via the resolver's capability handles) may call it.
    /// Fails if the name is invalid or the file is absent.
    pub fn open(&self, filename: &str) -> Result<PathBuf> {
        let path = self.entry_path(filename)?;
        if !path.exists() {
            return Err(ContentError::Missing(filename.to_string()));
        }
        Ok(path)
    }

    fn entry_path(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.root.join(filename))
    }
}

/// Best-effort MIME type from the source extension
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}

// Helper functions

fn stage_blocking(root: &Path, source: &Path) -> Result<StagedFile> {
    let file = File::open(source)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut temp = NamedTempFile::new_in(root)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];
    let mut byte_size: u64 = 0;

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        temp.write_all(&buffer[..bytes_read])?;
        byte_size += bytes_read as u64;
    }

    temp.flush()?;
    temp.as_file().sync_all()?;

    let content_hash = hex::encode(hasher.finalize());
    let filename = generated_filename(source);
    let dest = root.join(&filename);

    debug!(
        "staged {:?} as {} ({} bytes)",
        source.file_name(),
        filename,
        byte_size
    );

    Ok(StagedFile {
        temp,
        dest,
        filename,
        content_hash,
        byte_size: byte_size as i64,
    })
}

/// Opaque store filename: random identity plus the source extension, never
/// the original name
fn generated_filename(source: &Path) -> String {
    let id = Uuid::new_v4().simple().to_string();
    match source.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext.to_ascii_lowercase()),
        _ => id,
    }
}

fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty()
        || filename.starts_with('.')
        || filename.contains(['/', '\\'])
        || filename.contains("..")
    {
        return Err(ContentError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_filename_keeps_extension_only() {
        let name = generated_filename(Path::new("/tmp/My Holiday Video.MP4"));
        assert!(name.ends_with(".mp4"));
        assert!(!name.contains("Holiday"));
    }

    #[test]
    fn generated_filename_without_extension() {
        let name = generated_filename(Path::new("/tmp/raw_dump"));
        assert!(!name.contains('.'));
    }

    #[test]
    fn filename_validation_rejects_traversal() {
        assert!(validate_filename("abc123.mp4").is_ok());
        assert!(validate_filename("../etc/passwd").is_err());
        assert!(validate_filename("a/b.mp4").is_err());
        assert!(validate_filename("a\\b.mp4").is_err());
        assert!(validate_filename(".hidden").is_err());
        assert!(validate_filename("").is_err());
    }

    #[test]
    fn mime_guess_by_extension() {
        assert_eq!(guess_mime_type(Path::new("a.mp4")), "video/mp4");
        assert_eq!(guess_mime_type(Path::new("a.MOV")), "video/quicktime");
        assert_eq!(guess_mime_type(Path::new("a.webm")), "video/webm");
        assert_eq!(guess_mime_type(Path::new("a.txt")), "application/octet-stream");
        assert_eq!(guess_mime_type(Path::new("noext")), "application/octet-stream");
    }
}
