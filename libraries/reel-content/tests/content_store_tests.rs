//! Integration tests for the content store
//!
//! Exercises the stage/persist lifecycle, probe and delete semantics, and
//! the cancellation guarantee that unpersisted staging leaves no file.

use reel_content::ContentStore;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn create_source_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("Failed to create source file");
    file.write_all(content).expect("Failed to write source file");
    path
}

fn store_entries(store: &ContentStore) -> Vec<String> {
    fs::read_dir(store.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn stage_and_persist_round_trip() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path().join("media")).unwrap();

    let source = create_source_file(source_dir.path(), "clip.mp4", b"video bytes");

    let staged = store.stage(&source).await.unwrap();
    assert_eq!(staged.byte_size(), 11);
    assert!(staged.filename().ends_with(".mp4"));

    let record = staged.persist().unwrap();
    assert!(store.exists(&record.filename));
    assert_eq!(
        fs::read(store.root().join(&record.filename)).unwrap(),
        b"video bytes"
    );

    // Single-pass hash matches the standalone probe
    let probed = store.hash_file(&source).await.unwrap();
    assert_eq!(record.content_hash, probed);
}

#[tokio::test]
async fn staged_copy_never_uses_source_name() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path()).unwrap();

    let source = create_source_file(source_dir.path(), "My Vacation.mp4", b"data");
    let record = store.stage(&source).await.unwrap().persist().unwrap();

    assert!(!record.filename.contains("Vacation"));
    assert!(record.filename.ends_with(".mp4"));
}

#[tokio::test]
async fn dropping_staged_file_removes_partial_copy() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path().join("media")).unwrap();

    let source = create_source_file(source_dir.path(), "clip.mp4", b"abandoned import");

    let staged = store.stage(&source).await.unwrap();
    drop(staged);

    assert!(store_entries(&store).is_empty());
}

#[tokio::test]
async fn distinct_imports_of_same_bytes_hash_identically() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path()).unwrap();

    let a = create_source_file(source_dir.path(), "a.mp4", b"same bytes");
    let b = create_source_file(source_dir.path(), "b.mkv", b"same bytes");

    let record_a = store.stage(&a).await.unwrap().persist().unwrap();
    let record_b = store.stage(&b).await.unwrap().persist().unwrap();

    assert_eq!(record_a.content_hash, record_b.content_hash);
    // The store itself does not dedupe; that policy lives in the library
    assert_ne!(record_a.filename, record_b.filename);
}

#[tokio::test]
async fn exists_probes_without_exposing_paths() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path()).unwrap();

    let source = create_source_file(source_dir.path(), "clip.mp4", b"bytes");
    let record = store.stage(&source).await.unwrap().persist().unwrap();

    assert!(store.exists(&record.filename));
    assert!(!store.exists("nope.mp4"));

    // File removed behind the store's back reads as missing
    fs::remove_file(store.root().join(&record.filename)).unwrap();
    assert!(!store.exists(&record.filename));
}

#[tokio::test]
async fn probe_rejects_path_traversal() {
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path().join("media")).unwrap();

    let outside = create_source_file(store_dir.path(), "secret.txt", b"outside");
    assert!(outside.exists());

    assert!(!store.exists("../secret.txt"));
    assert!(store.open("../secret.txt").is_err());

    // Best-effort delete refuses to touch it too
    store.delete("../secret.txt");
    assert!(outside.exists());
}

#[tokio::test]
async fn delete_is_best_effort() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path()).unwrap();

    let source = create_source_file(source_dir.path(), "clip.mp4", b"bytes");
    let record = store.stage(&source).await.unwrap().persist().unwrap();

    store.delete(&record.filename);
    assert!(!store.exists(&record.filename));

    // Deleting again (already gone) must not fail
    store.delete(&record.filename);
}

#[tokio::test]
async fn open_resolves_live_entries_only() {
    let source_dir = TempDir::new().unwrap();
    let store_dir = TempDir::new().unwrap();
    let store = ContentStore::new(store_dir.path()).unwrap();

    let source = create_source_file(source_dir.path(), "clip.mp4", b"bytes");
    let record = store.stage(&source).await.unwrap().persist().unwrap();

    let path = store.open(&record.filename).unwrap();
    assert_eq!(fs::read(path).unwrap(), b"bytes");

    store.delete(&record.filename);
    assert!(store.open(&record.filename).is_err());
}
