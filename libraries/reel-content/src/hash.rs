//! Streaming content hashing

use crate::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Default buffer size for file operations (64KB)
pub(crate) const BUFFER_SIZE: usize = 64 * 1024;

/// Compute the SHA-256 hash of a file as a lowercase hex string
///
/// Reads in fixed-size chunks; memory stays bounded regardless of file
/// size. This is the dedupe identity for every local import.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = hasher.finalize();
    Ok(hex::encode(hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn sha256_of_known_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"Hello, World!").unwrap();

        let hash = sha256_file(&path).unwrap();

        // SHA256 of "Hello, World!"
        assert_eq!(
            hash,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn sha256_of_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = sha256_file(&temp.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, crate::ContentError::Io(_)));
    }
}
