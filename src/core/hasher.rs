//! Streaming SHA-256 content digests for single-file targets.
//!
//! Files are read in fixed-size chunks and folded into a running digest, so
//! memory use stays bounded by the chunk size regardless of file size.

use crate::core::error::ScanError;

use sha2::{Digest, Sha256};
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default read size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Computes lowercase hex SHA-256 digests of file contents.
///
/// # Examples
///
/// ```rust
/// use filescanner::core::FileHasher;
///
/// let hasher = FileHasher::new();
/// assert_eq!(
///     hasher.hash_bytes(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct FileHasher {
    /// Bytes read per iteration.
    chunk_size: usize,
}

impl Default for FileHasher {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl FileHasher {
    /// Creates a new `FileHasher` with the default chunk size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size. Zero is clamped to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Returns the configured chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Computes the digest of an in-memory buffer.
    pub fn hash_bytes(&self, data: &[u8]) -> String {
        format!("{:x}", Sha256::digest(data))
    }

    /// Computes the digest of a file, streaming it from disk.
    pub fn hash_file(&self, path: &Path) -> Result<String, ScanError> {
        let mut file = std::fs::File::open(path)?;
        self.hash_reader(&mut file)
    }

    /// Computes the digest of everything a reader yields.
    ///
    /// A read error part-way through is returned as-is; no partial digest is
    /// produced.
    pub fn hash_reader<R: Read>(&self, reader: &mut R) -> Result<String, ScanError> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ScanError::Io(e)),
            };
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}
