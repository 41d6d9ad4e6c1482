//! Hashing - SHA-256 digests of artifact sets.
//!
//! A digest identifies a set of files independent of list order.

use sha2::{Digest, Sha256};

use crate::asset::File;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Digest over every file's path and content, taken in path order.
pub fn files_digest(files: &[File]) -> String {
    let mut sorted: Vec<&File> = files.iter().collect();
    sorted.sort_by(|a, b| a.filename.cmp(&b.filename));

    let mut hasher = Sha256::new();
    for file in sorted {
        hasher.update(file.filename.as_bytes());
        hasher.update([0u8]);
        hasher.update((file.data.len() as u64).to_be_bytes());
        hasher.update(&file.data);
    }
    hex::encode(hasher.finalize())
}
