//! Content hashing
//!
//! Two identities are derived from the raw bytes of an upload:
//!
//! - the git blob object id (SHA-1 over `blob <len>\0<content>`), which the
//!   contents API uses to decide between create and update
//! - an MD5 digest used only to name the stored file

use sha1::{Digest, Sha1};

/// Hash identities of a file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentHashes {
    /// Git blob object id, 40 lowercase hex chars
    pub object_hash: String,
    /// MD5 of the raw content, 32 lowercase hex chars
    pub dedup_hash: String,
}

impl ContentHashes {
    /// Compute both hashes from the file content.
    pub fn compute(content: &[u8]) -> Self {
        Self {
            object_hash: git_blob_hash(content),
            dedup_hash: dedup_hash(content),
        }
    }
}

/// Compute the git object id of `content` stored as a blob.
pub fn git_blob_hash(content: &[u8]) -> String {
    let header = format!("blob {}\0", content.len());
    let mut hasher = Sha1::new();
    hasher.update(header.as_bytes());
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Compute the MD5 digest of `content`.
pub fn dedup_hash(content: &[u8]) -> String {
    hex::encode(md5::compute(content).0)
}
