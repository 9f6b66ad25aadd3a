//! Synthetic identifier generation
//!
//! Uids look like `W` followed by uppercase base-36 characters. The default
//! [`HashedUid`] derives them from the post id so repeated runs over the same
//! export produce the same tree; [`RandomUid`] draws them at random. Both
//! refuse to hand out a uid twice.

use crate::types::{PostId, Uid};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Salted attempts before a hashed uid grows by one character.
const MAX_ATTEMPTS_PER_LENGTH: u32 = 64;

/// Source of synthetic uids.
pub trait UidGenerator {
    /// Produce a fresh uid for `post_id`, unique within this generator.
    fn generate(&mut self, post_id: PostId) -> Uid;
}

/// Which generator a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UidStrategy {
    #[default]
    Hashed,
    Random,
}

/// Deterministic uids from a BLAKE3 hash of the post id.
#[derive(Debug, Clone)]
pub struct HashedUid {
    prefix: String,
    length: usize,
    issued: HashSet<Uid>,
}

impl HashedUid {
    pub fn new(prefix: impl Into<String>, length: usize) -> Self {
        Self {
            prefix: prefix.into(),
            length: length.max(1),
            issued: HashSet::new(),
        }
    }

    fn candidate(&self, post_id: PostId, salt: u32, length: usize) -> Uid {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&post_id.to_le_bytes());
        hasher.update(&salt.to_le_bytes());
        let digest = hasher.finalize();
        format!("{}{}", self.prefix, base36(digest.as_bytes(), length))
    }
}

impl Default for HashedUid {
    fn default() -> Self {
        Self::new("W", 5)
    }
}

impl UidGenerator for HashedUid {
    fn generate(&mut self, post_id: PostId) -> Uid {
        let mut length = self.length;
        let mut salt = 0u32;
        loop {
            let uid = self.candidate(post_id, salt, length);
            if self.issued.insert(uid.clone()) {
                return uid;
            }
            salt += 1;
            if salt % MAX_ATTEMPTS_PER_LENGTH == 0 {
                length += 1;
            }
        }
    }
}

/// Random uids, unrelated to the post id.
#[derive(Debug)]
pub struct RandomUid<R: Rng> {
    prefix: String,
    length: usize,
    rng: R,
    issued: HashSet<Uid>,
}

impl RandomUid<rand::rngs::ThreadRng> {
    pub fn new(prefix: impl Into<String>, length: usize) -> Self {
        Self::with_rng(prefix, length, rand::thread_rng())
    }
}

impl<R: Rng> RandomUid<R> {
    pub fn with_rng(prefix: impl Into<String>, length: usize, rng: R) -> Self {
        Self {
            prefix: prefix.into(),
            length: length.max(1),
            rng,
            issued: HashSet::new(),
        }
    }
}

impl<R: Rng> UidGenerator for RandomUid<R> {
    fn generate(&mut self, _post_id: PostId) -> Uid {
        let mut length = self.length;
        let mut attempts = 0u32;
        loop {
            let suffix: String = (0..length)
                .map(|_| BASE36[self.rng.gen_range(0..BASE36.len())] as char)
                .collect();
            let uid = format!("{}{}", self.prefix, suffix);
            if self.issued.insert(uid.clone()) {
                return uid;
            }
            attempts += 1;
            if attempts % MAX_ATTEMPTS_PER_LENGTH == 0 {
                length += 1;
            }
        }
    }
}

/// Render the first 16 bytes of `bytes` as exactly `length` base-36 digits.
fn base36(bytes: &[u8], length: usize) -> String {
    let mut seed = [0u8; 16];
    let take = bytes.len().min(16);
    seed[..take].copy_from_slice(&bytes[..take]);
    let mut n = u128::from_le_bytes(seed);

    let mut digits = vec![b'0'; length];
    for slot in digits.iter_mut().rev() {
        *slot = BASE36[(n % 36) as usize];
        n /= 36;
    }
    digits.into_iter().map(char::from).collect()
}
