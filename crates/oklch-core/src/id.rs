//! Per-picker session identifier.
//!
//! Several pickers can share one worker pool. Task keys and listener names
//! are prefixed with the picker's id so their work never coalesces.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const ID_LEN: usize = 7;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random base-36 identifier of one picker session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickerId(String);

impl PickerId {
    /// Generates a fresh 7-character id.
    pub fn random() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..ID_LEN)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    /// Uses a caller supplied id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PickerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PickerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id() {
        let id = PickerId::random();
        assert_eq!(id.as_str().len(), 7);
        assert!(id.as_str().bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_ids_differ() {
        // 36^7 possibilities, a collision here means the generator is broken
        assert_ne!(PickerId::random(), PickerId::random());
    }
}
