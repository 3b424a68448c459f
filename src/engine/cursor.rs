//! Pagination cursor codec.
//!
//! A cursor records the sort key and id of the last item on a page. Wire form:
//! `<hex(json payload)>.<hex(checksum)>`, where the checksum is the first 8 bytes of
//! `SHA-256(secret || payload)`.

use crate::domain::TokenId;
use crate::engine::sort::{SortValue, TokenOrdering};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

const CURSOR_VERSION: u32 = 1;
const CHECKSUM_LEN: usize = 8;

/// Resume position decoded from a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    pub key: SortValue,
    pub id: TokenId,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor is not well-formed: {0}")]
    Malformed(String),
    #[error("cursor checksum mismatch")]
    Checksum,
    #[error("unsupported cursor version {0}")]
    Version(u32),
    #[error("cursor was issued for ordering {found}, not {expected}")]
    OrderingMismatch { expected: String, found: String },
    #[error("cursor sort key is invalid")]
    Key,
}

#[derive(Debug, Serialize, Deserialize)]
struct Payload {
    v: u32,
    o: String,
    k: String,
    id: String,
}

/// Encodes and decodes opaque pagination cursors.
#[derive(Debug, Clone)]
pub struct CursorCodec {
    secret: Vec<u8>,
}

impl CursorCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        CursorCodec {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Mint a cursor pointing just past `(key, id)` in `ordering`.
    pub fn encode(&self, ordering: &TokenOrdering, key: &SortValue, id: &TokenId) -> String {
        let payload = Payload {
            v: CURSOR_VERSION,
            o: ordering.tag(),
            k: key.render(),
            id: id.as_str().to_string(),
        };
        // Serializing a struct of strings and integers cannot fail.
        let bytes = serde_json::to_vec(&payload).unwrap_or_default();
        format!("{}.{}", hex::encode(&bytes), hex::encode(self.checksum(&bytes)))
    }

    /// Decode a cursor minted for `ordering`.
    ///
    /// # Errors
    /// Returns `CursorError` when the token is malformed, tampered with, from another cursor
    /// version, or was minted for a different ordering.
    pub fn decode(&self, cursor: &str, ordering: &TokenOrdering) -> Result<ResumePoint, CursorError> {
        let (payload_hex, checksum_hex) = cursor
            .trim()
            .split_once('.')
            .ok_or_else(|| CursorError::Malformed("missing checksum".to_string()))?;

        let bytes =
            hex::decode(payload_hex).map_err(|e| CursorError::Malformed(e.to_string()))?;
        let checksum =
            hex::decode(checksum_hex).map_err(|e| CursorError::Malformed(e.to_string()))?;
        if checksum != self.checksum(&bytes) {
            return Err(CursorError::Checksum);
        }

        let payload: Payload =
            serde_json::from_slice(&bytes).map_err(|e| CursorError::Malformed(e.to_string()))?;
        if payload.v != CURSOR_VERSION {
            return Err(CursorError::Version(payload.v));
        }

        let expected = ordering.tag();
        if payload.o != expected {
            return Err(CursorError::OrderingMismatch {
                expected,
                found: payload.o,
            });
        }

        let key = ordering.field.parse_value(&payload.k).ok_or(CursorError::Key)?;
        if payload.id.is_empty() {
            return Err(CursorError::Malformed("empty id".to_string()));
        }

        Ok(ResumePoint {
            key,
            id: TokenId::new(payload.id),
        })
    }

    fn checksum(&self, payload: &[u8]) -> [u8; CHECKSUM_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(payload);
        let hash = hasher.finalize();
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&hash[..CHECKSUM_LEN]);
        out
    }
}
