//! `MessagePack` encoding of levels and content tables.
//!
//! Encoding is in memory only. A level's encoding doubles as its
//! fingerprint: two generations from the same seed and configuration encode
//! to identical bytes.

use delve_dungeon::{ContentTables, Level};
use delve_foundation::{Error, ErrorKind, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serializes a value to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(value)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Deserializes a value from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    rmp_serde::from_slice(bytes)
        .map_err(|e| Error::new(ErrorKind::SerializationError(e.to_string())))
}

/// Encodes a level.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn level_to_bytes(level: &Level) -> Result<Vec<u8>> {
    to_bytes(level)
}

/// Decodes a level.
///
/// # Errors
///
/// Returns an error if the bytes are not an encoded level.
pub fn level_from_bytes(bytes: &[u8]) -> Result<Level> {
    from_bytes(bytes)
}

/// Encodes content tables.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn tables_to_bytes(tables: &ContentTables) -> Result<Vec<u8>> {
    to_bytes(tables)
}

/// Decodes content tables.
///
/// # Errors
///
/// Returns an error if the bytes are not encoded tables.
pub fn tables_from_bytes(bytes: &[u8]) -> Result<ContentTables> {
    from_bytes(bytes)
}

/// A 64-bit FNV-1a digest of the level's encoding.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn level_fingerprint(level: &Level) -> Result<u64> {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let bytes = level_to_bytes(level)?;
    Ok(bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME)))
}
