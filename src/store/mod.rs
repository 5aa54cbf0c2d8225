//! File-backed token store, one JSON map of `provider → TokenRecord`.
//!
//! The store is a plain key-value collaborator: last-write-wins per provider,
//! no cross-key transactions. Writes go through a temp file + rename so a
//! concurrent read never observes a partially written record.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Persisted credential/metadata bundle for one provider connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absolute expiry in epoch milliseconds; `None` means unknown/non-expiring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
}

impl TokenRecord {
    /// Whether the record was expired at `now_ms` (epoch milliseconds).
    /// Records without an expiry never expire.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        matches!(self.expires_at, Some(at) if at <= now_ms)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }
}

/// Token store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn open(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn get(&self, provider: &str) -> Result<Option<TokenRecord>, AuthError> {
        Ok(self.read_map()?.remove(provider))
    }

    /// Persist a record for a provider, overwriting any prior one.
    pub fn set(&self, provider: &str, record: &TokenRecord) -> Result<(), AuthError> {
        // An unreadable or corrupt file is replaced wholesale here: a fresh
        // login is the recovery path for a damaged token file.
        let mut map = self.read_map().unwrap_or_default();
        map.insert(provider.to_string(), record.clone());
        self.write_map(&map)
    }

    /// Delete the record for a provider. Deleting an absent record is not
    /// an error.
    pub fn delete(&self, provider: &str) -> Result<(), AuthError> {
        let mut map = self.read_map()?;
        if map.remove(provider).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }

    fn read_map(&self) -> Result<HashMap<String, TokenRecord>, AuthError> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn write_map(&self, map: &HashMap<String, TokenRecord>) -> Result<(), AuthError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        let data = serde_json::to_string_pretty(map)?;

        // Each writer gets its own temp file in the same directory, so
        // concurrent sets cannot rename each other's file out from under
        // them; the publishing rename stays last-write-wins. NamedTempFile
        // is created 0600 on Unix and persist keeps that mode, which is what
        // a token file wants anyway.
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(data.as_bytes())?;
        tmp.persist(&self.path)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        Ok(())
    }
}
