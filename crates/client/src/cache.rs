//! Small on-disk key/value cache of JSON documents.
//!
//! One file per key under the cache directory. Entries never expire; a
//! write replaces the previous value atomically (temp file + rename).

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;

pub struct JsonCache {
    dir: PathBuf,
}

impl JsonCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read `key`. A missing entry is `Ok(None)`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ClientError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn put<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), ClientError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.dir).await?;

        let bytes = serde_json::to_vec(value)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(key, bytes = bytes.len(), "Cache entry written");
        Ok(())
    }

    /// Delete `key`; deleting a missing entry is not an error.
    pub async fn remove(&self, key: &str) -> Result<(), ClientError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ClientError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ClientError::CacheKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path().join("nested"));

        cache.put("numbers", &vec![1, 2, 3]).await.unwrap();
        let back: Option<Vec<i32>> = cache.get("numbers").await.unwrap();

        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());

        let value: Option<String> = cache.get("nothing_here").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());

        cache.put("k", "old").await.unwrap();
        cache.put("k", "new").await.unwrap();

        let value: Option<String> = cache.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn corrupt_entry_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), b"{not json").unwrap();
        let cache = JsonCache::new(dir.path());

        let result: Result<Option<Vec<i32>>, _> = cache.get("broken").await;
        assert_matches!(result, Err(ClientError::CacheFormat(_)));
    }

    #[tokio::test]
    async fn path_like_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());

        assert_matches!(
            cache.put("../escape", &1).await,
            Err(ClientError::CacheKey(_))
        );
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = JsonCache::new(dir.path());

        cache.put("gone", &true).await.unwrap();
        cache.remove("gone").await.unwrap();
        cache.remove("gone").await.unwrap();

        let value: Option<bool> = cache.get("gone").await.unwrap();
        assert!(value.is_none());
    }
}
