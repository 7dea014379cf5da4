//! Cache-then-revalidate loading of the site content.
//!
//! Visitors render from [`ContentLoader::cached`] immediately, then
//! [`ContentLoader::load`] makes one remote attempt: a returned document
//! overwrites the cache (raw, pre-normalization) and wins outright; anything
//! else silently keeps the cache-derived value. No retries.

use serde_json::Value;

use crate::{
    content::{defaults::default_document, normalize::normalize},
    core::{errors::AppResult, types::Content},
    db::{
        repositories::content::{self as cache, CACHE_KEY},
        Database,
    },
    providers::RemoteContentStore,
};

pub struct ContentLoader<R> {
    db: Database,
    remote: R,
}

impl<R: RemoteContentStore> ContentLoader<R> {
    pub fn new(db: Database, remote: R) -> Self {
        Self { db, remote }
    }

    /// The immediately-available value: last cached document, or the built-in
    /// defaults on a fresh install. Never touches the network.
    pub async fn cached(&self) -> AppResult<Content> {
        let raw = self.cached_raw().await?;
        Ok(normalize(Some(&raw)))
    }

    /// One load round: remote wins when reachable, cache otherwise. Remote
    /// failures are logged and swallowed; only local database failures
    /// propagate.
    pub async fn load(&self) -> AppResult<Content> {
        match self.remote.fetch().await {
            Ok(Some(remote_raw)) => {
                cache::put_document(self.db.pool(), CACHE_KEY, &remote_raw).await?;
                Ok(normalize(Some(&remote_raw)))
            }
            Ok(None) => {
                tracing::debug!("remote returned no content document; serving cache");
                self.cached().await
            }
            Err(err) => {
                tracing::warn!(error = %err, "remote fetch failed; serving cache");
                self.cached().await
            }
        }
    }

    async fn cached_raw(&self) -> AppResult<Value> {
        let raw = cache::get_document(self.db.pool(), CACHE_KEY).await?;
        Ok(raw.unwrap_or_else(default_document))
    }
}
