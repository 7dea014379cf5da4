use serde_json::Value;

use crate::core::errors::AppResult;

pub mod supabase;

/// The remote authoritative document store: one logical row, public read,
/// authenticated overwrite. Implemented by [`supabase::SupabaseClient`] and by
/// in-memory fakes in tests.
pub trait RemoteContentStore {
    /// Single fetch attempt for the site document. `Ok(None)` covers both
    /// "no row yet" and "store not configured".
    async fn fetch(&self) -> AppResult<Option<Value>>;

    /// Full-document upsert keyed by the fixed document id. Last writer wins.
    async fn upsert(&self, access_token: &str, document: &Value) -> AppResult<()>;
}

/// Binary asset storage for uploaded images, namespaced by category folder.
pub trait AssetStore {
    /// Stores `bytes` under `path` and returns the storage path.
    async fn upload(
        &self,
        access_token: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> AppResult<String>;

    /// Public URL for a stored path; empty when the store is not configured.
    fn public_url(&self, path: &str) -> String;
}
