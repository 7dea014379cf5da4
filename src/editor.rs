//! The owner's read-modify-write cycle over the content document.
//!
//! The working copy is the raw document (historical keys and all); patches
//! address raw paths, writes go through the declared key mirrors, and
//! [`EditorSession::canonical`] exposes the normalized view. Saving writes the
//! local cache unconditionally and then publishes to the remote store, which
//! requires a live session. Every operation clears the previous status
//! message; mutating operations take `&mut self`, so two cannot overlap within
//! one session.

use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::{
    content::{aliases, defaults, ids::new_id, normalize::normalize},
    core::{
        errors::{AppError, AppResult},
        types::Content,
    },
    db::{
        repositories::content::{self as cache, CACHE_KEY},
        Database,
    },
    providers::{AssetStore, RemoteContentStore},
    security::session::Session,
};

pub struct EditorSession<R> {
    db: Database,
    remote: R,
    session: watch::Receiver<Option<Session>>,
    working: Value,
    status: Option<String>,
}

impl<R: RemoteContentStore + AssetStore> EditorSession<R> {
    /// Opens on the cached document, or the built-in defaults on a fresh
    /// install. Call [`Self::reload`] afterwards to pick up the remote copy.
    pub async fn open(
        db: Database,
        remote: R,
        session: watch::Receiver<Option<Session>>,
    ) -> AppResult<Self> {
        let working = cache::get_document(db.pool(), CACHE_KEY)
            .await?
            .unwrap_or_else(defaults::default_document);
        Ok(Self {
            db,
            remote,
            session,
            working,
            status: None,
        })
    }

    pub fn working(&self) -> &Value {
        &self.working
    }

    pub fn canonical(&self) -> Content {
        normalize(Some(&self.working))
    }

    /// Transient status of the last operation; cleared by the next one.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn signed_in(&self) -> bool {
        self.session.borrow().is_some()
    }

    /// Deep-sets one field by dotted path, creating intermediate objects, and
    /// writes the declared legacy mirror key alongside. Collections are edited
    /// through the dedicated operations below, not through paths.
    pub fn patch(&mut self, path: &str, value: Value) {
        self.status = None;
        deep_set(&mut self.working, path, value.clone());
        if let Some(mirror) = aliases::mirror_of(path) {
            deep_set(&mut self.working, mirror, value);
        }
    }

    pub fn add_skill(&mut self) {
        self.status = None;
        if let Some(items) = collection_mut(&mut self.working, "skills") {
            items.push(Value::String(defaults::NEW_SKILL.to_string()));
        }
    }

    pub fn update_skill(&mut self, index: usize, value: &str) {
        self.status = None;
        if let Some(items) = collection_mut(&mut self.working, "skills") {
            if let Some(slot) = items.get_mut(index) {
                *slot = Value::String(value.to_string());
            }
        }
    }

    pub fn remove_skill(&mut self, index: usize) {
        self.status = None;
        if let Some(items) = collection_mut(&mut self.working, "skills") {
            if index < items.len() {
                items.remove(index);
            }
        }
    }

    /// Appends a new project with a fresh id and returns that id.
    pub fn add_project(&mut self) -> String {
        self.status = None;
        self.append_record("projects", defaults::new_project_record())
    }

    pub fn update_project(&mut self, id: &str, patch: Value) {
        self.status = None;
        merge_record(&mut self.working, "projects", id, patch);
    }

    pub fn remove_project(&mut self, id: &str) {
        self.status = None;
        remove_record(&mut self.working, "projects", id);
    }

    pub fn add_pricing_plan(&mut self) -> String {
        self.status = None;
        self.append_record("pricing", defaults::new_pricing_record())
    }

    pub fn update_pricing_plan(&mut self, id: &str, patch: Value) {
        self.status = None;
        merge_record(&mut self.working, "pricing", id, patch);
    }

    pub fn remove_pricing_plan(&mut self, id: &str) {
        self.status = None;
        remove_record(&mut self.working, "pricing", id);
    }

    /// Local cache first, unconditionally; then the remote upsert. Without a
    /// session the local write stands and the publish fails with
    /// `Unauthorized`. A remote failure never touches the working copy.
    pub async fn save(&mut self) -> AppResult<()> {
        self.status = None;
        cache::put_document(self.db.pool(), CACHE_KEY, &self.working).await?;
        let Some(session) = self.current_session() else {
            return Err(AppError::Unauthorized(
                "sign in to publish changes".to_string(),
            ));
        };
        self.remote.upsert(&session.access_token, &self.working).await?;
        self.status = Some("Saved globally — everyone sees the update.".to_string());
        tracing::debug!("content document published");
        Ok(())
    }

    /// Replaces the working copy and the cache with the built-in defaults.
    /// Does not contact the remote store; save to publish.
    pub async fn reset(&mut self) -> AppResult<()> {
        self.status = None;
        self.working = defaults::default_document();
        cache::put_document(self.db.pool(), CACHE_KEY, &self.working).await?;
        self.status = Some("Reset locally. Save to publish.".to_string());
        Ok(())
    }

    /// Discards the working copy in favor of the remote document. Remote
    /// absence or failure is reported through the status message, not an
    /// error; returns whether the remote copy was applied.
    pub async fn reload(&mut self) -> AppResult<bool> {
        self.status = None;
        match self.remote.fetch().await {
            Ok(Some(raw)) => {
                cache::put_document(self.db.pool(), CACHE_KEY, &raw).await?;
                self.working = raw;
                self.status = Some("Reloaded from remote.".to_string());
                Ok(true)
            }
            Ok(None) => {
                self.status = Some("Could not reload from remote.".to_string());
                Ok(false)
            }
            Err(err) => {
                tracing::warn!(error = %err, "reload failed");
                self.status = Some(format!("Could not reload: {err}"));
                Ok(false)
            }
        }
    }

    /// Uploads the site logo and stores its URL under both logo keys.
    pub async fn upload_site_logo(&mut self, bytes: &[u8], ext: &str) -> AppResult<String> {
        let url = self.upload_asset("logo", bytes, ext).await?;
        self.patch("branding.logoUrl", Value::String(url.clone()));
        Ok(url)
    }

    /// Uploads the hero image; the mirror keeps `hero.photoUrl` in sync.
    pub async fn upload_hero_image(&mut self, bytes: &[u8], ext: &str) -> AppResult<String> {
        let url = self.upload_asset("hero", bytes, ext).await?;
        self.patch("hero.heroImageUrl", Value::String(url.clone()));
        Ok(url)
    }

    /// Uploads a project image and stores the URL under both record keys.
    /// Unknown project id leaves the document untouched.
    pub async fn upload_project_image(
        &mut self,
        project_id: &str,
        bytes: &[u8],
        ext: &str,
    ) -> AppResult<String> {
        let url = self.upload_asset("projects", bytes, ext).await?;
        merge_record(
            &mut self.working,
            "projects",
            project_id,
            serde_json::json!({ "imageUrl": url, "logoUrl": url }),
        );
        Ok(url)
    }

    fn append_record(&mut self, key: &str, record: Value) -> String {
        let id = record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if let Some(items) = collection_mut(&mut self.working, key) {
            items.push(record);
        }
        id
    }

    async fn upload_asset(&mut self, category: &str, bytes: &[u8], ext: &str) -> AppResult<String> {
        self.status = None;
        let Some(session) = self.current_session() else {
            return Err(AppError::Unauthorized("sign in to upload".to_string()));
        };
        let ext = ext.trim_start_matches('.');
        let ext = if ext.is_empty() { "png" } else { ext };
        let path = format!("{category}/{}.{ext}", new_id());
        let stored = self
            .remote
            .upload(&session.access_token, &path, bytes, mime_for_ext(ext))
            .await?;
        Ok(self.remote.public_url(&stored))
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }
}

/// Sets `value` at a dotted path, creating empty objects along the way. A
/// non-object in the middle of the path is replaced, matching how the
/// historical admin built up partially-missing documents.
fn deep_set(root: &mut Value, path: &str, value: Value) {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let mut node = root;
    let mut keys = path.split('.').peekable();
    while let Some(key) = keys.next() {
        let Some(map) = node.as_object_mut() else {
            return;
        };
        if keys.peek().is_none() {
            map.insert(key.to_string(), value);
            return;
        }
        let entry = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        node = entry;
    }
}

fn collection_mut<'doc>(working: &'doc mut Value, key: &str) -> Option<&'doc mut Vec<Value>> {
    if !working.is_object() {
        *working = Value::Object(Map::new());
    }
    let map = working.as_object_mut()?;
    let entry = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !entry.is_array() {
        *entry = Value::Array(Vec::new());
    }
    entry.as_array_mut()
}

/// Merges an object patch into the record matching `id`; unknown ids and
/// non-object patches are silent no-ops, and an `id` key inside the patch is
/// ignored so record ids stay stable.
fn merge_record(working: &mut Value, key: &str, id: &str, patch: Value) {
    let Value::Object(patch_map) = patch else {
        return;
    };
    let Some(items) = collection_mut(working, key) else {
        return;
    };
    let Some(record) = items
        .iter_mut()
        .find(|record| record.get("id").and_then(Value::as_str) == Some(id))
    else {
        return;
    };
    let Some(target) = record.as_object_mut() else {
        return;
    };
    for (field, value) in patch_map {
        if field == "id" {
            continue;
        }
        target.insert(field, value);
    }
}

fn remove_record(working: &mut Value, key: &str, id: &str) {
    if let Some(items) = collection_mut(working, key) {
        items.retain(|record| record.get("id").and_then(Value::as_str) != Some(id));
    }
}

fn mime_for_ext(ext: &str) -> &'static str {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::deep_set;
    use serde_json::Value;

    #[test]
    fn deep_set_creates_missing_intermediate_objects() {
        let mut doc = serde_json::json!({});
        deep_set(&mut doc, "contact.formspree", Value::String("F".to_string()));
        assert_eq!(doc["contact"]["formspree"], "F");
    }

    #[test]
    fn deep_set_replaces_non_object_intermediates() {
        let mut doc = serde_json::json!({ "hero": "oops" });
        deep_set(&mut doc, "hero.title", Value::String("T".to_string()));
        assert_eq!(doc["hero"]["title"], "T");
    }
}
