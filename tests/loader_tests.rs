use std::sync::{Arc, Mutex};

use portfolio_content::{
    content::normalize::normalize,
    core::errors::{AppError, AppResult},
    db::{
        repositories::content::{self, CACHE_KEY},
        Database,
    },
    loader::ContentLoader,
    providers::RemoteContentStore,
};
use serde_json::Value;

#[derive(Clone, Default)]
struct FakeRemote {
    document: Arc<Mutex<Option<Value>>>,
    unreachable: bool,
}

impl FakeRemote {
    fn with_document(document: Value) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document))),
            unreachable: false,
        }
    }

    fn offline() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }
}

impl RemoteContentStore for FakeRemote {
    async fn fetch(&self) -> AppResult<Option<Value>> {
        if self.unreachable {
            return Err(AppError::Network("offline".to_string()));
        }
        Ok(self.document.lock().expect("lock").clone())
    }

    async fn upsert(&self, _access_token: &str, document: &Value) -> AppResult<()> {
        if self.unreachable {
            return Err(AppError::Network("offline".to_string()));
        }
        *self.document.lock().expect("lock") = Some(document.clone());
        Ok(())
    }
}

#[tokio::test]
async fn remote_document_wins_and_overwrites_the_cache_raw() {
    let db = Database::in_memory().await.expect("db should initialize");
    let remote_raw = serde_json::json!({ "skills": ["X"] });
    let loader = ContentLoader::new(db.clone(), FakeRemote::with_document(remote_raw.clone()));

    let content = loader.load().await.expect("load");
    assert_eq!(content.skills, vec!["X"]);
    assert!(content.projects.is_empty());
    assert_eq!(content.branding.name, "OMER TECH DUDE");

    // Cache now holds the raw remote document, not the normalized form.
    let cached = content::get_document(db.pool(), CACHE_KEY)
        .await
        .expect("cache read");
    assert_eq!(cached, Some(remote_raw));
}

#[tokio::test]
async fn unreachable_remote_falls_back_to_the_cached_document() {
    let db = Database::in_memory().await.expect("db should initialize");
    let cached_raw = serde_json::json!({
        "hero": { "name": "Cached Owner" },
        "skills": ["Cached"]
    });
    content::put_document(db.pool(), CACHE_KEY, &cached_raw)
        .await
        .expect("seed cache");

    let loader = ContentLoader::new(db.clone(), FakeRemote::offline());
    let content = loader.load().await.expect("load");

    // No silent reset to built-in defaults.
    assert_eq!(content, normalize(Some(&cached_raw)));
    assert_eq!(content.branding.name, "Cached Owner");
    assert_eq!(content.skills, vec!["Cached"]);
}

#[tokio::test]
async fn missing_remote_row_with_empty_cache_serves_defaults() {
    let db = Database::in_memory().await.expect("db should initialize");
    let loader = ContentLoader::new(db.clone(), FakeRemote::default());

    let content = loader.load().await.expect("load");
    assert_eq!(content.branding.name, "OMER TECH DUDE");
    assert_eq!(content.projects[0].title, "Portfolio Website");

    // Nothing was cached; the remote never produced a document.
    let cached = content::get_document(db.pool(), CACHE_KEY)
        .await
        .expect("cache read");
    assert!(cached.is_none());
}

#[tokio::test]
async fn cached_value_is_available_without_the_network() {
    let db = Database::in_memory().await.expect("db should initialize");
    let loader = ContentLoader::new(db.clone(), FakeRemote::offline());

    let content = loader.cached().await.expect("cached");
    assert_eq!(content.branding.name, "OMER TECH DUDE");
}
