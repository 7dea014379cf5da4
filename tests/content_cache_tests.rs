use portfolio_content::db::{
    repositories::content::{self, CACHE_KEY},
    Database,
};

#[tokio::test]
async fn cache_round_trips_a_raw_legacy_document() {
    let db = Database::in_memory().await.expect("db should initialize");
    let raw = serde_json::json!({
        "hero": { "name": "Owner", "headline": "Legacy" },
        "pricing": [{ "id": "t-1", "note": "n", "features": ["a"] }]
    });

    content::put_document(db.pool(), CACHE_KEY, &raw)
        .await
        .expect("put document");
    let loaded = content::get_document(db.pool(), CACHE_KEY)
        .await
        .expect("get document");

    // Stored pre-normalization: legacy keys survive byte-for-byte.
    assert_eq!(loaded, Some(raw));
}

#[tokio::test]
async fn empty_cache_yields_none() {
    let db = Database::in_memory().await.expect("db should initialize");
    let loaded = content::get_document(db.pool(), CACHE_KEY)
        .await
        .expect("get document");
    assert!(loaded.is_none());
}

#[tokio::test]
async fn put_overwrites_the_existing_row() {
    let db = Database::in_memory().await.expect("db should initialize");
    content::put_document(db.pool(), CACHE_KEY, &serde_json::json!({ "v": 1 }))
        .await
        .expect("first put");
    content::put_document(db.pool(), CACHE_KEY, &serde_json::json!({ "v": 2 }))
        .await
        .expect("second put");

    let loaded = content::get_document(db.pool(), CACHE_KEY)
        .await
        .expect("get document");
    assert_eq!(loaded, Some(serde_json::json!({ "v": 2 })));
}

#[tokio::test]
async fn file_backed_database_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = serde_json::json!({ "hero": { "name": "Persisted Owner" } });
    {
        let db = Database::new(dir.path()).await.expect("open db");
        content::put_document(db.pool(), CACHE_KEY, &raw)
            .await
            .expect("put document");
    }

    let db = Database::new(dir.path()).await.expect("reopen db");
    let loaded = content::get_document(db.pool(), CACHE_KEY)
        .await
        .expect("get document");
    assert_eq!(loaded, Some(raw));
}

#[tokio::test]
async fn delete_reports_whether_a_row_existed() {
    let db = Database::in_memory().await.expect("db should initialize");
    assert!(!content::delete_document(db.pool(), CACHE_KEY)
        .await
        .expect("delete on empty"));

    content::put_document(db.pool(), CACHE_KEY, &serde_json::json!({}))
        .await
        .expect("put document");
    assert!(content::delete_document(db.pool(), CACHE_KEY)
        .await
        .expect("delete existing"));
}
