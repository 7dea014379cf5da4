pub mod config;
pub mod content;
pub mod core;
pub mod db;
pub mod editor;
pub mod loader;
pub mod providers;
pub mod security;

use std::path::PathBuf;

use crate::{
    config::SupabaseConfig,
    core::errors::AppResult,
    db::{default_data_dir, Database},
    editor::EditorSession,
    loader::ContentLoader,
    providers::supabase::SupabaseClient,
    security::session::SessionStore,
};

pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PORTFOLIO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Composition root wiring the database, the Supabase client, and the session
/// store for a host shell.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub client: SupabaseClient,
    pub sessions: SessionStore,
    pub data_dir: PathBuf,
}

impl AppState {
    pub async fn init(base_dir: Option<PathBuf>) -> AppResult<Self> {
        let data_dir = default_data_dir(base_dir)?;
        let db = Database::new(&data_dir).await?;
        let client = SupabaseClient::new(SupabaseConfig::from_env())?;
        Ok(Self {
            db,
            client,
            sessions: SessionStore::new(),
            data_dir,
        })
    }

    /// Visitor-side loader over the shared database and remote client.
    pub fn loader(&self) -> ContentLoader<SupabaseClient> {
        ContentLoader::new(self.db.clone(), self.client.clone())
    }

    /// Owner-side editor, gated by the current auth session.
    pub async fn editor(&self) -> AppResult<EditorSession<SupabaseClient>> {
        EditorSession::open(self.db.clone(), self.client.clone(), self.sessions.subscribe()).await
    }
}
