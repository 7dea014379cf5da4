/// Connection settings for the Supabase project backing the site.
///
/// An unconfigured instance is a supported state: public reads degrade to the
/// local cache and the editor surfaces a blocking notice instead of saving.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub bucket: String,
}

const DEFAULT_BUCKET: &str = "portfolio";

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self {
            url: std::env::var("PORTFOLIO_SUPABASE_URL").unwrap_or_default(),
            anon_key: std::env::var("PORTFOLIO_SUPABASE_ANON_KEY").unwrap_or_default(),
            bucket: std::env::var("PORTFOLIO_SUPABASE_BUCKET")
                .unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            ..Self::default()
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Project URL without a trailing slash, for endpoint composition.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
