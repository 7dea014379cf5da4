use crate::config::SupabaseConfig;

/// Resolves a stored image reference to a displayable URL.
///
/// Stored values are either absolute URLs (used verbatim) or storage-relative
/// paths composed onto the public bucket endpoint. Empty in, empty out; the
/// caller owns the "no image" case. Never touches the stored document.
pub fn resolve_image(value: &str, config: &SupabaseConfig) -> String {
    if value.is_empty() {
        return String::new();
    }
    if is_http_url(value) {
        return value.to_string();
    }
    public_object_url(value, config)
}

pub fn public_object_url(path: &str, config: &SupabaseConfig) -> String {
    if config.base_url().is_empty() || path.is_empty() {
        return String::new();
    }
    format!(
        "{}/storage/v1/object/public/{}/{}",
        config.base_url(),
        config.bucket,
        path.trim_start_matches('/')
    )
}

fn is_http_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::resolve_image;
    use crate::config::SupabaseConfig;

    fn config() -> SupabaseConfig {
        SupabaseConfig::new("https://demo.supabase.co/", "anon-key")
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve_image("HTTPS://cdn.example.com/a.png", &config()),
            "HTTPS://cdn.example.com/a.png"
        );
    }

    #[test]
    fn storage_paths_compose_onto_the_public_bucket() {
        assert_eq!(
            resolve_image("/logo/abc.png", &config()),
            "https://demo.supabase.co/storage/v1/object/public/portfolio/logo/abc.png"
        );
    }

    #[test]
    fn empty_value_or_missing_base_yields_empty() {
        assert_eq!(resolve_image("", &config()), "");
        assert_eq!(resolve_image("logo/abc.png", &SupabaseConfig::unconfigured()), "");
    }
}
