use crate::core::errors::{AppError, AppResult};

const SERVICE: &str = "portfolio-content";
const ACCOUNT: &str = "supabase-refresh-token";

/// The refresh token survives restarts in the OS keyring so the owner does not
/// re-enter credentials on every editor launch.
pub fn store_refresh_token(token: &str) -> AppResult<()> {
    let entry = keyring::Entry::new(SERVICE, ACCOUNT)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    entry
        .set_password(token)
        .map_err(|err| AppError::Internal(err.to_string()))
}

pub fn load_refresh_token() -> AppResult<String> {
    let entry = keyring::Entry::new(SERVICE, ACCOUNT)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    entry
        .get_password()
        .map_err(|_err| AppError::Unauthorized("no persisted session".to_string()))
}

pub fn clear_refresh_token() -> AppResult<()> {
    let entry = keyring::Entry::new(SERVICE, ACCOUNT)
        .map_err(|err| AppError::Internal(err.to_string()))?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(AppError::Internal(err.to_string())),
    }
}
