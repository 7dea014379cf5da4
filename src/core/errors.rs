use serde::ser::SerializeStruct;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("remote store is not configured")]
    NotConfigured,
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("remote invalid response: {0}")]
    RemoteInvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AppError", 2)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::RemoteInvalidResponse(_) => "REMOTE_INVALID_RESPONSE",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidInput(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn every_variant_maps_to_a_stable_code() {
        let cases = [
            (AppError::InvalidInput("x".to_string()), "INVALID_INPUT"),
            (AppError::Database("x".to_string()), "DATABASE_ERROR"),
            (AppError::Io("x".to_string()), "IO_ERROR"),
            (AppError::NotConfigured, "NOT_CONFIGURED"),
            (AppError::Unauthorized("x".to_string()), "UNAUTHORIZED"),
            (
                AppError::RemoteInvalidResponse("x".to_string()),
                "REMOTE_INVALID_RESPONSE",
            ),
            (AppError::Network("x".to_string()), "NETWORK_ERROR"),
            (AppError::Storage("x".to_string()), "STORAGE_ERROR"),
            (AppError::Internal("x".to_string()), "INTERNAL_ERROR"),
        ];
        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn errors_serialize_as_code_and_message() {
        let serialized =
            serde_json::to_value(AppError::Unauthorized("sign in".to_string())).expect("serialize");
        assert_eq!(serialized["code"], "UNAUTHORIZED");
        assert_eq!(serialized["message"], "not authorized: sign in");
    }
}
