use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use serde_json::Value;

use crate::{
    config::SupabaseConfig,
    content::images,
    core::errors::{AppError, AppResult},
    providers::{AssetStore, RemoteContentStore},
    security::session::Session,
};

/// The fixed id of the single site-content row. One deployment, one document.
pub const DOCUMENT_ID: &str = "main";

const CONTENT_TABLE: &str = "site_content";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the Supabase project: the `site_content` table, password
/// auth, and the public asset bucket.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub async fn fetch_content(&self) -> AppResult<Option<Value>> {
        if !self.is_configured() {
            return Ok(None);
        }
        let endpoint = format!(
            "{}/rest/v1/{CONTENT_TABLE}?select=data&id=eq.{DOCUMENT_ID}",
            self.config.base_url()
        );
        let response = self
            .http
            .get(endpoint)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteInvalidResponse(format!(
                "status {status} body {body}"
            )));
        }

        let rows: Value = response
            .json()
            .await
            .map_err(|err| AppError::RemoteInvalidResponse(err.to_string()))?;
        Ok(rows
            .as_array()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("data"))
            .filter(|data| !data.is_null())
            .cloned())
    }

    pub async fn upsert_content(&self, access_token: &str, document: &Value) -> AppResult<()> {
        if !self.is_configured() {
            return Err(AppError::NotConfigured);
        }
        let endpoint = format!("{}/rest/v1/{CONTENT_TABLE}", self.config.base_url());
        let payload = serde_json::json!([{
            "id": DOCUMENT_ID,
            "data": document,
            "updated_at": Utc::now().to_rfc3339(),
        }]);
        let response = self
            .http
            .post(endpoint)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&payload)
            .send()
            .await
            .map_err(map_transport)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(
                "remote write rejected; sign in again".to_string(),
            )),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::RemoteInvalidResponse(format!(
                    "status {status} body {body}"
                )))
            }
            _ => Ok(()),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.token_request("password", &body).await
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AppResult<Session> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        self.token_request("refresh_token", &body).await
    }

    pub async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        if !self.is_configured() {
            return Err(AppError::NotConfigured);
        }
        let endpoint = format!("{}/auth/v1/logout", self.config.base_url());
        self.http
            .post(endpoint)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(map_transport)?;
        Ok(())
    }

    async fn token_request(&self, grant_type: &str, body: &Value) -> AppResult<Session> {
        if !self.is_configured() {
            return Err(AppError::NotConfigured);
        }
        let endpoint = format!(
            "{}/auth/v1/token?grant_type={grant_type}",
            self.config.base_url()
        );
        let response = self
            .http
            .post(endpoint)
            .header("apikey", &self.config.anon_key)
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|err| AppError::RemoteInvalidResponse(err.to_string()))?;

        if !status.is_success() {
            return Err(AppError::Unauthorized(auth_error_message(&payload)));
        }
        session_from_token_payload(&payload)
    }

    pub async fn upload_object(
        &self,
        access_token: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> AppResult<String> {
        if !self.is_configured() {
            return Err(AppError::NotConfigured);
        }
        let endpoint = format!(
            "{}/storage/v1/object/{}/{}",
            self.config.base_url(),
            self.config.bucket,
            path.trim_start_matches('/')
        );
        let response = self
            .http
            .post(endpoint)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(access_token)
            .header("Content-Type", content_type)
            .header("x-upsert", "false")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(map_transport)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized(
                "upload rejected; sign in again".to_string(),
            )),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::Storage(format!("status {status} body {body}")))
            }
            _ => Ok(path.trim_start_matches('/').to_string()),
        }
    }
}

impl RemoteContentStore for SupabaseClient {
    async fn fetch(&self) -> AppResult<Option<Value>> {
        self.fetch_content().await
    }

    async fn upsert(&self, access_token: &str, document: &Value) -> AppResult<()> {
        self.upsert_content(access_token, document).await
    }
}

impl AssetStore for SupabaseClient {
    async fn upload(
        &self,
        access_token: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> AppResult<String> {
        self.upload_object(access_token, path, bytes, content_type).await
    }

    fn public_url(&self, path: &str) -> String {
        images::public_object_url(path, &self.config)
    }
}

fn map_transport(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Network("request timed out".to_string())
    } else {
        AppError::Network(err.to_string())
    }
}

fn auth_error_message(payload: &Value) -> String {
    payload
        .get("error_description")
        .or_else(|| payload.get("msg"))
        .or_else(|| payload.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("authentication failed")
        .to_string()
}

fn session_from_token_payload(payload: &Value) -> AppResult<Session> {
    let access_token = payload
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::RemoteInvalidResponse("missing access_token".to_string()))?
        .to_string();
    let refresh_token = payload
        .get("refresh_token")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let expires_in = payload
        .get("expires_in")
        .and_then(Value::as_i64)
        .unwrap_or(3600);
    let user_email = payload
        .get("user")
        .and_then(|user| user.get("email"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Session {
        access_token,
        refresh_token,
        user_email,
        expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
    })
}

#[cfg(test)]
mod tests {
    use super::session_from_token_payload;

    #[test]
    fn token_payload_without_access_token_is_invalid() {
        let payload = serde_json::json!({ "refresh_token": "r" });
        assert!(session_from_token_payload(&payload).is_err());
    }

    #[test]
    fn token_payload_extracts_session_fields() {
        let payload = serde_json::json!({
            "access_token": "a",
            "refresh_token": "r",
            "expires_in": 60,
            "user": { "email": "owner@example.com" }
        });
        let session = session_from_token_payload(&payload).expect("session");
        assert_eq!(session.access_token, "a");
        assert_eq!(session.user_email, "owner@example.com");
    }
}
