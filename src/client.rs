//! HTTP client for the fortune API.

use reqwest::{Client, StatusCode};

use crate::{
    config,
    error::ClientError,
    management::FortuneSource,
    types::{ErrorResponse, Fortune, FortuneResponse},
};

#[derive(Debug, Clone)]
pub struct FortuneClient {
    client: Client,
    base_url: String,
    token: String,
}

impl FortuneClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn from_env(token: impl Into<String>) -> Self {
        Self::new(config::fortune_server_url(), token)
    }

    pub fn fortune_url(&self) -> String {
        format!("{}/api/fortune", self.base_url)
    }
}

impl FortuneSource for FortuneClient {
    async fn fetch(&self) -> Result<Fortune, ClientError> {
        let response = self
            .client
            .get(self.fortune_url())
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        interpret_response(status, &body)
    }
}

/// Maps a fortune API answer onto what the CLI should do with it.
pub fn interpret_response(status: StatusCode, body: &str) -> Result<Fortune, ClientError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(ClientError::NotAuthenticated),
        StatusCode::FORBIDDEN => Err(ClientError::NeedsPermissions),
        s if s.is_success() => serde_json::from_str::<FortuneResponse>(body)
            .map(|r| r.fortune)
            .map_err(|_| ClientError::Missing),
        s => {
            let reason = serde_json::from_str::<ErrorResponse>(body)
                .map(|e| match e.details {
                    Some(details) => format!("{}: {}", e.error, details),
                    None => e.error,
                })
                .unwrap_or_else(|_| s.to_string());
            Err(ClientError::Failed(reason))
        }
    }
}
