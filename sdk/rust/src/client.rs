use reqwest::{header::ORIGIN, Client, StatusCode};
use serde::Deserialize;

/// Header (and value) the relay expects from browser clients.
pub const DEFAULT_CLIENT_HEADER: (&str, &str) = ("X-Blazorise-Client", "1");

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to relay failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay rejected the request with status {0}")]
    Rejected(StatusCode),
}

impl ClientError {
    /// Status of a rejection, if the relay answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected(status) => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Fetches the license token the way the browser application does.
pub struct RelayClient {
    client: Client,
    relay_url: String,
    origin: String,
    client_header: (String, String),
}

impl RelayClient {
    /// `origin` is sent as the `Origin` header, standing in for the page the
    /// browser would report.
    pub fn new(relay_url: &str, origin: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
            origin: origin.to_string(),
            client_header: (
                DEFAULT_CLIENT_HEADER.0.to_string(),
                DEFAULT_CLIENT_HEADER.1.to_string(),
            ),
        }
    }

    /// Use a different client header name/value.
    pub fn with_client_header(mut self, name: &str, value: &str) -> Self {
        self.client_header = (name.to_string(), value.to_string());
        self
    }

    /// GET /licensing/token and return the token.
    pub async fn fetch_token(&self) -> Result<String, ClientError> {
        let resp = self
            .client
            .get(format!("{}/licensing/token", self.relay_url))
            .header(ORIGIN, &self.origin)
            .header(self.client_header.0.as_str(), self.client_header.1.as_str())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Rejected(status));
        }

        let body: TokenResponse = resp.json().await?;
        Ok(body.token)
    }

    /// GET /healthz. True when the relay answers `ok`.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .client
            .get(format!("{}/healthz", self.relay_url))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        Ok(status.is_success() && body == "ok")
    }
}
