use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use yoda_core::{UNEXPECTED_RESPONSE, describe_http_failure};
use yoda_types::{
    CHAT_PATH, ChatRequest, ChatResponse, Move, PlayResponse, SCORE_PATH, Score, play_path,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was obtained
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}")]
    Status { status: u16, body: Vec<u8> },
    #[error("Could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text for the flow's error area; `unreachable` is used when the
    /// backend could not be reached at all.
    pub fn user_message(&self, unreachable: &str) -> String {
        match self {
            ApiError::Transport(_) => unreachable.to_string(),
            ApiError::Status { status, body } => describe_http_failure(*status, body),
            ApiError::Decode(_) => UNEXPECTED_RESPONSE.to_string(),
        }
    }
}

/// Backend operations the page depends on.
#[async_trait(?Send)]
pub trait ApiClient {
    async fn get_score(&self) -> Result<Score, ApiError>;
    async fn play(&self, player_move: Move) -> Result<PlayResponse, ApiError>;
    async fn chat(&self, message: &str) -> Result<ChatResponse, ApiError>;
}

pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// `base_url` must be absolute, e.g. `http://localhost:8000/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!("Backend answered {} ({} bytes)", status, body.len());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: body.to_vec(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait(?Send)]
impl ApiClient for HttpApiClient {
    async fn get_score(&self) -> Result<Score, ApiError> {
        self.send(self.client.get(self.url(SCORE_PATH))).await
    }

    async fn play(&self, player_move: Move) -> Result<PlayResponse, ApiError> {
        self.send(self.client.post(self.url(&play_path(player_move))))
            .await
    }

    async fn chat(&self, message: &str) -> Result<ChatResponse, ApiError> {
        let request = self
            .client
            .post(self.url(CHAT_PATH))
            .header(ACCEPT, "application/json")
            .json(&ChatRequest {
                user_message: message.to_string(),
            });
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoda_core::GAME_UNREACHABLE;

    #[test]
    fn test_user_message_per_kind() {
        let transport = ApiError::Transport("connection refused".to_string());
        assert_eq!(transport.user_message(GAME_UNREACHABLE), GAME_UNREACHABLE);

        let status = ApiError::Status {
            status: 422,
            body: br#"{"detail":"Input should be 'rock', 'paper', 'scissors', 'lizard' or 'spock'"}"#
                .to_vec(),
        };
        assert_eq!(
            status.user_message(GAME_UNREACHABLE),
            "Input should be 'rock', 'paper', 'scissors', 'lizard' or 'spock'"
        );

        let decode: ApiError = serde_json::from_str::<Score>("not json").unwrap_err().into();
        assert_eq!(decode.user_message(GAME_UNREACHABLE), UNEXPECTED_RESPONSE);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpApiClient::new("http://localhost:8000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url(SCORE_PATH), "http://localhost:8000/api/v1/score");
    }
}
