use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use crate::domain::models::{Conversation, Message, OutboundMessage};
use crate::shared::errors::{AppError, Result};

// API Service for the messaging backend's REST endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct ApiService {
    base_url: String,
}

impl ApiService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    // Generic GET request
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = Request::get(&self.url(endpoint)).send().await?;
        let body = ensure_success(response)?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    // Generic POST request, response body ignored
    pub async fn post<B: serde::Serialize>(&self, endpoint: &str, body: &B) -> Result<()> {
        let response = Request::post(&self.url(endpoint)).json(body)?.send().await?;
        ensure_success(response)?;
        Ok(())
    }

    /// `GET /conversations`
    pub async fn get_conversations(&self) -> Result<Vec<Conversation>> {
        self.get("/conversations").await
    }

    /// `GET /conversations/{id}/messages`
    pub async fn get_conversation_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        self.get(&messages_endpoint(conversation_id)).await
    }

    /// `POST /messages`; the stored record comes back over the realtime channel
    pub async fn send_message(&self, message: &OutboundMessage) -> Result<()> {
        self.post("/messages", message).await
    }
}

fn messages_endpoint(conversation_id: &str) -> String {
    format!(
        "/conversations/{}/messages",
        urlencoding::encode(conversation_id)
    )
}

fn ensure_success(response: Response) -> Result<Response> {
    if !response.ok() {
        return Err(AppError::Http {
            status: response.status(),
            status_text: response.status_text(),
        });
    }
    Ok(response)
}
