use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use crate::errors::{LexlineError, LexlineResult};
use crate::structs::config::api_config::ApiConfig;
use crate::structs::draft_document::DraftDocument;
use crate::traits::draft_store::DraftStore;

/// Thin client for the draft persistence and compile endpoints.
///
/// The engine hands this client opaque draft text; all document semantics
/// live on the server side.
#[derive(Clone)]
pub struct DraftApiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl DraftApiClient {
    pub fn new(config: &ApiConfig) -> LexlineResult<Self> {
        let api_key = config
            .api_key_env
            .as_ref()
            .and_then(|env| std::env::var(env).ok());

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(LexlineError::from)?;

        Ok(Self {
            base_url: config.base_url.clone(),
            api_key,
            client,
        })
    }

    pub async fn fetch_draft(&self, draft_id: &str) -> LexlineResult<DraftDocument> {
        let url = format!("{}/drafts/{}", self.base_url, draft_id);
        let response = self.request(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            return Err(self.api_error("fetch draft", &url, response).await);
        }

        Ok(response.json::<DraftDocument>().await?)
    }

    /// Compile the active text into a downloadable document and return the
    /// raw bytes. Whichever pane is active supplies `text`; diff state is
    /// irrelevant to the compiler.
    pub async fn compile_document(&self, draft_id: &str, text: &str) -> LexlineResult<Vec<u8>> {
        let url = format!("{}/drafts/{}/compile", self.base_url, draft_id);
        let body = json!({ "text": text });
        let response = self.request(self.client.post(&url)).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(self.api_error("compile document", &url, response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(api_key) => builder.header("x-api-key", api_key),
            None => builder,
        }
    }

    async fn api_error(&self, operation: &str, url: &str, response: reqwest::Response) -> LexlineError {
        let status = response.status().as_u16();
        let reason = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        LexlineError::NetworkError {
            operation: operation.to_string(),
            url: Some(url.to_string()),
            status_code: Some(status),
            reason,
        }
    }
}

#[async_trait]
impl DraftStore for DraftApiClient {

    /// Persist the current full draft text. On failure the caller must keep
    /// its unsaved-changes flag set; nothing local is rolled back here.
    async fn save_draft(&self, draft_id: &str, text: &str) -> LexlineResult<()> {
        let url = format!("{}/drafts/{}", self.base_url, draft_id);
        let body = json!({ "text": text });
        let response = self.request(self.client.put(&url)).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(self.api_error("save draft", &url, response).await);
        }

        log::info!("💾 Draft {} saved ({} chars)", draft_id, text.chars().count());
        Ok(())
    }
}
