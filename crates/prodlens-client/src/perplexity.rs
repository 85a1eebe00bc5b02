//! Direct client for Perplexity's chat-completions API.
//!
//! Each operation sends one system + user prompt pair and digs the JSON
//! payload out of the model's free-text answer with [`crate::extract`].
//! Returned values are still raw; [`crate::normalize`] turns them into view
//! models.

use prodlens_core::AppConfig;
use reqwest::{Client, Url};
use serde_json::Value;

use crate::client::{build_http_client, error_from_response};
use crate::error::ClientError;
use crate::extract::{extract_json, into_records, Shape};
use crate::prompts;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

pub const DEFAULT_URL: &str = "https://api.perplexity.ai/chat/completions";
pub const DEFAULT_MODEL: &str = "sonar";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_RECENCY: &str = "month";

const UNPARSABLE: u16 = 422;

pub struct PerplexityClient {
    client: Client,
    api_key: String,
    url: Url,
    model: String,
    temperature: f32,
    max_tokens: u32,
    search_recency_filter: String,
}

impl std::fmt::Debug for PerplexityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerplexityClient")
            .field("url", &self.url.as_str())
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl PerplexityClient {
    /// Builds a client from application config.
    ///
    /// `api_key` overrides the configured key (the CLI passes the key saved
    /// in the settings store).
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingApiKey`] if neither source has a non-blank key.
    /// - [`ClientError::InvalidBaseUrl`] if the endpoint URL does not parse.
    /// - [`ClientError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn from_config(config: &AppConfig, api_key: Option<&str>) -> Result<Self, ClientError> {
        let api_key = api_key
            .or(config.perplexity_api_key.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        Ok(Self {
            client: build_http_client(config.request_timeout_secs, &config.user_agent)?,
            api_key: api_key.to_owned(),
            url: parse_url(&config.perplexity_url)?,
            model: config.perplexity_model.clone(),
            temperature: config.perplexity_temperature,
            max_tokens: config.perplexity_max_tokens,
            search_recency_filter: config.search_recency_filter.clone(),
        })
    }

    /// Builds a client with default model settings against a custom endpoint
    /// (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same as [`PerplexityClient::from_config`].
    pub fn with_url(api_key: &str, timeout_secs: u64, url: &str) -> Result<Self, ClientError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ClientError::MissingApiKey);
        }

        Ok(Self {
            client: build_http_client(timeout_secs, crate::client::DEFAULT_USER_AGENT)?,
            api_key: api_key.to_owned(),
            url: parse_url(url)?,
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            search_recency_filter: DEFAULT_RECENCY.to_owned(),
        })
    }

    /// Asks for a structured comparison of two products.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Provider`] with status 422 if no JSON object can be
    ///   recovered from the answer, or with the upstream status on non-2xx.
    /// - [`ClientError::Http`] on transport failure.
    pub async fn compare_products(
        &self,
        product1: &str,
        product2: &str,
    ) -> Result<Value, ClientError> {
        let content = self
            .ask(
                prompts::COMPARE_SYSTEM,
                &prompts::compare_prompt(product1, product2),
            )
            .await?;

        match extract_json(&content, Shape::Object) {
            Some(value @ Value::Object(_)) => Ok(value),
            _ => Err(unparsable("Could not parse structured data", &content)),
        }
    }

    /// Asks for up to five products matching free-text criteria.
    ///
    /// # Errors
    ///
    /// Same as [`PerplexityClient::compare_products`].
    pub async fn find_products(&self, criteria: &str) -> Result<Vec<Value>, ClientError> {
        let content = self
            .ask(prompts::FIND_SYSTEM, &prompts::find_prompt(criteria))
            .await?;

        extract_json(&content, Shape::List)
            .map(into_records)
            .map(stringify_ids)
            .ok_or_else(|| {
                unparsable("Failed to parse product data from API response", &content)
            })
    }

    /// Asks for recent news items in a category.
    ///
    /// # Errors
    ///
    /// Same as [`PerplexityClient::compare_products`].
    pub async fn get_product_updates(&self, category: &str) -> Result<Vec<Value>, ClientError> {
        let content = self
            .ask(prompts::UPDATES_SYSTEM, &prompts::updates_prompt(category))
            .await?;

        extract_json(&content, Shape::List)
            .map(into_records)
            .map(stringify_ids)
            .ok_or_else(|| {
                unparsable(
                    "Failed to parse product updates from API response",
                    &content,
                )
            })
    }

    /// Sends one chat turn and returns the first choice's text.
    async fn ask(&self, system: &str, prompt: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            search_recency_filter: &self.search_recency_filter,
        };

        let started = std::time::Instant::now();
        let response = self
            .client
            .post(self.url.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(
            status = status.as_u16(),
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis(),
            "perplexity responded"
        );

        if !status.is_success() {
            return Err(match error_from_response(response).await {
                ClientError::Provider { status, message } => ClientError::Provider {
                    status,
                    message: format!("Perplexity API error: {message}"),
                },
                other => other,
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
                context: "perplexity chat completion".to_string(),
                source: e,
            })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

fn parse_url(url: &str) -> Result<Url, ClientError> {
    Url::parse(url.trim()).map_err(|e| ClientError::InvalidBaseUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn unparsable(message: &str, content: &str) -> ClientError {
    tracing::warn!(
        content_len = content.len(),
        "no usable JSON in provider answer"
    );
    ClientError::Provider {
        status: UNPARSABLE,
        message: message.to_string(),
    }
}

/// Numeric ids become strings so downstream code sees one id type.
fn stringify_ids(mut records: Vec<Value>) -> Vec<Value> {
    for record in &mut records {
        let numeric = match record.get("id") {
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        if let Some(id) = numeric {
            record["id"] = Value::String(id);
        }
    }
    records
}
