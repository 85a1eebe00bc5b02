//! Product-data client.
//!
//! [`ProductClient`] validates user input, fetches raw JSON from the
//! configured provider, and normalizes it into view models. Every operation
//! issues at most one HTTP request; there is no retry and no caching.

use std::time::Duration;

use prodlens_core::{AppConfig, ComparisonResult, Product, ProductUpdate, ProviderMode};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::extract::into_records;
use crate::fixtures;
use crate::normalize::{normalize_comparison, normalize_products, normalize_updates};
use crate::perplexity::PerplexityClient;
use crate::types::{CompareRequest, FindRequest, ProviderErrorBody, UpdatesRequest};

pub const DEFAULT_USER_AGENT: &str = "prodlens/0.1 (product-analyzer)";

pub(crate) fn build_http_client(timeout_secs: u64, user_agent: &str) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

/// Turns a non-2xx response into [`ClientError::Provider`].
///
/// The message comes from a recognised JSON error body when there is one,
/// otherwise from the raw body text.
pub(crate) async fn error_from_response(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return ClientError::Http(e),
    };
    let message = serde_json::from_str::<ProviderErrorBody>(&text)
        .ok()
        .and_then(ProviderErrorBody::into_message)
        .unwrap_or_else(|| text.trim().to_string());
    ClientError::Provider { status, message }
}

enum Provider {
    Backend { client: Client, base_url: Url },
    Perplexity(PerplexityClient),
    Fixture,
}

/// Client for product comparisons, searches and update feeds.
///
/// Use [`ProductClient::from_config`] in binaries, [`ProductClient::with_base_url`]
/// to point at a mock backend in tests, and [`ProductClient::fixture`] for
/// offline sample data.
pub struct ProductClient {
    provider: Provider,
}

impl ProductClient {
    /// Builds a client for the provider selected in `config`.
    ///
    /// `api_key` overrides `PERPLEXITY_API_KEY` in direct mode and is ignored
    /// otherwise.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingApiKey`] in direct mode without a key.
    /// - [`ClientError::InvalidBaseUrl`] if a configured URL does not parse.
    /// - [`ClientError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn from_config(config: &AppConfig, api_key: Option<&str>) -> Result<Self, ClientError> {
        match config.provider {
            ProviderMode::Backend => {
                let client = build_http_client(config.request_timeout_secs, &config.user_agent)?;
                Ok(Self {
                    provider: Provider::Backend {
                        client,
                        base_url: parse_base_url(&config.backend_url)?,
                    },
                })
            }
            ProviderMode::Perplexity => Ok(Self::perplexity(PerplexityClient::from_config(
                config, api_key,
            )?)),
            ProviderMode::Fixture => Ok(Self::fixture()),
        }
    }

    /// Creates a backend-proxy client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        Ok(Self {
            provider: Provider::Backend {
                client: build_http_client(timeout_secs, DEFAULT_USER_AGENT)?,
                base_url: parse_base_url(base_url)?,
            },
        })
    }

    #[must_use]
    pub fn perplexity(client: PerplexityClient) -> Self {
        Self {
            provider: Provider::Perplexity(client),
        }
    }

    #[must_use]
    pub fn fixture() -> Self {
        Self {
            provider: Provider::Fixture,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ProviderMode {
        match self.provider {
            Provider::Backend { .. } => ProviderMode::Backend,
            Provider::Perplexity(_) => ProviderMode::Perplexity,
            Provider::Fixture => ProviderMode::Fixture,
        }
    }

    /// Compares two products head to head.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if either name is blank; nothing is sent.
    /// - [`ClientError::Provider`] if the provider reports failure.
    /// - [`ClientError::Http`] on transport failure.
    pub async fn compare(
        &self,
        product1: &str,
        product2: &str,
    ) -> Result<ComparisonResult, ClientError> {
        let (product1, product2) = (product1.trim(), product2.trim());
        if product1.is_empty() || product2.is_empty() {
            return Err(ClientError::Validation(
                "Please enter both products to compare.".to_string(),
            ));
        }

        let raw = match &self.provider {
            Provider::Backend { client, base_url } => {
                let body = CompareRequest {
                    product1: product1.to_owned(),
                    product2: product2.to_owned(),
                };
                post_json(client, base_url, "compare", &body).await?
            }
            Provider::Perplexity(client) => client.compare_products(product1, product2).await?,
            Provider::Fixture => fixtures::comparison(product1, product2),
        };

        let result = normalize_comparison(raw, (product1, product2));
        tracing::info!(
            mode = %self.mode(),
            product1,
            product2,
            metrics = result.comparison_metrics.len(),
            "comparison loaded"
        );
        Ok(result)
    }

    /// Searches for products matching `criteria`.
    ///
    /// `criteria` is sent verbatim and may carry filter clauses built by
    /// [`prodlens_core::build_criteria`].
    ///
    /// # Errors
    ///
    /// Same as [`ProductClient::compare`].
    pub async fn find(&self, criteria: &str) -> Result<Vec<Product>, ClientError> {
        let criteria = criteria.trim();
        if criteria.is_empty() {
            return Err(ClientError::Validation(
                "Please enter a search query".to_string(),
            ));
        }

        let records = match &self.provider {
            Provider::Backend { client, base_url } => {
                let body = FindRequest {
                    criteria: criteria.to_owned(),
                };
                into_records(post_json(client, base_url, "find", &body).await?)
            }
            Provider::Perplexity(client) => client.find_products(criteria).await?,
            Provider::Fixture => fixtures::products(),
        };

        let products = normalize_products(records);
        tracing::info!(
            mode = %self.mode(),
            criteria,
            count = products.len(),
            "products loaded"
        );
        Ok(products)
    }

    /// Fetches recent product news for one category.
    ///
    /// # Errors
    ///
    /// Same as [`ProductClient::compare`].
    pub async fn get_updates(&self, category: &str) -> Result<Vec<ProductUpdate>, ClientError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ClientError::Validation(
                "Please select a category".to_string(),
            ));
        }

        let records = match &self.provider {
            Provider::Backend { client, base_url } => {
                let body = UpdatesRequest {
                    category: category.to_owned(),
                };
                into_records(post_json(client, base_url, "updates", &body).await?)
            }
            Provider::Perplexity(client) => client.get_product_updates(category).await?,
            Provider::Fixture => fixtures::updates(),
        };

        let updates = normalize_updates(records, category);
        tracing::info!(
            mode = %self.mode(),
            category,
            count = updates.len(),
            "updates loaded"
        );
        Ok(updates)
    }
}

/// Normalises the base URL to end with exactly one slash so that joining a
/// relative path appends a segment instead of replacing the last one.
fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn endpoint(base_url: &Url, path: &str) -> Result<Url, ClientError> {
    base_url.join(path).map_err(|e| ClientError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// POSTs `body` as JSON and parses a 2xx response body as JSON.
async fn post_json<B: Serialize>(
    client: &Client,
    base_url: &Url,
    path: &str,
    body: &B,
) -> Result<Value, ClientError> {
    let url = endpoint(base_url, path)?;
    let response = client.post(url.clone()).json(body).send().await?;
    if !response.status().is_success() {
        let err = error_from_response(response).await;
        tracing::warn!(url = %url, error = %err, "backend request failed");
        return Err(err);
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
