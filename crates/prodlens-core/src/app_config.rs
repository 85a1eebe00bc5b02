use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where product data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// The thin backend proxy (`prodlens-server` or a compatible service).
    Backend,
    /// Perplexity's chat-completions API, queried directly.
    Perplexity,
    /// Built-in sample data; no network access.
    Fixture,
}

impl std::fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderMode::Backend => write!(f, "backend"),
            ProviderMode::Perplexity => write!(f, "perplexity"),
            ProviderMode::Fixture => write!(f, "fixture"),
        }
    }
}

impl std::str::FromStr for ProviderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(ProviderMode::Backend),
            "perplexity" => Ok(ProviderMode::Perplexity),
            "fixture" | "mock" => Ok(ProviderMode::Fixture),
            other => Err(format!(
                "unknown provider '{other}'; expected backend, perplexity, or fixture"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub provider: ProviderMode,
    pub backend_url: String,
    pub perplexity_api_key: Option<String>,
    pub perplexity_url: String,
    pub perplexity_model: String,
    pub perplexity_temperature: f32,
    pub perplexity_max_tokens: u32,
    pub search_recency_filter: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub settings_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("provider", &self.provider)
            .field("backend_url", &self.backend_url)
            .field(
                "perplexity_api_key",
                &self.perplexity_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("perplexity_url", &self.perplexity_url)
            .field("perplexity_model", &self.perplexity_model)
            .field("perplexity_temperature", &self.perplexity_temperature)
            .field("perplexity_max_tokens", &self.perplexity_max_tokens)
            .field("search_recency_filter", &self.search_recency_filter)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("settings_path", &self.settings_path)
            .field("catalog_path", &self.catalog_path)
            .finish()
    }
}
