use crate::app_config::{AppConfig, Environment, ProviderMode};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a usable
/// development config pointed at a local backend proxy.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PRODLENS_ENV", "development"));
    let log_level = or_default("PRODLENS_LOG_LEVEL", "info");

    let bind_addr = or_default("PRODLENS_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PRODLENS_BIND_ADDR", e.to_string()))?;

    let provider = or_default("PRODLENS_PROVIDER", "backend")
        .parse::<ProviderMode>()
        .map_err(|e| invalid("PRODLENS_PROVIDER", e))?;

    let backend_url = or_default("PRODLENS_BACKEND_URL", "http://localhost:8000/api");
    let perplexity_api_key = lookup("PERPLEXITY_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let perplexity_url = or_default(
        "PRODLENS_PERPLEXITY_URL",
        "https://api.perplexity.ai/chat/completions",
    );
    let perplexity_model = or_default("PRODLENS_PERPLEXITY_MODEL", "sonar");

    let perplexity_temperature = or_default("PRODLENS_PERPLEXITY_TEMPERATURE", "0.2")
        .parse::<f32>()
        .map_err(|e| invalid("PRODLENS_PERPLEXITY_TEMPERATURE", e.to_string()))?;
    if !(0.0..=2.0).contains(&perplexity_temperature) {
        return Err(invalid(
            "PRODLENS_PERPLEXITY_TEMPERATURE",
            format!("{perplexity_temperature} is outside 0.0..=2.0"),
        ));
    }

    let perplexity_max_tokens = parse_u32("PRODLENS_PERPLEXITY_MAX_TOKENS", "1000")?;
    let search_recency_filter = or_default("PRODLENS_SEARCH_RECENCY", "month");
    let request_timeout_secs = parse_u64("PRODLENS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PRODLENS_USER_AGENT", "prodlens/0.1 (product-analyzer)");
    let settings_path = PathBuf::from(or_default(
        "PRODLENS_SETTINGS_PATH",
        "./.prodlens/settings.json",
    ));
    let catalog_path = PathBuf::from(or_default("PRODLENS_CATALOG_PATH", "./config/catalog.yaml"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider,
        backend_url,
        perplexity_api_key,
        perplexity_url,
        perplexity_model,
        perplexity_temperature,
        perplexity_max_tokens,
        search_recency_filter,
        request_timeout_secs,
        user_agent,
        settings_path,
        catalog_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
