mod app_config;
mod catalog;
mod config;
mod filter;
mod pricing;
mod products;
mod session;
mod settings;

pub use app_config::{AppConfig, Environment, ProviderMode};
pub use catalog::{load_catalog, load_catalog_or_default, Catalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::{build_criteria, toggle_selection, PriceRange, ProductFilters, SortKey};
pub use pricing::{parse_price, sort_price, PriceSpan};
pub use products::{
    placeholder_image_url, ComparisonMetric, ComparisonResult, Product, ProductDetail,
    ProductUpdate, UpdateType, NOT_AVAILABLE, PLACEHOLDER_IMAGE_BASE,
};
pub use session::{RequestSlot, Settled, Ticket};
pub use settings::{LocalStore, Settings, SubscriptionChange, API_KEY_KEY, SUBSCRIPTIONS_KEY};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid price range: min {min} is greater than max {max}")]
    InvalidPriceRange { min: u64, max: u64 },

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("settings store I/O error at {path}: {source}")]
    StoreIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("settings store at {path} is not valid JSON: {source}")]
    StoreParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
