//! Product-data client: provider transport, answer extraction, and
//! normalization into the view models defined in `prodlens-core`.

mod client;
mod error;
mod extract;
pub mod fixtures;
mod normalize;
mod perplexity;
mod prompts;
mod types;

pub use client::{ProductClient, DEFAULT_USER_AGENT};
pub use error::{ClientError, ErrorKind, Operation};
pub use extract::{extract_json, into_records, Shape};
pub use normalize::{
    normalize_comparison, normalize_detail, normalize_product, normalize_products,
    normalize_update, normalize_updates,
};
pub use perplexity::{
    PerplexityClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_RECENCY, DEFAULT_TEMPERATURE,
    DEFAULT_URL,
};
pub use types::{
    CompareRequest, FindRequest, ProviderErrorBody, RawComparison, RawMetric, RawProduct,
    RawProductDetail, RawUpdate, UpdatesRequest,
};
