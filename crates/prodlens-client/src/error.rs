use thiserror::Error;

/// Errors returned by the product-data client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Required user input was missing; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// Direct provider mode was selected but no API key is configured.
    #[error("API key not found. Please set your Perplexity API key first.")]
    MissingApiKey,

    /// The provider answered with a non-success status or an unusable body.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// User-facing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing input, caught before the network call; shown inline.
    Validation,
    /// The call completed but the provider reported failure.
    Provider,
    /// The call did not complete.
    Network,
}

/// Client operations, used to pick generic notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compare,
    Find,
    Updates,
}

impl Operation {
    #[must_use]
    pub fn generic_failure(self) -> &'static str {
        match self {
            Operation::Compare => "Failed to compare products",
            Operation::Find => "Failed to find products",
            Operation::Updates => "Failed to get product updates",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Compare => write!(f, "compare"),
            Operation::Find => write!(f, "find"),
            Operation::Updates => write!(f, "updates"),
        }
    }
}

impl ClientError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_)
            | ClientError::MissingApiKey
            | ClientError::InvalidBaseUrl { .. } => ErrorKind::Validation,
            ClientError::Provider { .. } | ClientError::Deserialize { .. } => ErrorKind::Provider,
            ClientError::Http(e) if e.status().is_some() || e.is_decode() => ErrorKind::Provider,
            ClientError::Http(_) => ErrorKind::Network,
        }
    }

    /// Text for the transient notification shown after a failed `op`.
    ///
    /// Provider messages are shown verbatim when present; everything else
    /// gets the operation's generic text.
    #[must_use]
    pub fn notification(&self, op: Operation) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::MissingApiKey => self.to_string(),
            ClientError::Provider { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => match self.kind() {
                ErrorKind::Network => format!(
                    "{}. Check your connection and try again.",
                    op.generic_failure()
                ),
                _ => format!("{}. Please try again.", op.generic_failure()),
            },
        }
    }
}
