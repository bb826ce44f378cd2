//! MapQuest client error types.

/// Errors from the geocoding and directions providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, connection refused, etc.)
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Request exceeded the client timeout
    #[error("request to {0} timed out")]
    Timeout(&'static str),

    /// Response body was not the JSON we expected
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error HTTP status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized: check MAP_QUEST_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by MapQuest")]
    RateLimited,

    /// Provider answered but reported a failure status
    #[error("provider status {code}: {}", .messages.join("; "))]
    Status { code: i32, messages: Vec<String> },

    /// Provider found nothing for the query
    #[error("no results for {0:?}")]
    NoResults(String),

    /// Response parsed but is missing required data
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ProviderError {
    /// Whether the failure is about the caller's input (unknown address,
    /// unroutable pair) rather than the provider or the transport.
    ///
    /// Only MapQuest's input and routing codes count: 400 bad input, 402
    /// unroutable, 6xx routing errors. A bad key (403) or a provider fault
    /// (500) is not the caller's doing.
    pub fn is_not_found(&self) -> bool {
        match self {
            ProviderError::NoResults(_) => true,
            ProviderError::Status { code, .. } => matches!(code, 400 | 402 | 600..=699),
            _ => false,
        }
    }

    /// Whether retrying the same request later might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Http(_) | ProviderError::Timeout(_) | ProviderError::RateLimited => true,
            ProviderError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the provider sent something we could not interpret.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ProviderError::Json { .. } | ProviderError::Malformed(_)
        )
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout("MapQuest")
        } else {
            ProviderError::Http(err)
        }
    }
}
