use serde_json::Value;

/// Errors that can occur in connectors or core lifecycle logic.
///
/// Only [`ConnectorError::UninitializedRuntime`] is expected to reach
/// callers on read paths; query and chain irregularities degrade to
/// neutral values inside the component that observed them.
#[derive(thiserror::Error, Debug)]
pub enum ConnectorError {
    /// A runtime-dependent call happened before lifecycle initialization
    #[error("runtime engine is not initialized; call load_runtime first")]
    UninitializedRuntime,

    /// Indexer lookup or search failure
    #[error("query failed: {0}")]
    Query(String),

    /// An operation exceeded its deadline
    #[error("timed out: {0}")]
    Timeout(String),

    /// Chain has no registered implementation
    #[error("chain not supported: {0}")]
    ChainNotSupported(String),

    /// Configuration or initialization error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Serialization or deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Anyhow error for general-purpose error handling
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ConnectorError {
    /// True when the error came from the transport or query layer and a
    /// read path should degrade rather than propagate.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConnectorError::Query(_) | ConnectorError::Timeout(_) | ConnectorError::Http(_)
        )
    }
}

impl From<url::ParseError> for ConnectorError {
    fn from(error: url::ParseError) -> Self {
        ConnectorError::Configuration(format!("invalid endpoint URL: {}", error))
    }
}

impl From<String> for ConnectorError {
    fn from(error: String) -> Self {
        ConnectorError::Query(error)
    }
}

impl From<&str> for ConnectorError {
    fn from(error: &str) -> Self {
        ConnectorError::Query(error.to_string())
    }
}

/// A malformed indexer response, preserved for diagnostics.
pub(crate) fn malformed_response(context: &str, body: &Value) -> ConnectorError {
    ConnectorError::Query(format!("{}: unexpected response shape: {}", context, body))
}
