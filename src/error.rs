/// Error types shared across the popup

/// A request that never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("bridge failure: {0}")]
    Bridge(String),
}

/// Why a single organization id source did not produce an id
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("stored user data is not valid JSON: {0}")]
    MalformedUserData(#[source] serde_json::Error),
    #[error("organization discovery request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("organization discovery returned HTTP {0}")]
    Status(u16),
    #[error("organization discovery response could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Failures that end an orchestration run before any outcome exists
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    #[error("Could not determine organization ID")]
    OrganizationUnresolved,
    #[error("No chats selected")]
    EmptySelection,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidApiBase(#[from] url::ParseError),
    #[error("API base URL cannot carry a path: {0}")]
    CannotBeABase(String),
    #[error("invalid chat path prefix: {0}")]
    ChatPattern(#[from] regex::Error),
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the JS bridge functions in popup.js
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("{0}")]
    Js(String),
    #[error("failed to serialize bridge arguments: {0}")]
    Serialize(String),
    #[error("failed to parse bridge result: {0}")]
    Decode(String),
}

/// Everything a popup action can surface to the user
#[derive(Debug, thiserror::Error)]
pub enum PopupError {
    #[error("Please navigate to {0} first")]
    NotOnHost(String),
    #[error("No active tab")]
    NoActiveTab,
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
