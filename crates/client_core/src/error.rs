use std::fmt;

use thiserror::Error;

/// The remote operation a [`TransportError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    ListAll,
    GetById,
    Create,
    Update,
    Delete,
}

impl StoreOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOperation::ListAll => "list_all",
            StoreOperation::GetById => "get_by_id",
            StoreOperation::Create => "create",
            StoreOperation::Update => "update",
            StoreOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network or server failure on any record store call.
///
/// Messages are flattened to strings so completions can be cloned and moved
/// across the UI/backend thread boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("{operation} request failed: {message}")]
    Request {
        operation: StoreOperation,
        message: String,
    },
    #[error("{operation} returned HTTP {status}{}", detail_suffix(.detail))]
    Status {
        operation: StoreOperation,
        status: u16,
        detail: Option<String>,
    },
    #[error("{operation} returned an unreadable body: {message}")]
    Decode {
        operation: StoreOperation,
        message: String,
    },
    /// Empty, `.` and `..` ids cannot survive URL path normalization, so no
    /// request is sent for them.
    #[error("{operation} refused: book id '{id}' cannot be used as a path segment")]
    UnaddressableId {
        operation: StoreOperation,
        id: String,
    },
}

impl TransportError {
    pub fn operation(&self) -> StoreOperation {
        match self {
            TransportError::Request { operation, .. }
            | TransportError::Status { operation, .. }
            | TransportError::Decode { operation, .. }
            | TransportError::UnaddressableId { operation, .. } => *operation,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

/// Local presence check on the create path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("book id is required")]
    MissingId,
    #[error("book title is required")]
    MissingTitle,
}

#[derive(Debug, Error)]
pub enum StoreSetupError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' cannot carry a path")]
    CannotBeABase(String),
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
