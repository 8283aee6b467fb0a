use browser_db::DatabaseError;
use thiserror::Error;

/// Failures reported by the fetch collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Unreachable host: {0}")]
    UnreachableHost(String),

    #[error("HTTP status {status}")]
    HttpStatus { status: u16, body: String },

    #[error("Response is empty")]
    EmptyResponse,
}

impl FetchError {
    /// Short title shown in place of the page title
    pub fn title(&self) -> String {
        match self {
            FetchError::MalformedAddress(_) => "Uri Format".to_string(),
            FetchError::UnsupportedScheme(_) => "Not Supported".to_string(),
            FetchError::UnreachableHost(_) => "Unreachable Host".to_string(),
            FetchError::HttpStatus { status, .. } => status.to_string(),
            FetchError::EmptyResponse => "Empty Response".to_string(),
        }
    }

    /// Body shown to the user for this failure
    pub fn body(&self) -> String {
        match self {
            FetchError::HttpStatus { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Address cannot be empty")]
    EmptyAddress,

    #[error("Nothing to show")]
    EmptyResult,

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Window was closed")]
    WindowClosed,

    #[error("Error occurred: {0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, ShellError>;
