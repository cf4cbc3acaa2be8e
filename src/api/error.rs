//! Errors raised at the backend boundary

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("server returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Http { status: u16, detail: Option<String> },

    /// No response was received
    #[error("network error: {0}")]
    Network(String),

    /// A well-formed envelope reporting failure, or one without data
    #[error("backend reported failure: {0}")]
    Backend(String),

    /// The body was not the expected JSON shape
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local I/O failed while talking to a file-backed backend
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A message fit for showing to a user, with the status it came from
///
/// `status` is the HTTP status for server errors, `0` when nothing was
/// received and `-1` for anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserNotice {
    pub message: String,
    pub status: i32,
}

/// Map an error to the notice shown to a user
pub fn describe_error(error: &ApiError) -> UserNotice {
    match error {
        ApiError::Http { status, detail } => UserNotice {
            message: detail
                .clone()
                .unwrap_or_else(|| "An error occurred".to_string()),
            status: i32::from(*status),
        },
        ApiError::Network(_) => UserNotice {
            message: "Network error. Please check your connection.".to_string(),
            status: 0,
        },
        other => UserNotice {
            message: other.to_string(),
            status: -1,
        },
    }
}
