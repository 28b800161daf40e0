use thiserror::Error;

/// Failures reported by the backend adapter.
///
/// The store collapses every variant into a single user-facing message;
/// the classification exists so diagnostics can tell "the server said no"
/// apart from "the server was never reached".
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (refused connection, DNS
    /// failure, timeout).
    #[error("no response from server: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },

    /// The request could not be built or sent due to a local error.
    #[error("request could not be built: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Request(err)
        } else if err.is_decode() {
            ApiError::Decode(err)
        } else {
            ApiError::Transport(err)
        }
    }
}
