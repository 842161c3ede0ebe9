use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProfilesError>;

#[derive(Debug, Error)]
pub enum ProfilesError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ProfilesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProfilesError::Timeout
        } else if err.is_decode() {
            ProfilesError::Parse(err.to_string())
        } else {
            ProfilesError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProfilesError {
    fn from(err: serde_json::Error) -> Self {
        ProfilesError::Parse(err.to_string())
    }
}
