use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown social network: {0}")]
    UnknownNetwork(String),

    #[error("Unknown plan: {0}")]
    UnknownTier(String),
}
