use thiserror::Error;

use socialsearch_store::StoreError;

pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Search is not available: pick a network, type a query and wait for the current search")]
    SubmitDisabled,

    #[error("Favorite is not available for the current search")]
    FavoriteDisabled,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
