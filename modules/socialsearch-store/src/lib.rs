pub mod error;
pub mod memory;
pub mod postgres;
pub mod ranking;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgSearchStore;
pub use traits::SearchStore;
