pub mod error;
pub mod ranking;
pub mod search_panel;
pub mod traits;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{PanelError, Result};
pub use ranking::{RankingDashboard, RankingState};
pub use search_panel::{PanelSnapshot, SearchPanel, SearchTicket, SubmitOutcome, ViewState};
pub use traits::ProfileSearch;
