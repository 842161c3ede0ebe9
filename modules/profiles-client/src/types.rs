use serde::Deserialize;

use socialsearch_common::SearchResultRow;

/// Envelope of `GET /api/v1/profiles`.
///
/// A missing or null `data` is treated as an empty result set.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfilesResponse {
    #[serde(default)]
    pub data: Option<Vec<SearchResultRow>>,
}

impl ProfilesResponse {
    pub fn into_rows(self) -> Vec<SearchResultRow> {
        self.data.unwrap_or_default()
    }
}
