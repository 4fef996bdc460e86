use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireStation {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub station_name: Option<String>,
    /// Set on sub-stations only.
    #[serde(default)]
    pub parent_station_id: Option<String>,
    #[serde(default, with = "time::serde::iso8601::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl FireStation {
    pub fn is_root(&self) -> bool {
        self.parent_station_id.is_none()
    }
}
