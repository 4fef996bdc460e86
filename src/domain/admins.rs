use serde::{Deserialize, Serialize};

/// An administrator of the dispatch application. Created elsewhere and only
/// read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,
    pub email: String,
}
