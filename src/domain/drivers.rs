use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

use super::documents::{StoreError, collections};

pub const DEFAULT_STATUS: &str = "Active";

pub fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub contact: String,
    pub station_id: String,
    /// Copy of the station name taken when the driver was created.
    #[serde(default)]
    pub station_name: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub auth_uid: String,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    /// Generated initial password, stored as issued.
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDriver {
    pub full_name: String,
    pub email: String,
    pub contact: String,
    pub station_id: String,
    pub station_name: String,
    pub status: String,
    pub auth_uid: String,
    #[serde(with = "time::serde::iso8601")]
    pub created_at: OffsetDateTime,
    pub password: String,
}

impl NewDriver {
    pub fn to_document(&self) -> Result<Map<String, Value>, StoreError> {
        let encode_error = |source| StoreError::Encode {
            collection: collections::DRIVERS.to_string(),
            source,
        };

        match serde_json::to_value(self).map_err(encode_error)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::Unavailable(
                "Driver did not encode to an object".to_string(),
            )),
        }
    }

    pub fn into_driver(self, id: String) -> Driver {
        Driver {
            id,
            full_name: self.full_name,
            email: self.email,
            contact: self.contact,
            station_id: self.station_id,
            station_name: self.station_name,
            status: self.status,
            auth_uid: self.auth_uid,
            created_at: self.created_at,
            password: self.password,
        }
    }
}
