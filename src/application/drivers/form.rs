use crate::domain::drivers::default_status;
use crate::domain::stations::FireStation;
use validator::{Validate, ValidationError};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Fields of the driver creation form.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DriverForm {
    #[validate(custom(function = "not_blank"))]
    pub driver_name: String,
    #[validate(custom(function = "not_blank"))]
    pub driver_email: String,
    #[validate(custom(function = "not_blank"))]
    pub driver_contact: String,
    #[validate(custom(function = "not_blank"))]
    pub selected_station_id: String,
    /// Display name resolved from the loaded station list.
    pub selected_station_name: String,
    pub status: String,
}

impl Default for DriverForm {
    fn default() -> Self {
        Self {
            driver_name: String::new(),
            driver_email: String::new(),
            driver_contact: String::new(),
            selected_station_id: String::new(),
            selected_station_name: String::new(),
            status: default_status(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl DriverForm {
    /// Select a station and cache its display name from `stations`.
    ///
    /// The name is empty when the id is not in the list or the station has
    /// no name.
    pub fn select_station(&mut self, station_id: impl Into<String>, stations: &[FireStation]) {
        self.selected_station_id = station_id.into();
        self.selected_station_name = stations
            .iter()
            .find(|s| s.id == self.selected_station_id)
            .and_then(|s| s.station_name.clone())
            .unwrap_or_default();
    }

    pub fn has_required_fields(&self) -> bool {
        self.validate().is_ok()
    }
}
