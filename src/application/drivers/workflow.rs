//! State of the "manage drivers" admin screen.
//!
//! Each transition takes the current state by value and returns the next
//! one, so the form, modal and loading flags travel together instead of
//! living in shared mutable fields.

use crate::application::drivers::form::DriverForm;
use crate::application::drivers::provision::{ProvisionDriverUseCase, ProvisioningError};
use crate::domain::drivers::Driver;
use crate::domain::stations::FireStation;

pub const DRIVER_CREATED_MESSAGE: &str = "Driver Created! Verification email sent.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    FormOpen,
    Submitting,
}

/// Message shown to the administrator after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Invalid(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageDriversState {
    pub phase: Phase,
    pub show_modal: bool,
    pub is_loading: bool,
    pub form: DriverForm,
    pub notice: Option<Notice>,
}

impl Default for ManageDriversState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            show_modal: false,
            is_loading: false,
            form: DriverForm::default(),
            notice: None,
        }
    }
}

impl ManageDriversState {
    /// Show the creation form. Previously entered values are kept.
    pub fn open_form(mut self) -> Self {
        self.phase = Phase::FormOpen;
        self.show_modal = true;
        self.notice = None;
        self
    }

    /// Hide the form without clearing it.
    pub fn close_form(mut self) -> Self {
        self.phase = Phase::Idle;
        self.show_modal = false;
        self
    }

    pub fn edit(mut self, change: impl FnOnce(&mut DriverForm)) -> Self {
        change(&mut self.form);
        self
    }

    /// Select a station against the currently loaded station list.
    pub fn select_station(mut self, station_id: impl Into<String>, stations: &[FireStation]) -> Self {
        self.form.select_station(station_id, stations);
        self
    }

    /// Validate, confirm and run provisioning.
    ///
    /// Validation and confirmation failures leave the form open with no side
    /// effects. A provider failure keeps the form open with the entered
    /// values and the provider message as the notice. Success resets the
    /// form and returns to `Idle`. The loading flag is cleared on every path.
    pub async fn submit(
        self,
        confirmed: bool,
        provisioner: &ProvisionDriverUseCase,
    ) -> (Self, Result<Driver, ProvisioningError>) {
        if self.phase != Phase::FormOpen {
            return (self, Err(ProvisioningError::FormClosed));
        }

        if !self.form.has_required_fields() {
            let err = ProvisioningError::MissingFields;
            let next = Self {
                notice: Some(Notice::Invalid(err.to_string())),
                ..self
            };
            return (next, Err(err));
        }

        if !confirmed {
            return (self, Err(ProvisioningError::Declined));
        }

        let mut submitting = Self {
            phase: Phase::Submitting,
            is_loading: true,
            notice: None,
            ..self
        };

        let result = provisioner.execute(&submitting.form).await;
        submitting.is_loading = false;

        match result {
            Ok(driver) => {
                let next = Self {
                    notice: Some(Notice::Success(DRIVER_CREATED_MESSAGE.to_string())),
                    ..Self::default()
                };
                (next, Ok(driver))
            }
            Err(err) => {
                let next = Self {
                    phase: Phase::FormOpen,
                    notice: Some(Notice::Error(err.to_string())),
                    ..submitting
                };
                (next, Err(err))
            }
        }
    }
}
