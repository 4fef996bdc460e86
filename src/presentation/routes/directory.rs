use crate::presentation::handlers::directory;
use axum::{Router, routing::get};

use crate::infrastructure::state::AppState;

/// Directory lookups by email and station hierarchy
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admins", get(directory::get_admin_by_email))
        .route("/stations", get(directory::get_station_by_email))
        .route(
            "/stations/{id}/sub-stations",
            get(directory::list_sub_stations),
        )
        .route("/stations/{id}/drivers", get(directory::list_station_drivers))
}
