use crate::presentation::handlers::drivers;
use axum::{Router, routing::get};

use crate::infrastructure::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(drivers::list_drivers).post(drivers::create_driver))
        .route("/events", get(drivers::driver_events))
}
