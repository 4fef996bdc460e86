use crate::presentation::handlers::stations;
use axum::{Router, routing::get};

use crate::infrastructure::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stations::list_stations))
        .route("/events", get(stations::station_events))
}
