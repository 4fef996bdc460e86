use crate::domain::stations::FireStation;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthAdmin;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, StreamExt};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationResource {
    pub email: String,
    pub station_name: Option<String>,
    pub parent_station_id: Option<String>,
    /// True when the station has no parent
    pub is_root: bool,
    #[serde(with = "time::serde::iso8601::option")]
    #[schema(value_type = Option<String>)]
    pub created_at: Option<time::OffsetDateTime>,
}

impl From<FireStation> for StationResource {
    fn from(station: FireStation) -> Self {
        Self {
            is_root: station.is_root(),
            email: station.email,
            station_name: station.station_name,
            parent_station_id: station.parent_station_id,
            created_at: station.created_at,
        }
    }
}

pub fn station_resource(station: FireStation) -> JsonApiResource<StationResource> {
    JsonApiResource::new("fireStations", station.id.clone(), StationResource::from(station))
}

fn station_resources(stations: Vec<FireStation>) -> Vec<JsonApiResource<StationResource>> {
    stations.into_iter().map(station_resource).collect()
}

/// List fire stations, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/stations",
    responses(
        (status = 200, description = "Current station listing", body = JsonApiResponse<Vec<JsonApiResource<StationResource>>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "stations"
)]
pub async fn list_stations(
    State(state): State<AppState>,
    _auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let resources = station_resources(state.stations.snapshot());
    let meta = JsonApiMeta::new().with_total(resources.len());

    Ok((
        StatusCode::OK,
        Json(JsonApiResponse::new(resources).with_meta(meta)),
    ))
}

/// Stream the station listing as server-sent events
#[utoipa::path(
    get,
    path = "/api/v1/admin/stations/events",
    responses(
        (status = 200, description = "`stations` events, one per change"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "stations"
)]
pub async fn station_events(
    State(state): State<AppState>,
    _auth: AuthAdmin,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = state.stations.watch().map(|stations| {
        Event::default()
            .event("stations")
            .json_data(station_resources(stations))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
