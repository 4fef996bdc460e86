use crate::application::directory::get_admin::GetAdminByEmailUseCase;
use crate::application::directory::get_station::GetFireStationByEmailUseCase;
use crate::application::directory::list_station_drivers::ListStationDriversUseCase;
use crate::application::directory::list_sub_stations::ListSubStationsUseCase;
use crate::domain::admins::Admin;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthAdmin;
use crate::presentation::handlers::drivers::{DriverResource, driver_resource};
use crate::presentation::handlers::stations::{StationResource, station_resource};
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct AdminResource {
    pub email: String,
}

impl From<Admin> for AdminResource {
    fn from(admin: Admin) -> Self {
        Self { email: admin.email }
    }
}

#[derive(Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Exact email to look up
    pub email: String,
}

/// Find an admin by email
#[utoipa::path(
    get,
    path = "/api/v1/admin/directory/admins",
    params(EmailQuery),
    responses(
        (status = 200, description = "Admin found", body = JsonApiResponse<JsonApiResource<AdminResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No admin with that email", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "directory"
)]
pub async fn get_admin_by_email(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetAdminByEmailUseCase::new(state.store.clone());

    match use_case.execute(&query.email).await? {
        Some(admin) => {
            let resource = JsonApiResource::new("admins", admin.id.clone(), AdminResource::from(admin));
            Ok((StatusCode::OK, Json(JsonApiResponse::new(resource))))
        }
        None => Err(AppError::NotFound("Admin not found".to_string())),
    }
}

/// Find a fire station by email
#[utoipa::path(
    get,
    path = "/api/v1/admin/directory/stations",
    params(EmailQuery),
    responses(
        (status = 200, description = "Station found", body = JsonApiResponse<JsonApiResource<StationResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No station with that email", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "directory"
)]
pub async fn get_station_by_email(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = GetFireStationByEmailUseCase::new(state.store.clone());

    match use_case.execute(&query.email).await? {
        Some(station) => Ok((
            StatusCode::OK,
            Json(JsonApiResponse::new(station_resource(station))),
        )),
        None => Err(AppError::NotFound("Fire station not found".to_string())),
    }
}

/// List the sub-stations of a station
#[utoipa::path(
    get,
    path = "/api/v1/admin/directory/stations/{id}/sub-stations",
    params(
        ("id" = String, Path, description = "Parent station ID")
    ),
    responses(
        (status = 200, description = "Sub-stations, possibly none", body = JsonApiResponse<Vec<JsonApiResource<StationResource>>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "directory"
)]
pub async fn list_sub_stations(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = ListSubStationsUseCase::new(state.store.clone());

    let resources: Vec<_> = use_case
        .execute(&id)
        .await?
        .into_iter()
        .map(station_resource)
        .collect();
    let meta = JsonApiMeta::new().with_total(resources.len());

    Ok((
        StatusCode::OK,
        Json(JsonApiResponse::new(resources).with_meta(meta)),
    ))
}

/// List the drivers assigned to a station
#[utoipa::path(
    get,
    path = "/api/v1/admin/directory/stations/{id}/drivers",
    params(
        ("id" = String, Path, description = "Station ID")
    ),
    responses(
        (status = 200, description = "Drivers, possibly none", body = JsonApiResponse<Vec<JsonApiResource<DriverResource>>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "directory"
)]
pub async fn list_station_drivers(
    State(state): State<AppState>,
    _auth: AuthAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let use_case = ListStationDriversUseCase::new(state.store.clone());

    let resources: Vec<_> = use_case
        .execute(&id)
        .await?
        .into_iter()
        .map(driver_resource)
        .collect();
    let meta = JsonApiMeta::new().with_total(resources.len());

    Ok((
        StatusCode::OK,
        Json(JsonApiResponse::new(resources).with_meta(meta)),
    ))
}
