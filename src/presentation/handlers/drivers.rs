use crate::application::drivers::workflow::ManageDriversState;
use crate::domain::drivers::{DEFAULT_STATUS, Driver};
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::AuthAdmin;
use crate::shared::error::{AppError, ErrorResponse};
use crate::shared::response::{JsonApiMeta, JsonApiResource, JsonApiResponse};
use crate::shared::validation::JsonBody;
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
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DriverResource {
    pub full_name: String,
    pub email: String,
    pub contact: String,
    pub station_id: String,
    pub station_name: String,
    pub status: String,
    pub auth_uid: String,
    #[serde(with = "time::serde::iso8601")]
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Driver> for DriverResource {
    fn from(driver: Driver) -> Self {
        Self {
            full_name: driver.full_name,
            email: driver.email,
            contact: driver.contact,
            station_id: driver.station_id,
            station_name: driver.station_name,
            status: driver.status,
            auth_uid: driver.auth_uid,
            created_at: driver.created_at,
        }
    }
}

/// A newly created driver, including the password it was issued.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedDriverResource {
    #[serde(flatten)]
    pub driver: DriverResource,
    pub initial_password: String,
}

pub fn driver_resource(driver: Driver) -> JsonApiResource<DriverResource> {
    JsonApiResource::new("drivers", driver.id.clone(), DriverResource::from(driver))
}

fn driver_resources(drivers: Vec<Driver>) -> Vec<JsonApiResource<DriverResource>> {
    drivers.into_iter().map(driver_resource).collect()
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[schema(example = "Juan Dela Cruz")]
    #[serde(default)]
    pub full_name: String,
    #[schema(example = "juan@example.com")]
    #[serde(default)]
    pub email: String,
    #[schema(example = "09123456789")]
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub station_id: String,
    /// Defaults to "Active"
    #[serde(default)]
    pub status: Option<String>,
    /// Must be true for the driver to be created
    #[serde(default)]
    pub confirmed: bool,
}

/// Create a driver account
///
/// Creates the authentication credential, sends the verification email and
/// records the driver.
#[utoipa::path(
    post,
    path = "/api/v1/admin/drivers",
    request_body = CreateDriverRequest,
    responses(
        (status = 201, description = "Driver created, verification email sent", body = JsonApiResponse<JsonApiResource<ProvisionedDriverResource>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Creation not confirmed", body = ErrorResponse),
        (status = 422, description = "Malformed body or required field missing", body = ErrorResponse),
        (status = 502, description = "Authentication provider or document store failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "drivers"
)]
pub async fn create_driver(
    State(state): State<AppState>,
    auth: AuthAdmin,
    JsonBody(req): JsonBody<CreateDriverRequest>,
) -> Result<impl IntoResponse, AppError> {
    let stations = state.stations.snapshot();

    let screen = ManageDriversState::default()
        .open_form()
        .edit(|form| {
            form.driver_name = req.full_name;
            form.driver_email = req.email;
            form.driver_contact = req.contact;
            form.status = req.status.unwrap_or_else(|| DEFAULT_STATUS.to_string());
        })
        .select_station(req.station_id, &stations);

    let use_case = state.provision_use_case();
    let (screen, result) = screen.submit(req.confirmed, &use_case).await;
    tracing::debug!(admin = %auth.admin.email, phase = ?screen.phase, notice = ?screen.notice, "Driver form submitted");

    let driver = result?;
    let resource = JsonApiResource::new(
        "drivers",
        driver.id.clone(),
        ProvisionedDriverResource {
            initial_password: driver.password.clone(),
            driver: DriverResource::from(driver),
        },
    );

    Ok((StatusCode::CREATED, Json(JsonApiResponse::new(resource))))
}

/// List drivers, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/drivers",
    responses(
        (status = 200, description = "Current driver listing", body = JsonApiResponse<Vec<JsonApiResource<DriverResource>>>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "drivers"
)]
pub async fn list_drivers(
    State(state): State<AppState>,
    _auth: AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let resources = driver_resources(state.drivers.snapshot());
    let meta = JsonApiMeta::new().with_total(resources.len());

    Ok((
        StatusCode::OK,
        Json(JsonApiResponse::new(resources).with_meta(meta)),
    ))
}

/// Stream the driver listing as server-sent events
#[utoipa::path(
    get,
    path = "/api/v1/admin/drivers/events",
    responses(
        (status = 200, description = "`drivers` events, one per change"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "drivers"
)]
pub async fn driver_events(
    State(state): State<AppState>,
    _auth: AuthAdmin,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = state.drivers.watch().map(|drivers| {
        Event::default()
            .event("drivers")
            .json_data(driver_resources(drivers))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
