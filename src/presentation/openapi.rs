use crate::presentation::handlers::directory::AdminResource;
use crate::presentation::handlers::drivers::{
    CreateDriverRequest, DriverResource, ProvisionedDriverResource,
};
use crate::presentation::handlers::stations::StationResource;
use crate::shared::error::{ErrorResponse, JsonApiError};
use crate::shared::response::JsonApiMeta;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flare Admin API",
        version = "0.1.0",
        description = "Administration API for the fire-station dispatch application\n\nResponses follow the JSON:API v1.1 document structure."
    ),
    paths(
        crate::presentation::handlers::directory::get_admin_by_email,
        crate::presentation::handlers::directory::get_station_by_email,
        crate::presentation::handlers::directory::list_sub_stations,
        crate::presentation::handlers::directory::list_station_drivers,
        crate::presentation::handlers::stations::list_stations,
        crate::presentation::handlers::stations::station_events,
        crate::presentation::handlers::drivers::create_driver,
        crate::presentation::handlers::drivers::list_drivers,
        crate::presentation::handlers::drivers::driver_events,
    ),
    components(
        schemas(
            CreateDriverRequest,
            AdminResource,
            StationResource,
            DriverResource,
            ProvisionedDriverResource,
            JsonApiMeta,
            ErrorResponse,
            JsonApiError,
        )
    ),
    tags(
        (name = "directory", description = "Admin and station lookups"),
        (name = "stations", description = "Live fire station listing"),
        (name = "drivers", description = "Driver provisioning and live listing")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
