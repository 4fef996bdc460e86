use crate::infrastructure::config::HttpSettings;
use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::middleware::{cors::cors_layer, rate_limit::rate_limit_layer};
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn app(state: AppState, http: &HttpSettings) -> anyhow::Result<Router> {
    let admin = Router::new()
        .nest("/directory", routes::directory::routes())
        .nest("/stations", routes::stations::routes())
        .nest("/drivers", routes::drivers::routes())
        .layer(rate_limit_layer(http.rate_limit_per_minute)?);

    Ok(Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(handlers::health::health_check))
        .nest("/api/v1/admin", admin)
        .layer(cors_layer(&http.cors_allowed_origins)?)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
