use flare_admin::domain::documents::DocumentStore;
use flare_admin::infrastructure::auth::JwtAuthService;
use flare_admin::infrastructure::config::{AppConfig, StoreBackend};
use flare_admin::infrastructure::db;
use flare_admin::infrastructure::firebase::FirebaseAuthProvider;
use flare_admin::infrastructure::password::RandomPasswordGenerator;
use flare_admin::infrastructure::state::AppState;
use flare_admin::infrastructure::store::{
    memory::InMemoryDocumentStore, postgres::PostgresDocumentStore,
};
use flare_admin::presentation;

use dotenvy::dotenv;
use std::env;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_with_signal().await
}

async fn run_with_signal() -> anyhow::Result<()> {
    run(async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run<F>(shutdown_signal: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();

    // Ignore the error: tests may initialise more than once
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "flare_admin=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    let config = AppConfig::from_env()?;

    let (listener, app) = bootstrap(&config).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match &config.store {
        StoreBackend::Postgres { database_url } => {
            let pool = db::connect_and_migrate(database_url, &config.pool).await?;
            Ok(Arc::new(PostgresDocumentStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory document store; data is lost on shutdown");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
    }
}

async fn bootstrap(config: &AppConfig) -> anyhow::Result<(tokio::net::TcpListener, axum::Router)> {
    let store = open_store(config).await?;

    let state = AppState::new(
        store,
        Arc::new(FirebaseAuthProvider::new(&config.firebase)),
        Arc::new(RandomPasswordGenerator::default()),
        config.verification.clone(),
        Arc::new(JwtAuthService::from_settings(&config.jwt)?),
    )
    .await?;

    let app = presentation::router::app(state, &config.http)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::debug!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    Ok((listener, app))
}
