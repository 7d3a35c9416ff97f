use axum::http::{header, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use wms_api::{build_router, AppState};
use wms_core::repositories::{SectionRepository, UtilizationRepository, WarehouseRepository};
use wms_infrastructure::{
    create_pool, run_migrations, MemoryStore, PgSectionRepository, PgUtilizationRepository,
    PgWarehouseRepository,
};
use wms_shared::config::{AppConfig, StorageBackend};
use wms_shared::telemetry::init_telemetry;

struct Repositories {
    warehouses: Arc<dyn WarehouseRepository>,
    sections: Arc<dyn SectionRepository>,
    utilization: Arc<dyn UtilizationRepository>,
}

async fn build_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database).await?;
            run_migrations(&pool).await?;
            info!("Database connection established.");

            Ok(Repositories {
                warehouses: Arc::new(PgWarehouseRepository::new(pool.clone())),
                sections: Arc::new(PgSectionRepository::new(pool.clone())),
                utilization: Arc::new(PgUtilizationRepository::new(pool)),
            })
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok(Repositories {
                warehouses: store.clone(),
                sections: store.clone(),
                utilization: store,
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize telemetry
    init_telemetry(&config.log)?;
    info!("{} starting ({})", config.app.name, config.app.env);

    let repos = build_repositories(&config).await?;

    let state = AppState::new(
        repos.warehouses,
        repos.sections,
        repos.utilization,
        config.dashboard.undo_window_ms,
        config.cron.secret.as_deref(),
    );
    if !state.cron_auth.is_configured() {
        warn!("CRON__SECRET is not set; the daily utilization job will be rejected");
    }

    let app = build_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
