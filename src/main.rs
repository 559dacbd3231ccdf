use std::net::SocketAddr;
use std::sync::Arc;

use assessment_backend::{
    build_router,
    config::{get_config, init_config},
    database::{
        pool::{create_pool, run_migrations},
        postgres::PgStore,
    },
    middleware::cors::cors_for_origin,
    storage::local::LocalBlobStore,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let pool = create_pool().await?;
    run_migrations(&pool).await?;

    tokio::fs::create_dir_all(&config.uploads_dir).await?;
    info!("Serving uploads from: {}", config.uploads_dir);
    let blobs = LocalBlobStore::new(
        &config.uploads_dir,
        format!("{}/uploads", config.public_origin),
    );

    let app_state = AppState::new(Arc::new(PgStore::new(pool)), Arc::new(blobs));

    let app = build_router(app_state)
        .nest_service(
            "/uploads",
            tower_http::services::ServeDir::new(&config.uploads_dir),
        )
        .layer(cors_for_origin(&config.public_origin));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
