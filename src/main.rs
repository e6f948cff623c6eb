use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tradecalc::{
    api, init_db, CalculatorSession, Catalog, Config, FileCatalog, PersistenceBridge,
    SqliteSlotStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("configuration error")?;

    let catalog = Catalog::load(&FileCatalog::new(&config.catalog_path))
        .await
        .with_context(|| format!("failed to load catalog from {}", config.catalog_path))?;

    let pool = init_db(&config.database_path)
        .await
        .context("failed to initialize database")?;
    let bridge = PersistenceBridge::new(
        Arc::new(SqliteSlotStorage::new(pool)),
        config.snapshot_slot.clone(),
    )
    .with_basis_persistence(config.persist_basis);

    // The restore offer is resolved before any command can mutate the store.
    let mut session = CalculatorSession::new(bridge);
    let restore = session.mount().await?.status();
    tracing::info!(?restore, "session mounted");

    let port = config.port;
    let app = api::create_router(api::AppState::new(session, catalog, config));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
