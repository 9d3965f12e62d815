use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use catalog_api::catalog::service::CatalogService;
use catalog_api::config::{AppConfig, StoreBackend};
use catalog_api::storage::{InMemoryStore, PostgresStore, ProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, CATALOG_STORE, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();

    let store: Arc<dyn ProductStore> = match config.store {
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("DATABASE_URL is required when CATALOG_STORE=postgres")
            })?;
            tracing::info!("using postgres store");
            Arc::new(PostgresStore::connect(url).await?)
        }
        StoreBackend::Memory => {
            tracing::info!("using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let service = Arc::new(CatalogService::new(store));
    let app = catalog_api::app(service);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("catalog api listening on http://{bind_addr}");

    // ConnectInfo lets the ws endpoint derive observer identities from peer addresses.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
