use std::env;

/// Runtime configuration, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Allow tests or deployments to override the port via env
        let port = env::var("CATALOG_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);

        let store = match env::var("CATALOG_STORE").as_deref() {
            Ok("postgres") | Ok("pg") => StoreBackend::Postgres,
            _ => StoreBackend::Memory,
        };

        let database_url = env::var("DATABASE_URL").ok();

        Self {
            port,
            store,
            database_url,
        }
    }
}
