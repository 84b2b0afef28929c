use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, auth::ServerState};
use service::{runtime, seed, storage::depo::DepoStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Missing config.toml is routine; defaults plus env vars cover it.
fn load_config() -> anyhow::Result<configs::AppConfig> {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(err) => {
            warn!(%err, "config.toml okunamadı, varsayılan yapılandırma kullanılıyor");
            let mut cfg = configs::AppConfig::default();
            cfg.normalize_and_validate()?;
            Ok(cfg)
        }
    }
}

/// Bind address from SERVER_HOST/SERVER_PORT env vars, falling back to the
/// loaded config.
fn load_bind_addr(cfg: &configs::AppConfig) -> anyhow::Result<SocketAddr> {
    let host = env::var("SERVER_HOST").unwrap_or_else(|_| cfg.server.host.clone());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(cfg.server.port);
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    runtime::ensure_env(&cfg.store.data_dir, &cfg.uploads.dir).await?;

    let store = DepoStore::open(&cfg.store.data_dir).await?;

    if cfg.store.auto_setup {
        seed::setup_database(&store).await?;
        info!("veritabani kurulumu tamamlandı");
    } else {
        info!("otomatik kurulum kapalı; POST /api/setup-database ile elle çalıştırılabilir");
    }

    let addr = load_bind_addr(&cfg)?;
    let state = ServerState::new(store, cfg);

    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    info!(%addr, "starting depo api server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
