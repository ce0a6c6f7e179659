use std::{future::Future, net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::{NaverClient, ShopProvider};
use configs::AppConfig;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{errors::StartupError, routes, state::ServerState};
use service::{accounts::AccountConfig, runtime, seed};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// `config.toml` (or `CONFIG_PATH`) when present, otherwise defaults plus env.
pub fn load_config() -> Result<AppConfig, StartupError> {
    configs::load().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Directory holding a file-backed sqlite database, if any.
pub fn sqlite_data_dir(url: &str) -> Option<String> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let file = rest.split('?').next().unwrap_or_default();
    if file.is_empty() || file.starts_with(":memory:") {
        return None;
    }
    Path::new(file)
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
}

/// Connect, migrate, seed and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let data_dir = sqlite_data_dir(&cfg.database.url).unwrap_or_else(|| ".".to_string());
    runtime::ensure_env(&cfg.uploads.dir, &data_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = connect_with_config(&DatabaseConfig::from(&cfg.database)).await?;
    migration::Migrator::up(&db, None).await?;
    if cfg.seed.enabled {
        seed::seed_initial_data(&db).await?;
    }

    if !cfg.naver.has_credentials() {
        warn!("NAVER_CLIENT_ID/NAVER_CLIENT_SECRET not set; search and captcha calls will fail");
    }
    let provider: Arc<dyn ShopProvider> = Arc::new(NaverClient::new(
        cfg.naver.client_id.clone(),
        cfg.naver.client_secret.clone(),
        cfg.naver.api_base.clone(),
    ));
    let accounts_cfg = AccountConfig {
        public_base_url: cfg.server.public_base_url.clone(),
        upload_dir: cfg.uploads.dir.clone().into(),
    };
    let state = ServerState::new(
        db,
        provider,
        accounts_cfg,
        cfg.orders.log_capacity,
        cfg.orders.recent_limit,
    );
    Ok(routes::build_router(state, build_cors()))
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received, draining in-flight requests");
}

/// Serve the app built from `cfg` until `shutdown` resolves.
/// In-flight requests, including open cart transactions, run to completion.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        public_base_url = %cfg.server.public_base_url,
        "starting server"
    );
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_from_sqlite_url() {
        let dir = sqlite_data_dir("sqlite://data/moble_store.db?mode=rwc");
        assert_eq!(dir.as_deref(), Some("data"));
        let dir = sqlite_data_dir("sqlite:/var/lib/store/app.db");
        assert_eq!(dir.as_deref(), Some("/var/lib/store"));
        assert_eq!(sqlite_data_dir("sqlite://store.db"), None);
        assert_eq!(sqlite_data_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_data_dir("postgres://x/y"), None);
    }

    #[tokio::test]
    async fn run_returns_after_shutdown_resolves() -> anyhow::Result<()> {
        let mut cfg = AppConfig::default();
        cfg.server.host = "127.0.0.1".into();
        cfg.server.port = 0;
        cfg.database.url = "sqlite::memory:".into();
        cfg.database.max_connections = 1;
        cfg.database.min_connections = 1;
        let upload_dir = std::env::temp_dir().join(format!("moble-run-{}", uuid::Uuid::new_v4()));
        cfg.uploads.dir = upload_dir.to_string_lossy().into_owned();

        tokio::time::timeout(std::time::Duration::from_secs(10), run(cfg, async {})).await??;
        assert!(upload_dir.is_dir());
        Ok(())
    }
}
