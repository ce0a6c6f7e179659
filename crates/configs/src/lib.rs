use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub naver: NaverConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// Base used when composing absolute URLs for uploaded files.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            worker_threads: Some(4),
            public_base_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 {
    5
}
fn default_min_connections() -> u32 {
    1
}
fn default_connect_timeout() -> u64 {
    30
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_max_lifetime() -> u64 {
    3600
}
fn default_acquire_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self { dir: default_upload_dir() }
    }
}

fn default_upload_dir() -> String {
    "uploads".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaverConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_naver_api_base")]
    pub api_base: String,
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_base: default_naver_api_base(),
        }
    }
}

fn default_naver_api_base() -> String {
    "https://openapi.naver.com".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrdersConfig {
    /// How many cart submissions the in-memory log keeps.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
    /// How many entries `/api/get_orders` returns.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self { log_capacity: default_log_capacity(), recent_limit: default_recent_limit() }
    }
}

fn default_log_capacity() -> usize {
    500
}
fn default_recent_limit() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: default_seed_enabled() }
    }
}

fn default_seed_enabled() -> bool {
    true
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/moble_store.db?mode=rwc";

/// `CONFIG_PATH` (default `config.toml`) when that file exists, otherwise
/// defaults plus env overrides. Validated either way.
pub fn load() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return AppConfig::from_env();
    }
    let mut cfg = load_from_file(&path)?;
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config used when no file is present: defaults plus env overrides.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.uploads.normalize_from_env();
        self.naver.normalize_from_env();
        self.orders.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        if matches!(self.worker_threads, Some(0) | None) {
            let from_env = std::env::var("TOKIO_WORKER_THREADS")
                .ok()
                .and_then(|v| v.parse::<usize>().ok());
            self.worker_threads = Some(from_env.filter(|n| *n > 0).unwrap_or(4));
        }
        if self.public_base_url.trim().is_empty() {
            self.public_base_url = std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://127.0.0.1:{}", self.port));
        }
        self.public_base_url = self.public_base_url.trim_end_matches('/').to_string();
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // fall back to DATABASE_URL, then to the bundled sqlite file
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url must start with sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl UploadConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            if !dir.trim().is_empty() {
                self.dir = dir;
            }
        }
        if self.dir.trim().is_empty() {
            self.dir = default_upload_dir();
        }
    }
}

impl NaverConfig {
    fn normalize_from_env(&mut self) {
        if self.client_id.trim().is_empty() {
            self.client_id = std::env::var("NAVER_CLIENT_ID").unwrap_or_default();
        }
        if self.client_secret.trim().is_empty() {
            self.client_secret = std::env::var("NAVER_CLIENT_SECRET").unwrap_or_default();
        }
        self.api_base = self.api_base.trim_end_matches('/').to_string();
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

impl OrdersConfig {
    fn validate(&self) -> Result<()> {
        if self.log_capacity == 0 {
            return Err(anyhow!("orders.log_capacity must be >= 1"));
        }
        if self.recent_limit == 0 {
            return Err(anyhow!("orders.recent_limit must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8088

            [orders]
            log_capacity = 10
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.orders.log_capacity, 10);
        assert_eq!(cfg.orders.recent_limit, 5);
        assert_eq!(cfg.uploads.dir, "uploads");
        assert_eq!(cfg.naver.api_base, "https://openapi.naver.com");
        assert!(cfg.seed.enabled);
    }

    #[test]
    fn rejects_non_sqlite_url() {
        let db = DatabaseConfig {
            url: "postgres://localhost/db".into(),
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let db = DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 2,
            ..DatabaseConfig::default()
        };
        assert!(db.validate().is_err());
    }

    #[test]
    fn rejects_zero_port_and_log_capacity() {
        let mut server = ServerConfig { port: 0, ..ServerConfig::default() };
        assert!(server.normalize().is_err());

        let orders = OrdersConfig { log_capacity: 0, recent_limit: 5 };
        assert!(orders.validate().is_err());
    }

    #[test]
    fn public_base_url_loses_trailing_slash() {
        let mut server = ServerConfig {
            public_base_url: "http://shop.local/".into(),
            ..ServerConfig::default()
        };
        server.normalize().unwrap();
        assert_eq!(server.public_base_url, "http://shop.local");
        assert_eq!(server.worker_threads, Some(4));
    }
}
