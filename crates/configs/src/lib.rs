use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
    #[serde(default)]
    pub stok: StokConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 3000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one JSON file per collection.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Seed collections and default roles at startup.
    #[serde(default)]
    pub auto_setup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir(), auto_setup: false }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret; may also come from the JWT_SECRET env var.
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_hours: default_token_ttl_hours() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    /// Local directory product images are written to; served under /uploads.
    #[serde(default = "default_uploads_dir")]
    pub dir: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self { dir: default_uploads_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StokConfig {
    /// Stock level at or below which a warning notification goes out.
    #[serde(default = "default_kritik_seviye")]
    pub kritik_seviye: i64,
}

impl Default for StokConfig {
    fn default() -> Self {
        Self { kritik_seviye: default_kritik_seviye() }
    }
}

fn default_data_dir() -> String { "data".to_string() }
fn default_token_ttl_hours() -> i64 { 24 }
fn default_uploads_dir() -> String { "public/uploads".to_string() }
fn default_kritik_seviye() -> i64 { 10 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        // Env vars fill gaps the TOML leaves open
        self.store.normalize_from_env();
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.stok.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl StoreConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(dir) = std::env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = dir;
            }
        }
        if let Ok(flag) = std::env::var("AUTO_SETUP_DB") {
            self.auto_setup = flag.eq_ignore_ascii_case("true");
        }
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; the env var only fills an empty secret
        if self.jwt_secret.trim().is_empty() {
            if let Ok(secret) = std::env::var("JWT_SECRET") {
                self.jwt_secret = secret;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret must not be empty (set JWT_SECRET)"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(anyhow!("auth.token_ttl_hours must be >= 1"));
        }
        Ok(())
    }
}

impl StokConfig {
    pub fn validate(&self) -> Result<()> {
        if self.kritik_seviye < 0 {
            return Err(anyhow!("stok.kritik_seviye must be >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.store.data_dir, "data");
        assert!(!cfg.store.auto_setup);
        assert_eq!(cfg.auth.token_ttl_hours, 24);
        assert_eq!(cfg.uploads.dir, "public/uploads");
        assert_eq!(cfg.stok.kritik_seviye, 10);
    }

    #[test]
    fn sections_parse_and_validate() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 8080

            [store]
            data_dir = "var/depo"
            auto_setup = true

            [auth]
            jwt_secret = "s3cret"
            token_ttl_hours = 12

            [stok]
            kritik_seviye = 5
        "#;
        let mut cfg: AppConfig = toml::from_str(raw).unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.store.data_dir, "var/depo");
        assert!(cfg.store.auto_setup);
        assert_eq!(cfg.auth.token_ttl_hours, 12);
        assert_eq!(cfg.stok.kritik_seviye, 5);
    }

    #[test]
    fn empty_jwt_secret_is_rejected() {
        let mut auth = AuthConfig::default();
        assert!(auth.validate().is_err());
        auth.jwt_secret = "s3cret".into();
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.normalize_and_validate().is_err());
    }
}
