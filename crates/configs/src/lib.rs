use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            worker_threads: Some(4),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub uri: String,
    /// Database name; when unset the URI's default database is used, then `favs`.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_server_selection_timeout")]
    pub server_selection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            name: None,
            collection: default_collection(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
            server_selection_timeout_secs: default_server_selection_timeout(),
        }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 3001 }
fn default_static_dir() -> String { "dist".into() }
fn default_collection() -> String { "favorites".into() }
fn default_max_pool_size() -> u32 { 10 }
fn default_min_pool_size() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 10 }
fn default_server_selection_timeout() -> u64 { 10 }

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
    /// Load `config.toml` if present (defaults otherwise), apply environment
    /// overrides and validate. A missing connection string is fatal here.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env_overrides(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment wins over the file for every key it names.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.server.static_dir = dir;
        }
        if let Some(uri) = lookup("MONGODB_URI") {
            self.database.uri = uri;
        }
        if let Some(name) = lookup("MONGODB_DB") {
            self.database.name = Some(name);
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        if self.static_dir.trim().is_empty() {
            self.static_dir = default_static_dir();
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        let uri = self.uri.trim();
        if uri.is_empty() {
            return Err(anyhow!("database.uri is empty; set it in config.toml or MONGODB_URI"));
        }
        if !(uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database.uri must start with mongodb:// or mongodb+srv://"));
        }
        if self.collection.trim().is_empty() {
            return Err(anyhow!("database.collection must not be empty"));
        }
        if self.max_pool_size < self.min_pool_size {
            return Err(anyhow!("database.max_pool_size must be >= min_pool_size"));
        }
        if self.connect_timeout_secs == 0 || self.server_selection_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_listen_on_3001() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 3001);
        assert_eq!(cfg.server.static_dir, "dist");
        assert_eq!(cfg.database.collection, "favorites");
    }

    #[test]
    fn missing_uri_is_fatal() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[]));
        let err = cfg.normalize_and_validate().unwrap_err();
        assert!(err.to_string().contains("MONGODB_URI"));
    }

    #[test]
    fn env_overrides_uri_and_port() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[
            ("MONGODB_URI", "mongodb://localhost:27017/favs"),
            ("PORT", "8080"),
        ]));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.database.uri, "mongodb://localhost:27017/favs");
    }

    #[test]
    fn unparseable_port_keeps_default() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(env(&[("MONGODB_URI", "mongodb://h"), ("PORT", "abc")]));
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 3001);
    }

    #[test]
    fn rejects_non_mongodb_scheme() {
        let mut cfg = AppConfig::default();
        cfg.database.uri = "postgres://localhost/db".into();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let mut cfg = AppConfig::default();
        cfg.database.uri = "mongodb://localhost".into();
        cfg.database.min_pool_size = 5;
        cfg.database.max_pool_size = 2;
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn parses_toml_with_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 4000

            [database]
            uri = "mongodb+srv://cluster.example.net"
            name = "favorites_db"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.name.as_deref(), Some("favorites_db"));
        assert_eq!(cfg.database.max_pool_size, 10);
    }

    #[test]
    fn zero_worker_threads_normalized() {
        let mut cfg = AppConfig::default();
        cfg.database.uri = "mongodb://localhost".into();
        cfg.server.worker_threads = Some(0);
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
