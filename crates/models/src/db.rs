use std::time::Duration;

use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Database};
use tracing::info;

const DEFAULT_DB_NAME: &str = "favs";

/// Connect, select the database and ping it once so a bad URI fails at
/// startup rather than on the first request. The URI itself is never logged.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Database> {
    let mut opts = ClientOptions::parse(cfg.uri.trim()).await?;
    opts.app_name = Some("favs_api".to_string());
    opts.max_pool_size = Some(cfg.max_pool_size);
    opts.min_pool_size = Some(cfg.min_pool_size);
    opts.connect_timeout = Some(Duration::from_secs(cfg.connect_timeout_secs));
    opts.server_selection_timeout = Some(Duration::from_secs(cfg.server_selection_timeout_secs));

    let name = resolve_db_name(cfg.name.as_deref(), opts.default_database.as_deref());
    info!(service = "server", event = "db_connecting", database = %name, "connecting to MongoDB");

    let client = Client::with_options(opts)?;
    let db = client.database(&name);
    db.run_command(doc! { "ping": 1 }, None).await?;

    info!(service = "server", event = "db_connected", database = %name, "connected to MongoDB");
    Ok(db)
}

fn resolve_db_name(configured: Option<&str>, from_uri: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or(from_uri)
        .unwrap_or(DEFAULT_DB_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_name_wins() {
        assert_eq!(resolve_db_name(Some("mine"), Some("uri_db")), "mine");
    }

    #[test]
    fn falls_back_to_uri_then_default() {
        assert_eq!(resolve_db_name(None, Some("uri_db")), "uri_db");
        assert_eq!(resolve_db_name(Some("  "), None), "favs");
    }

    #[tokio::test]
    async fn connect_rejects_unparseable_uri() {
        let cfg = DatabaseConfig { uri: "not-a-uri".into(), ..DatabaseConfig::default() };
        assert!(connect(&cfg).await.is_err());
    }
}
