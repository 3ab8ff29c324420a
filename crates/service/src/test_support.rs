#![cfg(test)]
use configs::DatabaseConfig;
use mongodb::Database;

/// Connect using `MONGODB_URI`; `None` when it is not set so DB tests skip.
pub async fn get_db() -> Result<Option<Database>, anyhow::Error> {
    let Ok(uri) = std::env::var("MONGODB_URI") else {
        eprintln!("MONGODB_URI missing; skip db tests");
        return Ok(None);
    };
    let cfg = DatabaseConfig {
        uri,
        name: Some("favs_test".into()),
        connect_timeout_secs: 5,
        server_selection_timeout_secs: 5,
        ..DatabaseConfig::default()
    };
    Ok(Some(models::db::connect(&cfg).await?))
}
