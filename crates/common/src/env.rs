//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the static assets directory is missing; requests for
/// non-API paths will 404 until it exists.
pub async fn ensure_env(static_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(static_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{static_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%static_dir, "static assets directory not found; static assets may 404");
            Ok(())
        }
    }
}
