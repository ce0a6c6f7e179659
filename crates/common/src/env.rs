//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the upload and data directories exist, creating them when missing.
pub async fn ensure_env(upload_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    for dir in [upload_dir, data_dir] {
        if tokio::fs::metadata(dir).await.is_err() {
            info!(%dir, "creating missing directory");
        }
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {dir}: {e}"))?;
    }
    Ok(())
}
