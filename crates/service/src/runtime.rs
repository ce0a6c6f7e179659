//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binaries can call
//! `service::runtime::ensure_env` without depending directly on `common`.

/// Create the upload and data directories if missing.
pub async fn ensure_env(upload_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(upload_dir, data_dir).await
}
