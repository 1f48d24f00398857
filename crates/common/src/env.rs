//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the router is built.

use tracing::warn;

/// Warn when the admin frontend bundle is missing; the JSON API still works without it.
pub async fn ensure_env(frontend_dir: &str) -> anyhow::Result<()> {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("{frontend_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; static pages will 404");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ensure_env;

    #[tokio::test]
    async fn missing_frontend_dir_is_only_a_warning() {
        assert!(ensure_env("/definitely/not/here").await.is_ok());
    }

    #[tokio::test]
    async fn file_in_place_of_dir_is_rejected() {
        let tmp = std::env::temp_dir().join(format!("spa_admin_env_{}", std::process::id()));
        tokio::fs::write(&tmp, b"x").await.unwrap();
        let res = ensure_env(tmp.to_str().unwrap()).await;
        let _ = tokio::fs::remove_file(&tmp).await;
        assert!(res.is_err());
    }
}
