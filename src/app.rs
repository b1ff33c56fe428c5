use std::future::Future;
use std::time::Duration;

use crate::auth::verify_password;
use crate::config::Config;
use crate::db::{Database, Snapshot};
use crate::error::{AppError, Result};
use crate::seed::Seed;

pub const SUCCESS_MESSAGE: &str = "Database reset successfully";

/// Drop, recreate and seed the four tables. All existing rows are lost.
///
/// The whole sequence runs in one transaction, so a failure at any step
/// leaves the database as it was.
pub async fn reset(config: &Config) -> Result<()> {
    // Hash before connecting so a hashing failure never touches the database.
    let seed = Seed::prepare(&config.seed)?;

    tracing::warn!(
        "Resetting {}: all articles, media, comments and admins will be deleted",
        config.describe_target()
    );

    with_timeout(config.timeout(), async {
        let mut db = Database::connect(config).await?;
        db.reset(seed).await?;
        db.close().await
    })
    .await?;

    tracing::info!("Reset {}", config.describe_target());
    Ok(())
}

pub async fn status(config: &Config) -> Result<Snapshot> {
    with_timeout(config.timeout(), async {
        let mut db = Database::connect(config).await?;
        let snapshot = db.snapshot().await?;
        db.close().await?;
        Ok::<_, AppError>(snapshot)
    })
    .await
}

/// Returns `Ok(())` only if `password` matches the stored hash for `username`.
pub async fn check_admin(config: &Config, username: &str, password: &str) -> Result<()> {
    let admin = with_timeout(config.timeout(), async {
        let mut db = Database::connect(config).await?;
        let admin = db.admin(username).await?;
        db.close().await?;
        Ok::<_, AppError>(admin)
    })
    .await?
    .ok_or_else(|| AppError::AdminNotFound(username.to_string()))?;

    if verify_password(password, &admin.password_hash)? {
        Ok(())
    } else {
        Err(AppError::PasswordMismatch(username.to_string()))
    }
}

async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| AppError::Timeout(limit))?
}
