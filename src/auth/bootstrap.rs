use crate::auth::password::hash_password;
use crate::config::Config;
use sqlx::MySqlPool;
use tracing::info;

/// Idempotent startup provisioning of the admin account. Guarded by an
/// existence check; the unique index on `admins.email` backstops a concurrent
/// first boot. Credentials come from configuration, never from code.
pub async fn ensure_default_admin(pool: &MySqlPool, config: &Config) -> anyhow::Result<()> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE email = ? LIMIT 1)")
            .bind(&config.admin_email)
            .fetch_one(pool)
            .await?;

    if exists {
        return Ok(());
    }

    let hashed = hash_password(&config.admin_password)
        .map_err(|e| anyhow::anyhow!("failed to hash admin password: {e}"))?;

    sqlx::query("INSERT INTO admins (email, password) VALUES (?, ?)")
        .bind(&config.admin_email)
        .bind(&hashed)
        .execute(pool)
        .await?;

    info!(email = %config.admin_email, "Default admin created");
    Ok(())
}
