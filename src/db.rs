use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use std::time::Duration;
use tracing::{info, warn};

const CONNECT_ATTEMPTS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect to the database with a bounded retry budget. The server must not
/// accept requests until this succeeds; an exhausted budget bubbles the error
/// up so the process exits non-zero.
pub async fn init_db(database_url: &str) -> anyhow::Result<MySqlPool> {
    let mut delay = Duration::from_secs(1);

    for attempt in 1..=CONNECT_ATTEMPTS {
        match MySqlPoolOptions::new()
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
        {
            Ok(pool) => {
                info!(attempt, "Database connected");
                return Ok(pool);
            }
            Err(e) if attempt < CONNECT_ATTEMPTS => {
                warn!(error = %e, attempt, "Database connection failed, retrying");
                actix_web::rt::time::sleep(delay).await;
                delay *= 2;
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!(
                    "database unreachable after {CONNECT_ATTEMPTS} attempts"
                )));
            }
        }
    }

    unreachable!("retry loop returns on the final attempt")
}
