use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "admin@admin.com")]
    pub email: String,
    pub password: String,
}

#[derive(FromRow)]
pub struct AdminSql {
    pub id: u64,
    pub email: String,
    /// Argon2 PHC-format hash, never the plaintext.
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub admin_id: u64,
    /// Admin email.
    pub sub: String,
    pub exp: usize,
    pub jti: String,
}
