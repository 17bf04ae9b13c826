use crate::{
    auth::{jwt::issue_token, password::verify_password},
    config::Config,
    error::ApiError,
    models::{AdminSql, LoginReqDto},
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};

/// Admin login. Succeeds with a bearer token; both unknown email and wrong
/// password collapse into the same 401 so the response does not reveal which
/// half was wrong.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Login successful", body = Object, example = json!({
            "token": "eyJhbGciOiJIUzI1NiJ9..."
        })),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(pool, config, user), fields(email = %user.email))]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    if user.email.trim().is_empty() || user.password.is_empty() {
        let missing = [("email", &user.email), ("password", &user.password)]
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| k.to_string())
            .collect();
        return Err(ApiError::Validation(missing));
    }

    debug!("Fetching admin from database");

    let admin = sqlx::query_as::<_, AdminSql>(
        r#"
        SELECT id, email, password
        FROM admins
        WHERE email = ?
        "#,
    )
    .bind(&user.email)
    .fetch_optional(pool.get_ref())
    .await?;

    let admin = match admin {
        Some(admin) => admin,
        None => {
            info!("Invalid credentials: admin not found");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&user.password, &admin.password) {
        info!("Invalid credentials: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    let token = issue_token(admin.id, admin.email, &config.jwt_secret, config.token_ttl)?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(json!({ "token": token })))
}
