use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use dotenvy::dotenv;
use std::time::Duration;

use empdir::auth::bootstrap::ensure_default_admin;
use empdir::config::Config;
use empdir::db::init_db;
use empdir::directory::EmployeeDirectory;
use empdir::docs::ApiDoc;
use empdir::routes;
use empdir::upload::UPLOAD_URL_PREFIX;

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Access logs from the actix Logger middleware go through the log facade.
    env_logger::init();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    // No requests are accepted until the database is reachable, the schema
    // is current, and the admin account exists.
    let pool = init_db(&config.database_url).await?;

    sqlx::migrate!().run(&pool).await?;

    ensure_default_admin(&pool, &config).await?;

    std::fs::create_dir_all(&config.upload_dir)?;

    let directory = EmployeeDirectory::new(pool.clone());

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&config_data.cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials();

        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(cors)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .service(actix_files::Files::new(
                UPLOAD_URL_PREFIX,
                config_data.upload_dir.clone(),
            ))
            .app_data(Data::new(pool.clone()))
            .app_data(Data::new(config_data.clone()))
            .app_data(Data::new(directory.clone()))
            .configure(|cfg| routes::configure(cfg, &config_data))
    })
    .client_request_timeout(Duration::from_secs(10))
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
