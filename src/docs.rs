use crate::model::employee::{Employee, Gender};
use crate::models::LoginReqDto;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Directory API",
        version = "1.0.0",
        description = r#"
## Employee-Record Administration

An authenticated admin manages employee profile records: create, list,
view, edit, and delete, with an optional photo upload per record.

### 🔐 Security
`POST /api/login` returns a bearer token; every `/api/employees` route
requires it in the `Authorization` header.

### 📦 Uploads
Employee photos are sent as the `image` part of a multipart form
(JPEG/PNG/GIF, max 5 MiB) and served back under `/uploads/`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
    ),
    components(
        schemas(
            LoginReqDto,
            Employee,
            Gender,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Admin authentication"),
        (name = "Employee", description = "Employee record management"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
