use crate::{
    auth::auth::AuthAdmin,
    config::Config,
    directory::{EmployeeDirectory, EmployeeUpdate, NewEmployee},
    error::ApiError,
    model::employee::{Employee, Gender},
    upload,
};
use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;
use serde_json::json;
use std::str::FromStr;
use tracing::error;

/// Multipart form fields as received; validation happens when converting
/// into the typed directory inputs.
#[derive(Debug, Default)]
struct EmployeeForm {
    name: Option<String>,
    email: Option<String>,
    mobile: Option<String>,
    designation: Option<String>,
    gender: Option<String>,
    course: Option<String>,
    /// Relative URL of an already-stored upload, set while draining the form.
    image: Option<String>,
}

impl EmployeeForm {
    fn set(&mut self, key: &str, value: String) {
        match key {
            "name" => self.name = Some(value),
            "email" => self.email = Some(value),
            "mobile" => self.mobile = Some(value),
            "designation" => self.designation = Some(value),
            "gender" => self.gender = Some(value),
            "course" => self.course = Some(value),
            // Unknown fields are dropped, not stored.
            _ => {}
        }
    }

    fn into_new_employee(self) -> Result<NewEmployee, ApiError> {
        let mut missing = Vec::new();

        let name = required(self.name, "name", &mut missing);
        let email = required(self.email, "email", &mut missing);
        let mobile = required(self.mobile, "mobile", &mut missing);
        let designation = required(self.designation, "designation", &mut missing);
        let gender = required(self.gender, "gender", &mut missing);
        let course = required(self.course, "course", &mut missing);

        if !missing.is_empty() {
            return Err(ApiError::Validation(missing));
        }

        let gender = Gender::from_str(gender.trim())
            .map_err(|_| ApiError::Validation(vec!["gender".to_string()]))?;

        Ok(NewEmployee {
            name,
            email,
            mobile,
            designation,
            gender,
            course,
            image: self.image,
        })
    }

    /// Empty-string fields count as "not supplied" so a partial form never
    /// blanks a stored value.
    fn into_update(self) -> Result<EmployeeUpdate, ApiError> {
        let gender = match self.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            Some(g) => Some(
                Gender::from_str(g).map_err(|_| ApiError::Validation(vec!["gender".to_string()]))?,
            ),
            None => None,
        };

        Ok(EmployeeUpdate {
            name: present(self.name),
            email: present(self.email),
            mobile: present(self.mobile),
            designation: present(self.designation),
            gender,
            course: present(self.course),
            image: self.image,
        })
    }
}

fn required(value: Option<String>, key: &'static str, missing: &mut Vec<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(key.to_string());
            String::new()
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

async fn read_text(field: &mut Field) -> Result<String, ApiError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(|e| {
        error!(error = %e, "multipart field stream failed");
        ApiError::BadPayload
    })? {
        data.extend_from_slice(&chunk);
    }
    String::from_utf8(data).map_err(|_| ApiError::BadPayload)
}

/// Drain the whole multipart payload; the `image` part (if any) is stored to
/// disk as it streams past, text parts are collected into the form.
async fn collect_form(payload: &mut Multipart, config: &Config) -> Result<EmployeeForm, ApiError> {
    let mut form = EmployeeForm::default();

    while let Some(mut field) = payload.try_next().await.map_err(|e| {
        error!(error = %e, "malformed multipart payload");
        ApiError::BadPayload
    })? {
        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or("")
            .to_string();

        if name == "image" {
            form.image = Some(upload::accept_upload(&mut field, &config.upload_dir).await?);
        } else {
            let value = read_text(&mut field).await?;
            form.set(&name, value);
        }
    }

    Ok(form)
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing or invalid fields", body = Object, example = json!({
            "message": "Missing or empty required fields",
            "fields": ["name", "email"]
        })),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_employee(
    _admin: AuthAdmin,
    directory: web::Data<EmployeeDirectory>,
    config: web::Data<Config>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    // TODO: unlink the stored upload again when field validation rejects the
    // request, instead of leaving an unreferenced file behind.
    let form = collect_form(&mut payload, &config).await?;
    let new = form.into_new_employee()?;

    let employee = directory.create(new).await?;

    Ok(HttpResponse::Created().json(employee))
}

/// List Employees, newest first
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees, newest first", body = [Employee]),
        (status = 401, description = "Not authenticated")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_employees(
    _admin: AuthAdmin,
    directory: web::Data<EmployeeDirectory>,
) -> Result<HttpResponse, ApiError> {
    let employees = directory.list().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_employee(
    _admin: AuthAdmin,
    directory: web::Data<EmployeeDirectory>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee = directory.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid fields"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_employee(
    _admin: AuthAdmin,
    directory: web::Data<EmployeeDirectory>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let form = collect_form(&mut payload, &config).await?;
    let update = form.into_update()?;

    let employee = directory.update(path.into_inner(), update).await?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "message": "Employee deleted successfully"
        })),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_employee(
    _admin: AuthAdmin,
    directory: web::Data<EmployeeDirectory>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    directory.delete_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Employee deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> EmployeeForm {
        EmployeeForm {
            name: Some("A".into()),
            email: Some("a@x.com".into()),
            mobile: Some("123".into()),
            designation: Some("Eng".into()),
            gender: Some("Other".into()),
            course: Some("CS".into()),
            image: None,
        }
    }

    #[test]
    fn complete_form_builds_new_employee() {
        let new = full_form().into_new_employee().unwrap();
        assert_eq!(new.name, "A");
        assert_eq!(new.gender, Gender::Other);
        assert_eq!(new.image, None);
    }

    #[test]
    fn missing_fields_are_all_listed() {
        let form = EmployeeForm {
            name: Some("A".into()),
            email: None,
            mobile: Some("   ".into()), // whitespace-only counts as empty
            ..Default::default()
        };

        match form.into_new_employee() {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(fields, vec!["email", "mobile", "designation", "gender", "course"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let mut form = full_form();
        form.gender = Some("unspecified".into());

        match form.into_new_employee() {
            Err(ApiError::Validation(fields)) => assert_eq!(fields, vec!["gender"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn update_keeps_omitted_fields_unset() {
        let form = EmployeeForm {
            designation: Some("Lead".into()),
            ..Default::default()
        };

        let update = form.into_update().unwrap();
        assert_eq!(update.designation.as_deref(), Some("Lead"));
        assert!(update.name.is_none());
        assert!(update.gender.is_none());
        assert!(update.image.is_none());
    }

    #[test]
    fn update_treats_empty_strings_as_absent() {
        let form = EmployeeForm {
            name: Some(String::new()),
            course: Some("  ".into()),
            gender: Some(String::new()),
            ..Default::default()
        };

        let update = form.into_update().unwrap();
        assert!(update.name.is_none());
        assert!(update.course.is_none());
        assert!(update.gender.is_none());
    }

    #[test]
    fn unknown_form_fields_are_ignored() {
        let mut form = EmployeeForm::default();
        form.set("role", "superuser".into());

        let update = form.into_update().unwrap();
        assert!(update.name.is_none());
        assert!(update.email.is_none());
        assert!(update.designation.is_none());
    }
}
