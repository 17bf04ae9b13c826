use crate::error::ApiError;
use crate::model::employee::{Employee, Gender};
use chrono::Utc;
use sqlx::MySqlPool;
use tracing::debug;

/// A fully validated record ready for insertion. Construction happens at the
/// API boundary, so every required field is present and non-empty here.
#[derive(Debug)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: Gender,
    pub course: String,
    pub image: Option<String>,
}

/// Partial update; `None` means "leave the stored value alone". The image
/// is only `Some` when a new upload accompanied the request.
#[derive(Debug, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<Gender>,
    pub course: Option<String>,
    pub image: Option<String>,
}

/// CRUD over employee records, backed by the injected pool. Identifier and
/// creation timestamp are assigned here, never by callers.
#[derive(Clone)]
pub struct EmployeeDirectory {
    pool: MySqlPool,
}

impl EmployeeDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewEmployee) -> Result<Employee, ApiError> {
        let created_at = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            INSERT INTO employees
            (name, email, mobile, designation, gender, course, image, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.mobile)
        .bind(&new.designation)
        .bind(new.gender.to_string())
        .bind(&new.course)
        .bind(&new.image)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_id();
        debug!(id, "Employee created");

        self.get_by_id(id).await
    }

    /// Newest first; id breaks ties between same-instant rows.
    pub async fn list(&self) -> Result<Vec<Employee>, ApiError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Employee, ApiError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ApiError::NotFound)
    }

    /// Overwrites only the supplied fields. An empty update is a no-op that
    /// returns the current record. Concurrent updates to the same id are
    /// last-write-wins.
    pub async fn update(&self, id: u64, update: EmployeeUpdate) -> Result<Employee, ApiError> {
        // Existence check up front: MySQL reports zero affected rows for a
        // same-value update, so rows_affected cannot distinguish "absent"
        // from "unchanged".
        self.get_by_id(id).await?;

        let (sets, bindings) = update_sets(&update);

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let sql = format!("UPDATE employees SET {} WHERE id = ?", sets.join(", "));
        debug!(sql = %sql, id, "Updating employee");

        let mut query = sqlx::query(&sql);
        for b in bindings {
            query = query.bind(b);
        }
        query = query.bind(id);

        query.execute(&self.pool).await?;

        self.get_by_id(id).await
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }

        debug!(id, "Employee deleted");
        Ok(())
    }
}

/// SET clause fragments plus their bindings, in matching order.
fn update_sets(update: &EmployeeUpdate) -> (Vec<&'static str>, Vec<String>) {
    let mut sets = Vec::new();
    let mut bindings = Vec::new();

    if let Some(name) = &update.name {
        sets.push("name = ?");
        bindings.push(name.clone());
    }
    if let Some(email) = &update.email {
        sets.push("email = ?");
        bindings.push(email.clone());
    }
    if let Some(mobile) = &update.mobile {
        sets.push("mobile = ?");
        bindings.push(mobile.clone());
    }
    if let Some(designation) = &update.designation {
        sets.push("designation = ?");
        bindings.push(designation.clone());
    }
    if let Some(gender) = update.gender {
        sets.push("gender = ?");
        bindings.push(gender.to_string());
    }
    if let Some(course) = &update.course {
        sets.push("course = ?");
        bindings.push(course.clone());
    }
    if let Some(image) = &update.image {
        sets.push("image = ?");
        bindings.push(image.clone());
    }

    (sets, bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_builds_no_sets() {
        let (sets, bindings) = update_sets(&EmployeeUpdate::default());
        assert!(sets.is_empty());
        assert!(bindings.is_empty());
    }

    #[test]
    fn update_sets_cover_only_supplied_fields() {
        let update = EmployeeUpdate {
            name: Some("Jane".into()),
            gender: Some(Gender::Female),
            ..Default::default()
        };

        let (sets, bindings) = update_sets(&update);
        assert_eq!(sets, vec!["name = ?", "gender = ?"]);
        assert_eq!(bindings, vec!["Jane".to_string(), "Female".to_string()]);
    }

    #[test]
    fn image_is_only_set_when_a_new_upload_arrived() {
        let without = EmployeeUpdate {
            name: Some("Jane".into()),
            ..Default::default()
        };
        let (sets, _) = update_sets(&without);
        assert!(!sets.contains(&"image = ?"));

        let with = EmployeeUpdate {
            image: Some("/uploads/1-a.jpg".into()),
            ..Default::default()
        };
        let (sets, bindings) = update_sets(&with);
        assert_eq!(sets, vec!["image = ?"]);
        assert_eq!(bindings, vec!["/uploads/1-a.jpg".to_string()]);
    }
}
