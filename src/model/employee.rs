use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Closed gender enum; stored and serialized as the variant name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "email": "john.doe@company.com",
        "mobile": "+8801712345678",
        "designation": "Engineer",
        "gender": "Male",
        "course": "CS",
        "image": "/uploads/1709290000000-5e7f1a.jpg",
        "created_at": "2024-01-01T09:30:00"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "+8801712345678")]
    pub mobile: String,

    #[schema(example = "Engineer")]
    pub designation: String,

    pub gender: Gender,

    #[schema(example = "CS")]
    pub course: String,

    /// Relative URL under the static upload prefix, absent if no photo.
    #[schema(example = "/uploads/1709290000000-5e7f1a.jpg", nullable = true)]
    pub image: Option<String>,

    #[schema(example = "2024-01-01T09:30:00", value_type = String, format = "date-time")]
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn gender_parses_case_insensitively() {
        assert_eq!(Gender::from_str("Male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("female").unwrap(), Gender::Female);
        assert_eq!(Gender::from_str("OTHER").unwrap(), Gender::Other);
        assert!(Gender::from_str("unknown").is_err());
    }

    #[test]
    fn gender_round_trips_through_display() {
        for g in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::from_str(&g.to_string()).unwrap(), g);
        }
    }
}
