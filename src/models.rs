//! Entities and the request payloads that create or update them.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A table exposed over HTTP. `Create`/`Update` are the bodies accepted by POST and PUT.
pub trait Resource: Serialize + Send + Sync + 'static {
    type Create: DeserializeOwned + Send + 'static;
    type Update: DeserializeOwned + Send + 'static;

    /// Lowercase singular name, used in errors and logs.
    const NAME: &'static str;
    /// Capitalized name for confirmation messages.
    const LABEL: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub email: String,
}

impl Resource for Student {
    type Create = StudentInput;
    type Update = StudentInput;
    const NAME: &'static str = "student";
    const LABEL: &'static str = "Student";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    pub title: String,
    pub description: String,
}

impl Resource for Course {
    type Create = CourseInput;
    type Update = CourseInput;
    const NAME: &'static str = "course";
    const LABEL: &'static str = "Course";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Enrollment {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub enrolled_at: DateTime<Utc>,
}

/// POST body. Has no `enrolled_at`; the database stamps it on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub student_id: i32,
    pub course_id: i32,
}

/// PUT body. Omitting `enrolled_at` keeps the stored timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentUpdate {
    pub student_id: i32,
    pub course_id: i32,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl Resource for Enrollment {
    type Create = NewEnrollment;
    type Update = EnrollmentUpdate;
    const NAME: &'static str = "enrollment";
    const LABEL: &'static str = "Enrollment";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enrollment_body_ignores_client_timestamp() {
        let body = json!({
            "student_id": 1,
            "course_id": 2,
            "enrolled_at": "1999-01-01T00:00:00Z"
        });
        let parsed: NewEnrollment = serde_json::from_value(body).unwrap();
        assert_eq!(parsed, NewEnrollment { student_id: 1, course_id: 2 });
    }

    #[test]
    fn enrollment_update_timestamp_is_optional() {
        let parsed: EnrollmentUpdate =
            serde_json::from_value(json!({ "student_id": 3, "course_id": 4 })).unwrap();
        assert_eq!(parsed.enrolled_at, None);
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        let res = serde_json::from_value::<StudentInput>(json!({ "name": 5, "email": "a@b.c" }));
        assert!(res.is_err());
    }
}
