//! Employee records on both sides of the mapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::employees;

/// Employee as stored in the database.
///
/// `role` and `delete_flag` hold the text constants from
/// [`persisted`](super::flags::persisted).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Absent until the record is first saved.
    pub id: Option<i32>,
    pub code: String,
    pub name: String,
    pub password: String,
    pub role: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub delete_flag: Option<String>,
}

/// Employee as entered or displayed.
///
/// `role` and `delete_flag` hold the integer codes from
/// [`form_code`](super::flags::form_code).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeForm {
    pub id: Option<i32>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub delete_flag: Option<i32>,
}

impl From<employees::Model> for EmployeeRecord {
    fn from(model: employees::Model) -> Self {
        Self {
            id: Some(model.id),
            code: model.employee_code,
            name: model.full_name,
            password: model.password,
            role: model.role,
            created_at: model.created_at.map(|t| t.with_timezone(&Utc)),
            updated_at: model.updated_at.map(|t| t.with_timezone(&Utc)),
            delete_flag: model.delete_flag,
        }
    }
}
