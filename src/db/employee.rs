//! Employee repository with CRUD operations.

use crate::entities::{employees, prelude::*};
use crate::error::Result as AppResult;
use crate::models::{DeleteFlag, EmployeeRecord};
use crate::validation::DuplicateLookup;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::info;

/// List all employees ordered by code.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<employees::Model>, DbErr> {
    Employees::find()
        .order_by_asc(employees::Column::EmployeeCode)
        .all(db)
        .await
}

/// List employees that are not logically deleted.
pub async fn list_active(db: &DatabaseConnection) -> Result<Vec<employees::Model>, DbErr> {
    Employees::find()
        .filter(
            Condition::any()
                .add(employees::Column::DeleteFlag.is_null())
                .add(employees::Column::DeleteFlag.ne(DeleteFlag::Deleted.as_persisted())),
        )
        .order_by_asc(employees::Column::EmployeeCode)
        .all(db)
        .await
}

/// Get employee by ID.
pub async fn get_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<employees::Model>, DbErr> {
    Employees::find_by_id(id).one(db).await
}

/// Insert a new employee. Missing timestamps are set to now.
pub async fn insert(db: &DatabaseConnection, record: &EmployeeRecord) -> Result<employees::Model, DbErr> {
    let now = Utc::now();
    let model = employees::ActiveModel {
        employee_code: Set(record.code.clone()),
        full_name: Set(record.name.clone()),
        password: Set(record.password.clone()),
        role: Set(record.role.clone()),
        created_at: Set(Some(record.created_at.unwrap_or(now).into())),
        updated_at: Set(Some(record.updated_at.unwrap_or(now).into())),
        delete_flag: Set(record.delete_flag.clone()),
        ..Default::default()
    };

    let inserted = model.insert(db).await?;
    info!("Inserted employee {} (id {})", inserted.employee_code, inserted.id);
    Ok(inserted)
}

/// Overwrite an existing employee with `record`.
///
/// Returns `None` if the record has no ID or no row matches it.
pub async fn update(db: &DatabaseConnection, record: &EmployeeRecord) -> Result<Option<employees::Model>, DbErr> {
    let Some(id) = record.id else {
        return Ok(None);
    };

    let existing = Employees::find_by_id(id).one(db).await?;

    match existing {
        Some(model) => {
            let mut active: employees::ActiveModel = model.into();

            active.employee_code = Set(record.code.clone());
            active.full_name = Set(record.name.clone());
            active.password = Set(record.password.clone());
            active.role = Set(record.role.clone());
            active.delete_flag = Set(record.delete_flag.clone());
            active.updated_at = Set(Some(Utc::now().into()));

            let updated = active.update(db).await?;
            info!("Updated employee {} (id {})", updated.employee_code, updated.id);
            Ok(Some(updated))
        }
        None => Ok(None),
    }
}

/// Mark an employee as deleted without removing the row.
pub async fn mark_deleted(db: &DatabaseConnection, id: i32) -> Result<bool, DbErr> {
    let result = Employees::update_many()
        .col_expr(
            employees::Column::DeleteFlag,
            Expr::value(DeleteFlag::Deleted.as_persisted()),
        )
        .col_expr(employees::Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
        .filter(employees::Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!("Marked employee {id} as deleted");
    }
    Ok(result.rows_affected > 0)
}

/// Count employees using `code`, deleted ones included.
pub async fn count_by_code(db: &DatabaseConnection, code: &str) -> Result<u64, DbErr> {
    Employees::find()
        .filter(employees::Column::EmployeeCode.eq(code))
        .count(db)
        .await
}

impl DuplicateLookup for DatabaseConnection {
    async fn count_by_code(&self, code: &str) -> AppResult<u64> {
        Ok(count_by_code(self, code).await?)
    }
}
