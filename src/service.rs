//! Employee administration service.
//!
//! Every write validates the form first and only maps and stores it when no
//! messages come back.

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::db::employee;
use crate::error::{AppError, Result};
use crate::mapper;
use crate::models::{DeleteFlag, EmployeeForm, EmployeeRecord};
use crate::validation;

/// Result of a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Form was valid and stored; holds the stored employee.
    Saved(EmployeeForm),
    /// Form was rejected; holds the validation messages in check order.
    Rejected(Vec<String>),
}

impl SaveOutcome {
    /// Convert a rejection into [`AppError::Validation`].
    pub fn into_result(self) -> Result<EmployeeForm> {
        match self {
            Self::Saved(form) => Ok(form),
            Self::Rejected(messages) => Err(AppError::validation(&messages)),
        }
    }
}

/// Service for listing and saving employees.
pub struct EmployeeService {
    db: DatabaseConnection,
}

impl EmployeeService {
    /// Create a new employee service.
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Underlying database connection.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// List employees, optionally including logically deleted ones.
    pub async fn list(&self, include_deleted: bool) -> Result<Vec<EmployeeForm>> {
        let models = if include_deleted {
            employee::list_all(&self.db).await?
        } else {
            employee::list_active(&self.db).await?
        };

        Ok(mapper::to_presentation_list(models.into_iter().map(EmployeeRecord::from)))
    }

    /// Find an employee by ID.
    pub async fn find(&self, id: i32) -> Result<Option<EmployeeForm>> {
        let model = employee::get_by_id(&self.db, id).await?;
        Ok(mapper::to_presentation(model.map(EmployeeRecord::from)))
    }

    /// Register a new employee. Code must be unique and a password is required.
    pub async fn register(&self, mut form: EmployeeForm) -> Result<SaveOutcome> {
        let messages = validation::validate(&self.db, &form, true, true).await?;
        if !messages.is_empty() {
            warn!("Rejected new employee: {}", messages.join("; "));
            return Ok(SaveOutcome::Rejected(messages));
        }

        form.id = None;
        form.delete_flag.get_or_insert(DeleteFlag::Active.as_form());

        let record = mapper::to_persistence(form);
        let inserted = employee::insert(&self.db, &record).await?;
        Ok(saved(inserted.into()))
    }

    /// Update an existing employee.
    ///
    /// The duplicate check only runs when the code changes. A blank password
    /// keeps the stored one.
    pub async fn update(&self, id: i32, mut form: EmployeeForm) -> Result<SaveOutcome> {
        let existing: EmployeeRecord = employee::get_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("employee {id}")))?
            .into();

        let code_changed = form.code.as_deref() != Some(existing.code.as_str());
        let messages = validation::validate(&self.db, &form, code_changed, false).await?;
        if !messages.is_empty() {
            warn!("Rejected update of employee {id}: {}", messages.join("; "));
            return Ok(SaveOutcome::Rejected(messages));
        }

        if form.password.as_deref().is_none_or(str::is_empty) {
            form.password = Some(existing.password.clone());
        }
        form.id = Some(id);
        form.created_at = existing.created_at;

        let record = mapper::to_persistence(form);
        let updated = employee::update(&self.db, &record)
            .await?
            .ok_or_else(|| AppError::not_found(format!("employee {id}")))?;
        Ok(saved(updated.into()))
    }

    /// Logically delete an employee. Returns `false` if no such employee.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let removed = employee::mark_deleted(&self.db, id).await?;
        if !removed {
            warn!("No employee {id} to delete");
        }
        Ok(removed)
    }
}

fn saved(record: EmployeeRecord) -> SaveOutcome {
    info!("Saved employee {}", record.code);
    SaveOutcome::Saved(mapper::record_to_form(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::employees;
    use crate::messages::{self, MessageKey};
    use crate::models::{form_code, persisted};
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::from(n))])
    }

    fn stored(id: i32, code: &str, role: Option<&str>) -> employees::Model {
        employees::Model {
            id,
            employee_code: code.to_string(),
            full_name: "Dang Thi G".to_string(),
            password: "stored-secret".to_string(),
            role: role.map(str::to_string),
            created_at: None,
            updated_at: None,
            delete_flag: Some(persisted::FLAG_ACTIVE.to_string()),
        }
    }

    fn new_form(code: &str) -> EmployeeForm {
        EmployeeForm {
            code: Some(code.to_string()),
            name: Some("Dang Thi G".to_string()),
            password: Some("secret".to_string()),
            role: Some(form_code::ROLE_ADMIN),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_register_saves_valid_form() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(0)]])
            .append_query_results([[stored(1, "E001", Some(persisted::ROLE_ADMIN))]])
            .into_connection();
        let service = EmployeeService::new(db);

        let outcome = service.register(new_form("E001")).await.unwrap();
        let form = outcome.into_result().unwrap();

        assert_eq!(form.id, Some(1));
        assert_eq!(form.role, Some(form_code::ROLE_ADMIN));
        assert_eq!(form.delete_flag, Some(form_code::FLAG_ACTIVE));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_code() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(1)]])
            .into_connection();
        let service = EmployeeService::new(db);

        let outcome = service.register(new_form("E001")).await.unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Rejected(vec![messages::resolve(MessageKey::CodeExists).to_string()])
        );
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields_without_lookup() {
        // No query results queued: a lookup would fail the test.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = EmployeeService::new(db);

        let outcome = service.register(EmployeeForm::default()).await.unwrap();
        match outcome {
            SaveOutcome::Rejected(messages) => assert_eq!(messages.len(), 3),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_missing_employee() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<employees::Model>::new()])
            .into_connection();
        let service = EmployeeService::new(db);

        let result = service.update(5, new_form("E005")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_same_code_skips_duplicate_check() {
        let existing = stored(5, "E005", Some(persisted::ROLE_GENERAL));
        let mut updated = existing.clone();
        updated.role = Some(persisted::ROLE_ADMIN.to_string());

        // get_by_id, then update's own lookup, then the UPDATE .. RETURNING row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing.clone()]])
            .append_query_results([[existing]])
            .append_query_results([[updated]])
            .into_connection();
        let service = EmployeeService::new(db);

        let mut form = new_form("E005");
        form.password = None;

        let form = service.update(5, form).await.unwrap().into_result().unwrap();
        assert_eq!(form.role, Some(form_code::ROLE_ADMIN));
        assert_eq!(form.password.as_deref(), Some("stored-secret"));
    }

    #[tokio::test]
    async fn test_remove() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = EmployeeService::new(db);

        assert!(!service.remove(9).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_changed_code_rejects_duplicate() {
        // get_by_id, then the duplicate count for the new code.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[stored(5, "E005", Some(persisted::ROLE_GENERAL))]])
            .append_query_results([[count_row(1)]])
            .into_connection();
        let service = EmployeeService::new(db);

        let outcome = service.update(5, new_form("E006")).await.unwrap();
        assert_eq!(
            outcome,
            SaveOutcome::Rejected(vec![messages::resolve(MessageKey::CodeExists).to_string()])
        );
    }

    #[tokio::test]
    async fn test_update_changed_code_saves_when_unique() {
        let existing = stored(5, "E005", Some(persisted::ROLE_GENERAL));
        let mut updated = existing.clone();
        updated.employee_code = "E006".to_string();

        // get_by_id, duplicate count, update's own lookup, then the UPDATE .. RETURNING row.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing.clone()]])
            .append_query_results([[count_row(0)]])
            .append_query_results([[existing]])
            .append_query_results([[updated]])
            .into_connection();
        let service = EmployeeService::new(db);

        let form = service.update(5, new_form("E006")).await.unwrap().into_result().unwrap();
        assert_eq!(form.id, Some(5));
        assert_eq!(form.code.as_deref(), Some("E006"));
    }

    #[tokio::test]
    async fn test_db_accessor_runs_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(3)]])
            .into_connection();
        let service = EmployeeService::new(db);

        assert_eq!(employee::count_by_code(service.db(), "E001").await.unwrap(), 3);
    }
}
