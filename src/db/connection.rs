//! Database connection pool and utility functions.

use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Statement,
};
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::entities::{employees, prelude::*};
use crate::models::DeleteFlag;

/// Create a new database connection with configured pool settings.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(5)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(300))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Test database connection by executing a simple query.
pub async fn test_connection(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared("SELECT 1").await?;
    Ok(())
}

/// Get PostgreSQL version string.
pub async fn get_version(db: &DatabaseConnection) -> Result<String, DbErr> {
    let result = db
        .query_one(Statement::from_string(
            sea_orm::DatabaseBackend::Postgres,
            "SELECT version()".to_owned(),
        ))
        .await?;

    match result {
        Some(row) => {
            let version: String = row.try_get("", "version")?;
            Ok(version)
        }
        None => Ok("Unknown".to_owned()),
    }
}

/// Get employee record counts.
pub async fn get_employee_counts(db: &DatabaseConnection) -> Result<EmployeeCounts, DbErr> {
    let total = Employees::find().count(db).await?;
    let deleted = Employees::find()
        .filter(employees::Column::DeleteFlag.eq(DeleteFlag::Deleted.as_persisted()))
        .count(db)
        .await?;

    Ok(EmployeeCounts { total, deleted })
}

/// Employee record counts.
#[derive(Debug, Clone)]
pub struct EmployeeCounts {
    pub total: u64,
    pub deleted: u64,
}
