//! Database connection pool and operations.

pub mod connection;
pub mod employee;

pub use connection::{EmployeeCounts, connect, get_employee_counts, get_version, test_connection};
