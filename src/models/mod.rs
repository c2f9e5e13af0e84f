//! Employee records and their categorical flags.

pub mod employee;
pub mod flags;

pub use employee::{EmployeeForm, EmployeeRecord};
pub use flags::{DeleteFlag, Role, form_code, persisted};
