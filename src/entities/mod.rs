//! SeaORM entities for the `app` schema.

pub mod prelude;

pub mod employees;
