pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod mapper;
pub mod messages;
pub mod models;
pub mod service;
pub mod validation;

pub use error::{AppError, Result};
