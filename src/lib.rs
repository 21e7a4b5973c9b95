//! K-Fix: a failure and solution knowledge base.
//!
//! Two fixed record collections (failures and crowd-sourced solutions) are
//! seeded into an in-memory store at startup and served over a REST API with
//! client-ready filtering, sorting, pagination, and analytics summaries.
//! Registration and login proxy to a remote identity service; the resulting
//! tokens live in HttpOnly session cookies.

pub mod analytics;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod store;

pub use error::{AppError, Result};
