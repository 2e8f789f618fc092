//! Account Service Library
//!
//! Account management backend: signup, login, listing and deletion of user
//! accounts, with bcrypt-hashed credentials and pluggable storage.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Password hashing
//! - `errors` - Error types
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP middleware
//! - `models` - Data models and response shapes
//! - `observability` - Metrics and log correlation
//! - `repositories` - Storage backends
//! - `routes` - Router and application state
//! - `services` - Business logic layer

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
