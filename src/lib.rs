//! # ESDC Admin Service
//!
//! Admin backend for user and project administration.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Records and the store traits
//! - **application**: The admin service, its policies and error taxonomy
//! - **infrastructure**: In-memory stores and password hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT verification and the admin access guard
//! - **server**: Runtime wiring and graceful shutdown

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{AdminError, AdminResult, AdminService, SharedAdminService};

// Re-export API router
pub use interfaces::http::create_api_router;
