//! HTTP REST API interfaces
//!
//! - `common`: response envelope and the validated JSON extractor
//! - `modules`: admin, health and metrics handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
