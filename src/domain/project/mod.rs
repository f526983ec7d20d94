//! Project aggregate
//!
//! The admin panel only ever sees the essential project summary.

pub mod model;
pub mod repository;

pub use model::{NewProject, ProjectSummary};
pub use repository::ProjectStore;
