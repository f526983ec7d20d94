//! Domain layer
//!
//! Records owned by the external stores and the store contracts the
//! admin service is written against.

pub mod error;
pub mod project;
pub mod user;

pub use error::{StoreError, StoreResult};
pub use project::{NewProject, ProjectStore, ProjectSummary};
pub use user::{GithubAccount, NewUserRecord, UserRecord, UserStore};
