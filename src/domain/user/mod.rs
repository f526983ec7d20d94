//! User aggregate
//!
//! Contains the user record, the creation payload and the store interface.

pub mod model;
pub mod repository;

pub use model::{GithubAccount, NewUserRecord, UserRecord};
pub use repository::UserStore;
