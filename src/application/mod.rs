pub mod admin;

pub use admin::{AdminError, AdminResult, AdminService, SharedAdminService};
