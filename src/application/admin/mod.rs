//! Admin module — privileged user/project management
//!
//! Contains the `AdminService` and the pure pieces it is built from:
//! pagination resolution, the user projection mapper and the stats policy.
//! Role checks are not done here; see [`crate::auth::authorize`].

pub mod dto;
pub mod error;
pub mod mapper;
pub mod pagination;
pub mod service;
pub mod stats;

pub use dto::{ProjectCreationRequest, UserAdminView, UserCreationRequest};
pub use error::{AdminError, AdminResult};
pub use mapper::{to_admin_view, to_admin_views};
pub use pagination::{resolve_pagination, Pagination};
pub use service::{AdminService, SharedAdminService, DEFAULT_ROLE};
pub use stats::{FixedStatsPolicy, StatsPolicy, UsersStats};
