//! Stats policy
//!
//! `active_users` and `total_challenges` have no backing tracker yet. They
//! come from an injected policy so the placeholder stays visible and can be
//! swapped for a real source later.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsersStats {
    pub total_users: u64,
    pub total_projects: u64,
    pub total_challenges: u64,
    pub active_users: u64,
}

pub trait StatsPolicy: Send + Sync {
    fn total_challenges(&self) -> u64;
    fn active_users(&self) -> u64;
}

/// Constant values until challenge and activity tracking exist.
#[derive(Debug, Clone, Copy)]
pub struct FixedStatsPolicy {
    pub total_challenges: u64,
    pub active_users: u64,
}

impl Default for FixedStatsPolicy {
    fn default() -> Self {
        Self {
            total_challenges: 5,
            active_users: 2,
        }
    }
}

impl StatsPolicy for FixedStatsPolicy {
    fn total_challenges(&self) -> u64 {
        self.total_challenges
    }

    fn active_users(&self) -> u64 {
        self.active_users
    }
}
