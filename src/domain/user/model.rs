use chrono::{DateTime, Utc};

/// GitHub account linked to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubAccount {
    pub username: String,
}

/// User as persisted by the user store
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub username: String,
    pub github: Option<GithubAccount>,
    pub role: String,
    pub status: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload handed to the user store when an admin creates a user.
///
/// The store assigns the id and the initial status.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub github: Option<GithubAccount>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
