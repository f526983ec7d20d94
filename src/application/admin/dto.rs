use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User data exposed to admin callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserAdminView {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Empty when no GitHub account is linked
    pub github_username: String,
    pub role: String,
    pub status: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub created_at: String,
    /// `YYYY-MM-DD HH:MM:SS`, UTC
    pub updated_at: String,
}

/// Admin request to create a user
#[derive(Debug, Clone, Default)]
pub struct UserCreationRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub github_username: Option<String>,
    pub role: String,
}

/// Admin request to create a project
#[derive(Debug, Clone, Default)]
pub struct ProjectCreationRequest {
    pub title: String,
    pub image: Option<String>,
    pub description: String,
    pub github_link: String,
    pub tags: Option<Vec<String>>,
    pub contributors: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub live_url: Option<String>,
    pub category: String,
}
