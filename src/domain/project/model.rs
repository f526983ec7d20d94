use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Essential project info for the admin panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectSummary {
    pub id: u64,
    pub title: String,
    pub created_by: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Project submitted by an admin
#[derive(Debug, Clone, Default)]
pub struct NewProject {
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
