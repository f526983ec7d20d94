//! Admin request DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::admin::{ProjectCreationRequest, UserCreationRequest, DEFAULT_ROLE};

/// Admin user registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub github_username: Option<String>,
    /// User role (e.g. "admin", "user")
    #[serde(default = "default_role")]
    #[schema(example = "admin")]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl From<CreateUserRequest> for UserCreationRequest {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            name: r.name,
            username: r.username,
            email: r.email,
            password: r.password,
            github_username: r.github_username,
            role: r.role,
        }
    }
}

/// Project creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    #[schema(example = "My Project")]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github_link: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, alias = "contributers")]
    pub contributors: Option<Vec<String>>,
    #[serde(default)]
    pub technologies: Option<Vec<String>>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    #[schema(example = "Web Development")]
    pub category: String,
}

impl From<CreateProjectRequest> for ProjectCreationRequest {
    fn from(r: CreateProjectRequest) -> Self {
        Self {
            title: r.title,
            image: r.image,
            description: r.description,
            github_link: r.github_link,
            tags: r.tags,
            contributors: r.contributors,
            technologies: r.technologies,
            live_url: r.live_url,
            category: r.category,
        }
    }
}

/// Raw pagination query, built from the query-string pairs so that
/// malformed or repeated keys fall back to defaults instead of failing
/// extraction.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1. Default: 1
    pub page: Option<String>,
    /// Page size, 1–1000. Default: 50
    pub limit: Option<String>,
}

impl PaginationQuery {
    /// The first occurrence of each key wins; other keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "page" if query.page.is_none() => query.page = Some(value),
                "limit" if query.limit.is_none() => query.limit = Some(value),
                _ => {}
            }
        }
        query
    }
}
