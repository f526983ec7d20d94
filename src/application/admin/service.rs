//! Admin service — application-layer orchestration
//!
//! Coordinates the user and project stores for the admin panel. Holds no
//! state of its own beyond the injected collaborators, so a single instance
//! can serve any number of concurrent requests.
//!
//! Every method assumes the caller already passed [`crate::auth::authorize`].

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::dto::{ProjectCreationRequest, UserAdminView, UserCreationRequest};
use super::error::{AdminError, AdminResult};
use super::mapper::to_admin_views;
use super::pagination::Pagination;
use super::stats::{FixedStatsPolicy, StatsPolicy, UsersStats};
use crate::domain::{
    GithubAccount, NewProject, NewUserRecord, ProjectStore, ProjectSummary, UserStore,
};
use crate::infrastructure::crypto::password::{hash_password_with_cost, DEFAULT_COST};

/// Role given to created users when the request leaves it empty.
pub const DEFAULT_ROLE: &str = "user";

/// Admin service over trait-object stores, as shared with the HTTP layer.
pub type SharedAdminService = Arc<AdminService<dyn UserStore, dyn ProjectStore>>;

/// Generic over the store types so it stays decoupled from the concrete
/// persistence layer; `?Sized` allows `dyn` stores.
pub struct AdminService<U: ?Sized, P: ?Sized> {
    users: Arc<U>,
    projects: Arc<P>,
    stats_policy: Arc<dyn StatsPolicy>,
    password_cost: u32,
}

impl<U, P> AdminService<U, P>
where
    U: UserStore + ?Sized,
    P: ProjectStore + ?Sized,
{
    pub fn new(users: Arc<U>, projects: Arc<P>) -> Self {
        Self {
            users,
            projects,
            stats_policy: Arc::new(FixedStatsPolicy::default()),
            password_cost: DEFAULT_COST,
        }
    }

    pub fn with_stats_policy(mut self, policy: Arc<dyn StatsPolicy>) -> Self {
        self.stats_policy = policy;
        self
    }

    /// bcrypt cost used when hashing passwords of created users.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    // ── Queries ─────────────────────────────────────────────────

    /// One page of project summaries.
    pub async fn list_projects(&self, page: Pagination) -> AdminResult<Vec<ProjectSummary>> {
        debug!(limit = page.limit, offset = page.offset, "Listing projects");
        self.projects
            .get_essential_info(page.limit, page.offset)
            .await
            .map_err(|e| AdminError::retrieval("Failed to retrieve projects", e))
    }

    /// All users, projected for admin display.
    pub async fn list_users(&self) -> AdminResult<Vec<UserAdminView>> {
        let records = self
            .users
            .get_all()
            .await
            .map_err(|e| AdminError::retrieval("Failed to retrieve users", e))?;
        Ok(to_admin_views(records))
    }

    /// Dashboard counts. Fails as a whole if either store fails.
    pub async fn get_stats(&self) -> AdminResult<UsersStats> {
        let total_users = self
            .users
            .count()
            .await
            .map_err(|e| AdminError::retrieval("Failed to count users", e))?;
        let total_projects = self
            .projects
            .count()
            .await
            .map_err(|e| AdminError::retrieval("Failed to count projects", e))?;

        Ok(UsersStats {
            total_users,
            total_projects,
            total_challenges: self.stats_policy.total_challenges(),
            active_users: self.stats_policy.active_users(),
        })
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Delete a user by numeric id.
    pub async fn delete_user(&self, id: i64) -> AdminResult<()> {
        let id = u64::try_from(id)
            .map_err(|_| AdminError::InvalidInput(format!("Invalid user ID: {}", id)))?;

        self.users
            .delete_by_id(id)
            .await
            .map_err(|e| AdminError::deletion("Failed to delete user", e))?;

        info!(user_id = id, "User deleted by admin");
        Ok(())
    }

    /// Create a user from an admin request.
    ///
    /// Name, username, email and password are required. The password is
    /// stored as a bcrypt hash and both timestamps are set to the current
    /// time.
    pub async fn create_user(&self, request: UserCreationRequest) -> AdminResult<()> {
        require_non_empty("name", &request.name)?;
        require_non_empty("username", &request.username)?;
        require_non_empty("email", &request.email)?;
        require_non_empty("password", &request.password)?;

        let password_hash = hash_password_with_cost(&request.password, self.password_cost)
            .map_err(|e| AdminError::creation("Failed to hash password", e))?;

        let role = if request.role.trim().is_empty() {
            DEFAULT_ROLE.to_string()
        } else {
            request.role
        };

        let github = request
            .github_username
            .filter(|u| !u.trim().is_empty())
            .map(|username| GithubAccount { username });

        let now = Utc::now();
        let record = NewUserRecord {
            name: request.name,
            username: request.username,
            email: request.email,
            role,
            password_hash,
            github,
            created_at: now,
            updated_at: now,
        };
        let username = record.username.clone();

        self.users
            .create(record)
            .await
            .map_err(|e| AdminError::creation("Failed to create user", e))?;

        info!(username = %username, "User created by admin");
        Ok(())
    }

    /// Create a project on behalf of `created_by`.
    pub async fn create_project(
        &self,
        created_by: &str,
        request: ProjectCreationRequest,
    ) -> AdminResult<ProjectSummary> {
        if created_by.trim().is_empty() {
            return Err(AdminError::InvalidInput(
                "Project creator is required".into(),
            ));
        }
        require_non_empty("title", &request.title)?;

        let project = NewProject {
            title: request.title,
            image: request.image,
            description: request.description,
            github_link: request.github_link,
            tags: request.tags,
            contributors: request.contributors,
            technologies: request.technologies,
            live_url: request.live_url,
            category: request.category,
        };

        let created = self
            .projects
            .create(created_by, project)
            .await
            .map_err(|e| AdminError::creation("Failed to create project", e))?;

        info!(project_id = created.id, created_by, "Project created by admin");
        Ok(created)
    }
}

fn require_non_empty(field: &str, value: &str) -> AdminResult<()> {
    if value.trim().is_empty() {
        return Err(AdminError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}
