//! In-memory store implementations
//!
//! Used for development runs and tests. Data is lost on restart.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    NewProject, NewUserRecord, ProjectStore, ProjectSummary, StoreError, StoreResult,
    UserRecord, UserStore,
};
use crate::shared::time::format_timestamp;

/// Status assigned to users created through the store.
const INITIAL_USER_STATUS: &str = "active";
/// Status assigned to newly created projects.
const INITIAL_PROJECT_STATUS: &str = "pending";

/// In-memory user store
pub struct InMemoryUserStore {
    users: DashMap<u64, UserRecord>,
    id_counter: AtomicU64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            id_counter: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_all(&self) -> StoreResult<Vec<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn delete_by_id(&self, id: u64) -> StoreResult<()> {
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })
    }

    async fn create(&self, record: NewUserRecord) -> StoreResult<()> {
        let duplicate = self
            .users
            .iter()
            .find(|u| u.username == record.username || u.email == record.email)
            .map(|u| {
                if u.username == record.username {
                    "Username already exists"
                } else {
                    "Email already exists"
                }
            });
        if let Some(reason) = duplicate {
            return Err(StoreError::Conflict(reason.into()));
        }

        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        self.users.insert(
            id,
            UserRecord {
                id,
                name: record.name,
                email: record.email,
                username: record.username,
                github: record.github,
                role: record.role,
                status: INITIAL_USER_STATUS.to_string(),
                password_hash: record.password_hash,
                created_at: record.created_at,
                updated_at: record.updated_at,
            },
        );
        Ok(())
    }
}

/// Project as kept by the in-memory store: the listing summary plus the
/// full submission it was created from.
struct StoredProject {
    summary: ProjectSummary,
    details: NewProject,
}

/// In-memory project store
pub struct InMemoryProjectStore {
    projects: DashMap<u64, StoredProject>,
    id_counter: AtomicU64,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self {
            projects: DashMap::new(),
            id_counter: AtomicU64::new(1),
        }
    }

    /// Full submission a project was created from.
    pub fn details(&self, id: u64) -> Option<NewProject> {
        self.projects.get(&id).map(|p| p.details.clone())
    }
}

impl Default for InMemoryProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn get_essential_info(
        &self,
        limit: u32,
        offset: u64,
    ) -> StoreResult<Vec<ProjectSummary>> {
        let mut projects: Vec<ProjectSummary> =
            self.projects.iter().map(|e| e.summary.clone()).collect();
        projects.sort_by_key(|p| p.id);

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        Ok(projects
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.projects.len() as u64)
    }

    async fn create(&self, created_by: &str, project: NewProject) -> StoreResult<ProjectSummary> {
        if self.projects.iter().any(|p| p.summary.title == project.title) {
            return Err(StoreError::Conflict(format!(
                "Project '{}' already exists",
                project.title
            )));
        }

        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        let now = format_timestamp(&Utc::now());
        let summary = ProjectSummary {
            id,
            title: project.title.clone(),
            created_by: created_by.to_string(),
            status: INITIAL_PROJECT_STATUS.to_string(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.projects.insert(
            id,
            StoredProject {
                summary: summary.clone(),
                details: project,
            },
        );
        Ok(summary)
    }
}
