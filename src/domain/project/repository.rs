use async_trait::async_trait;

use super::{NewProject, ProjectSummary};
use crate::domain::StoreResult;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn get_essential_info(&self, limit: u32, offset: u64)
        -> StoreResult<Vec<ProjectSummary>>;
    async fn count(&self) -> StoreResult<u64>;
    async fn create(&self, created_by: &str, project: NewProject) -> StoreResult<ProjectSummary>;
}
