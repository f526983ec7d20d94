use async_trait::async_trait;

use super::{NewUserRecord, UserRecord};
use crate::domain::StoreResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_all(&self) -> StoreResult<Vec<UserRecord>>;
    async fn count(&self) -> StoreResult<u64>;
    async fn delete_by_id(&self, id: u64) -> StoreResult<()>;
    async fn create(&self, record: NewUserRecord) -> StoreResult<()>;
}
