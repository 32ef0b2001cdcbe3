pub mod memory;
pub mod models;
pub mod update;

use async_trait::async_trait;
use thiserror::Error;

use models::{Task, User};
use update::UpdatePlan;

pub use memory::MemoryStore;

/// Errors from a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Task table, partitioned by owner.
///
/// There is no optimistic concurrency check: two concurrent `update_fields`
/// calls on the same task both succeed and the last write wins.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get(&self, owner_id: &str, task_id: &str) -> Result<Option<Task>, StoreError>;

    async fn list(&self, owner_id: &str) -> Result<Vec<Task>, StoreError>;

    /// Insert or replace
    async fn put(&self, task: Task) -> Result<(), StoreError>;

    /// Apply `plan` and return the updated task, or `None` if absent
    async fn update_fields(&self, owner_id: &str, task_id: &str, plan: &UpdatePlan) -> Result<Option<Task>, StoreError>;

    /// Absent tasks are not an error
    async fn delete(&self, owner_id: &str, task_id: &str) -> Result<(), StoreError>;
}

/// User table keyed by principal id
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Duplicate`] if the id is taken
    async fn add_user(&self, user: User) -> Result<(), StoreError>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError>;
}
