use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{Task, User};
use super::update::UpdatePlan;
use super::{StoreError, TaskStore, UserStore};

/// (owner id, task id)
type TaskKey = (String, String);

/// In-process store backing both tables. Cloning shares the underlying maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tasks: Arc<RwLock<HashMap<TaskKey, Task>>>,
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(owner_id: &str, task_id: &str) -> TaskKey {
        (owner_id.to_string(), task_id.to_string())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn get(&self, owner_id: &str, task_id: &str) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.read().await.get(&Self::key(owner_id, task_id)).cloned())
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks.values().filter(|t| t.owner == owner_id).cloned().collect();
        owned.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(owned)
    }

    async fn put(&self, task: Task) -> Result<(), StoreError> {
        let key = Self::key(&task.owner, &task.id);
        self.tasks.write().await.insert(key, task);
        Ok(())
    }

    async fn update_fields(&self, owner_id: &str, task_id: &str, plan: &UpdatePlan) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&Self::key(owner_id, task_id)) {
            Some(task) => {
                plan.apply(task);
                debug!("Applied {} field update(s) to task {}", plan.updates().len(), task_id);
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, owner_id: &str, task_id: &str) -> Result<(), StoreError> {
        if self.tasks.write().await.remove(&Self::key(owner_id, task_id)).is_none() {
            debug!("Delete of absent task {} for {} ignored", task_id, owner_id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn add_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::Duplicate(format!("user {} already exists", user.id)));
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }
}
