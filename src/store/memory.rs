use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Level, Role, User, UserStore};

/// Map-backed store. The whole map sits behind one mutex, so the conditional
/// award gets its atomicity from the lock. Used by `AppState::fake()` and the
/// ledger tests; not meant for production traffic.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, User>> {
        self.users.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.lock().values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.lock().get(&id).cloned())
    }

    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        self.lock().insert(user.id, user.clone());
        Ok(())
    }

    async fn record_submission(
        &self,
        id: Uuid,
        task_id: &str,
        code: &str,
        at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        let mut users = self.lock();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("user {id} not found"))?;
        let entry = user.progress.entry(task_id.to_string()).or_default();
        entry.attempts += 1;
        entry.last_submission = Some(at);
        entry.code = Some(code.to_string());
        Ok(())
    }

    async fn complete_and_award(
        &self,
        id: Uuid,
        task_id: &str,
        points_delta: i64,
    ) -> anyhow::Result<bool> {
        let mut users = self.lock();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("user {id} not found"))?;
        let entry = user.progress.entry(task_id.to_string()).or_default();
        if entry.completed {
            return Ok(false);
        }
        entry.completed = true;
        user.points += points_delta;
        Ok(true)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<()> {
        if let Some(user) = self.lock().get_mut(&id) {
            user.role = Some(role);
        }
        Ok(())
    }

    async fn update_level(&self, id: Uuid, level: Level) -> anyhow::Result<()> {
        if let Some(user) = self.lock().get_mut(&id) {
            user.level = level;
        }
        Ok(())
    }
}
