use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod postgres;
mod types;

pub use types::{Level, Role, TaskProgress, User};

/// Persistence seam for user records. Lookups key on the immutable id or the
/// lowercased email; `complete_and_award` is the one operation that must be
/// atomic against concurrent submitters of the same task.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn insert(&self, user: &User) -> anyhow::Result<()>;

    /// Bump `attempts` and overwrite `last_submission`/`code` for one task,
    /// creating the progress entry on first contact. Leaves `completed` and
    /// `points` alone.
    async fn record_submission(
        &self,
        id: Uuid,
        task_id: &str,
        code: &str,
        at: OffsetDateTime,
    ) -> anyhow::Result<()>;

    /// Flip `completed` to true and add `points_delta` to the user's total in
    /// a single conditional transition. Returns false when the task was
    /// already completed; two racing callers can never both get true.
    async fn complete_and_award(
        &self,
        id: Uuid,
        task_id: &str,
        points_delta: i64,
    ) -> anyhow::Result<bool>;

    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<()>;

    async fn update_level(&self, id: Uuid, level: Level) -> anyhow::Result<()>;
}
