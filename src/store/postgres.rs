use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use super::{Level, Role, TaskProgress, User, UserStore};

/// sqlx-backed store. Progress lives in a JSONB column so the conditional
/// award can be expressed as one UPDATE with a guard on the completed flag.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    role: Option<String>,
    points: i64,
    level: String,
    progress: Json<HashMap<String, TaskProgress>>,
    created_at: OffsetDateTime,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            email: r.email,
            name: r.name,
            password_hash: r.password_hash,
            role: r.role.and_then(|s| s.parse::<Role>().ok()),
            points: r.points,
            level: r.level.parse::<Level>().ok().unwrap_or(Level::Beginner),
            progress: r.progress.0,
            created_at: r.created_at,
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT id, email, name, password_hash, role, points, level, progress, created_at
    FROM users
"#;

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, role, points, level, progress, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role.map(|r| r.as_str()))
        .bind(user.points)
        .bind(user.level.as_str())
        .bind(Json(&user.progress))
        .bind(user.created_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn record_submission(
        &self,
        id: Uuid,
        task_id: &str,
        code: &str,
        at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET progress = jsonb_set(
                coalesce(progress, '{}'::jsonb),
                ARRAY[$2::text],
                jsonb_build_object(
                    'attempts', coalesce((progress->$2->>'attempts')::int, 0) + 1,
                    'completed', coalesce((progress->$2->>'completed')::boolean, false),
                    'last_submission', $3::text,
                    'code', $4::text
                ),
                true
            )
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(task_id)
        .bind(at.format(&Rfc3339)?)
        .bind(code)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn complete_and_award(
        &self,
        id: Uuid,
        task_id: &str,
        points_delta: i64,
    ) -> anyhow::Result<bool> {
        // The WHERE guard makes the flag flip and the points increment one
        // atomic transition; racing submitters serialize on the row lock and
        // at most one of them matches.
        let result = sqlx::query(
            r#"
            UPDATE users
            SET points = points + $3,
                progress = jsonb_set(
                    coalesce(progress, '{}'::jsonb),
                    ARRAY[$2::text],
                    coalesce(progress->$2, '{"attempts":0,"completed":false}'::jsonb)
                        || '{"completed": true}'::jsonb,
                    true
                )
            WHERE id = $1
              AND NOT coalesce((progress->$2->>'completed')::boolean, false)
            "#,
        )
        .bind(id)
        .bind(task_id)
        .bind(points_delta)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn update_role(&self, id: Uuid, role: Role) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn update_level(&self, id: Uuid, level: Level) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET level = $2 WHERE id = $1")
            .bind(id)
            .bind(level.as_str())
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
