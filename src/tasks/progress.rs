use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::catalog::Catalog;
use super::dto::TaskWithProgress;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Level, User};

pub struct SubmissionOutcome {
    pub points_earned: i64,
    pub message: String,
}

/// Record one submission. Attempts, timestamp and code always update; points
/// are awarded only on the transition from not-completed to completed, which
/// the store performs as a single conditional write so concurrent submitters
/// of the same task cannot both win.
#[instrument(skip(state, code))]
pub async fn submit(
    state: &AppState,
    user_id: Uuid,
    task_id: &str,
    code: &str,
) -> Result<SubmissionOutcome, ApiError> {
    let task = state.catalog.get(task_id).ok_or(ApiError::TaskNotFound)?;

    state
        .store
        .record_submission(user_id, task_id, code, OffsetDateTime::now_utc())
        .await?;

    let awarded = state
        .store
        .complete_and_award(user_id, task_id, task.points)
        .await?;

    if awarded {
        // Level is derived from the post-award total; the stored copy only
        // exists so reads stay cheap.
        let points = state
            .store
            .find_by_id(user_id)
            .await?
            .map(|u| u.points)
            .unwrap_or(0);
        let level = Level::for_points(points, state.config.leveling);
        state.store.update_level(user_id, level).await?;
        info!(user_id = %user_id, task_id, points_earned = task.points, total = points, "task completed");
        Ok(SubmissionOutcome {
            points_earned: task.points,
            message: "Great work! Task completed.".into(),
        })
    } else {
        info!(user_id = %user_id, task_id, "repeat submission");
        Ok(SubmissionOutcome {
            points_earned: 0,
            message: "Submission recorded.".into(),
        })
    }
}

/// Full curriculum in definition order, joined with the user's progress map.
/// Tasks never attempted report completed=false, attempts=0.
pub fn tasks_with_progress(catalog: &Catalog, user: &User) -> Vec<TaskWithProgress> {
    catalog
        .iter()
        .map(|task| {
            let progress = user.progress.get(task.id);
            TaskWithProgress {
                task: task.clone(),
                completed: progress.map(|p| p.completed).unwrap_or(false),
                attempts: progress.map(|p| p.attempts).unwrap_or(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn seeded_user(state: &AppState) -> User {
        let user = User::new("alice@iit.ac.in".into(), "Alice".into(), "hash".into());
        state.store.insert(&user).await.expect("insert");
        user
    }

    #[tokio::test]
    async fn unknown_task_is_rejected() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;
        let err = submit(&state, user.id, "arr-999", "code")
            .await
            .err()
            .expect("should fail");
        assert!(matches!(err, ApiError::TaskNotFound));
    }

    #[tokio::test]
    async fn first_completion_awards_repeat_does_not() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;

        let first = submit(&state, user.id, "arr-001", "print(1)")
            .await
            .expect("first submission");
        assert_eq!(first.points_earned, 10);

        let after_first = state.store.find_by_id(user.id).await.unwrap().unwrap();
        let progress = after_first.progress.get("arr-001").expect("entry");
        assert!(progress.completed);
        assert_eq!(progress.attempts, 1);
        assert_eq!(after_first.points, 10);

        let second = submit(&state, user.id, "arr-001", "print(2)")
            .await
            .expect("second submission");
        assert_eq!(second.points_earned, 0);
        assert_ne!(second.message, first.message);

        let after_second = state.store.find_by_id(user.id).await.unwrap().unwrap();
        let progress = after_second.progress.get("arr-001").expect("entry");
        assert!(progress.completed);
        assert_eq!(progress.attempts, 2);
        assert_eq!(progress.code.as_deref(), Some("print(2)"));
        assert!(progress.last_submission.is_some());
        assert_eq!(after_second.points, 10);
    }

    #[tokio::test]
    async fn concurrent_submissions_award_exactly_once() {
        let state = Arc::new(AppState::fake());
        let user = seeded_user(&state).await;

        const N: usize = 16;
        let mut handles = Vec::with_capacity(N);
        for i in 0..N {
            let state = Arc::clone(&state);
            let user_id = user.id;
            handles.push(tokio::spawn(async move {
                submit(&state, user_id, "arr-002", &format!("attempt {i}"))
                    .await
                    .expect("submit")
                    .points_earned
            }));
        }

        let mut total_awarded = 0;
        for handle in handles {
            total_awarded += handle.await.expect("join");
        }
        assert_eq!(total_awarded, 20);

        let reloaded = state.store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.points, 20);
        let progress = reloaded.progress.get("arr-002").expect("entry");
        assert!(progress.completed);
        assert_eq!(progress.attempts, N as u32);
    }

    #[tokio::test]
    async fn points_accumulate_and_level_follows() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;

        submit(&state, user.id, "arr-001", "x").await.expect("arr-001");
        let u = state.store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(u.points, 10);
        assert_eq!(u.level, Level::Beginner);

        // Four more first-time tasks worth 45 in total: 20 + 15 + 5 + 5.
        for task_id in ["arr-002", "debug-001", "concept-001", "concept-002"] {
            submit(&state, user.id, task_id, "x").await.expect(task_id);
        }

        let u = state.store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(u.points, 55);
        assert_eq!(u.level, Level::Intermediate);

        // Everything else pushes past the Advanced threshold.
        for task_id in ["arr-003", "arr-004", "arr-005"] {
            submit(&state, user.id, task_id, "x").await.expect(task_id);
        }
        let u = state.store.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(u.points, 110);
        assert_eq!(u.level, Level::Advanced);
    }

    #[tokio::test]
    async fn listing_joins_catalog_with_progress() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;
        submit(&state, user.id, "arr-003", "x").await.expect("submit");
        submit(&state, user.id, "arr-003", "y").await.expect("submit");

        let user = state.store.find_by_id(user.id).await.unwrap().unwrap();
        let listing = tasks_with_progress(&state.catalog, &user);
        assert_eq!(listing.len(), state.catalog.len());

        let rotated = listing.iter().find(|t| t.task.id == "arr-003").unwrap();
        assert!(rotated.completed);
        assert_eq!(rotated.attempts, 2);

        let untouched = listing.iter().find(|t| t.task.id == "arr-001").unwrap();
        assert!(!untouched.completed);
        assert_eq!(untouched.attempts, 0);
    }
}
