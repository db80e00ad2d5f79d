use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{ModuleResponse, SubmitResponse, TaskDetail, TaskSubmission};
use super::progress;
use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/skills/dsa/arrays", get(list_tasks))
        .route("/skills/dsa/arrays/:task_id", get(get_task_detail))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/tasks/:task_id/submit", post(submit_task))
}

#[instrument(skip(state, user))]
pub async fn list_tasks(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<ModuleResponse> {
    let tasks = progress::tasks_with_progress(&state.catalog, &user);
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    Json(ModuleResponse {
        module: state.catalog.module,
        track: state.catalog.track,
        total_tasks: tasks.len(),
        completed_tasks,
        tasks,
    })
}

#[instrument(skip(state, user))]
pub async fn get_task_detail(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<String>,
) -> Result<Json<TaskDetail>, ApiError> {
    let task = state.catalog.get(&task_id).ok_or(ApiError::TaskNotFound)?;
    let entry = user.progress.get(task.id);
    Ok(Json(TaskDetail {
        task: task.clone(),
        completed: entry.map(|p| p.completed).unwrap_or(false),
        attempts: entry.map(|p| p.attempts).unwrap_or(0),
        last_submission: entry.and_then(|p| p.last_submission),
    }))
}

#[instrument(skip(state, user, payload))]
pub async fn submit_task(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(task_id): Path<String>,
    Json(payload): Json<TaskSubmission>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let outcome = progress::submit(&state, user.id, &task_id, &payload.code).await?;
    Ok(Json(SubmitResponse {
        success: true,
        points_earned: outcome.points_earned,
        message: outcome.message,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Level, User};

    async fn seeded_user(state: &AppState) -> User {
        let user = User::new("alice@iit.ac.in".into(), "Alice".into(), "hash".into());
        state.store.insert(&user).await.expect("insert");
        user
    }

    fn submission(code: &str) -> TaskSubmission {
        TaskSubmission {
            task_id: None,
            code: code.into(),
            explanation: None,
        }
    }

    #[tokio::test]
    async fn submit_returns_wire_shape() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;

        let Json(res) = submit_task(
            State(state.clone()),
            CurrentUser(user.clone()),
            Path("arr-001".into()),
            Json(submission("print(1)")),
        )
        .await
        .expect("submit");
        assert!(res.success);
        assert_eq!(res.points_earned, 10);

        let Json(repeat) = submit_task(
            State(state),
            CurrentUser(user),
            Path("arr-001".into()),
            Json(submission("print(2)")),
        )
        .await
        .expect("repeat submit");
        assert!(repeat.success);
        assert_eq!(repeat.points_earned, 0);
    }

    #[tokio::test]
    async fn submit_unknown_task_is_404() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;
        let err = submit_task(
            State(state),
            CurrentUser(user),
            Path("arr-404".into()),
            Json(submission("x")),
        )
        .await
        .err()
        .expect("should fail");
        assert!(matches!(err, ApiError::TaskNotFound));
    }

    #[tokio::test]
    async fn listing_reflects_fresh_state() {
        let state = AppState::fake();
        let user = seeded_user(&state).await;

        submit_task(
            State(state.clone()),
            CurrentUser(user.clone()),
            Path("concept-001".into()),
            Json(submission("arrays are like bookshelves")),
        )
        .await
        .expect("submit");

        // The extractor re-fetches per request; mimic that here.
        let user = state.store.find_by_id(user.id).await.unwrap().unwrap();
        let Json(module) = list_tasks(State(state.clone()), CurrentUser(user.clone())).await;
        assert_eq!(module.module, "Arrays");
        assert_eq!(module.track, "DSA");
        assert_eq!(module.total_tasks, 8);
        assert_eq!(module.completed_tasks, 1);

        let Json(detail) = get_task_detail(
            State(state),
            CurrentUser(user),
            Path("concept-001".into()),
        )
        .await
        .expect("detail");
        assert!(detail.completed);
        assert_eq!(detail.attempts, 1);
        assert!(detail.last_submission.is_some());
    }

    #[tokio::test]
    async fn end_to_end_scenario() {
        use crate::auth::dto::RegisterRequest;
        use crate::auth::handlers::register;

        let state = AppState::fake();
        let Json(auth) = register(
            State(state.clone()),
            Json(RegisterRequest {
                email: "alice@iit.ac.in".into(),
                password: "pw123".into(),
                name: "Alice".into(),
            }),
        )
        .await
        .expect("register");
        assert_eq!(auth.user.points, 0);
        assert_eq!(auth.user.level, Level::Beginner);

        let user = state.store.find_by_id(auth.user.id).await.unwrap().unwrap();
        let Json(res) = submit_task(
            State(state.clone()),
            CurrentUser(user),
            Path("arr-001".into()),
            Json(submission("def two_sum(...): ...")),
        )
        .await
        .expect("submit");
        assert_eq!(res.points_earned, 10);

        let user = state.store.find_by_id(auth.user.id).await.unwrap().unwrap();
        assert_eq!(user.points, 10);
        assert_eq!(user.level, Level::Beginner);

        for task_id in ["arr-002", "debug-001", "concept-001", "concept-002"] {
            let user = state.store.find_by_id(auth.user.id).await.unwrap().unwrap();
            submit_task(
                State(state.clone()),
                CurrentUser(user),
                Path(task_id.into()),
                Json(submission("solution")),
            )
            .await
            .expect("submit");
        }

        let user = state.store.find_by_id(auth.user.id).await.unwrap().unwrap();
        assert_eq!(user.points, 55);
        assert_eq!(user.level, Level::Intermediate);
    }
}
