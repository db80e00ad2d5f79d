use axum::{
    extract::{FromRef, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AuthResponse, LoginRequest, ProfileResponse, PublicUser, RegisterRequest,
            RoleUpdateRequest, RoleUpdateResponse,
        },
        eligibility::{is_eligible_email, is_valid_email},
        extractors::CurrentUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    state::AppState,
    store::{Role, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(get_profile))
        .route("/users/role", put(update_role))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) || !is_eligible_email(&payload.email) {
        warn!(email = %payload.email, "email not eligible for registration");
        return Err(ApiError::IneligibleEmail);
    }

    if state.store.find_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::EmailAlreadyRegistered);
    }

    let hash = hash_password(&payload.password)?;
    let user = User::new(payload.email, payload.name, hash);
    state.store.insert(&user).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password produce the same error so a caller
    // cannot enumerate registered addresses.
    let user = match state.store.find_by_email(&payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(user))]
pub async fn get_profile(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: PublicUser::from(&user),
        progress: user.progress,
    })
}

#[instrument(skip(state, user, payload))]
pub async fn update_role(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<RoleUpdateRequest>,
) -> Result<Json<RoleUpdateResponse>, ApiError> {
    let role: Role = payload.role.parse().map_err(|_| {
        warn!(user_id = %user.id, role = %payload.role, "invalid role");
        ApiError::InvalidRole
    })?;

    state.store.update_role(user.id, role).await?;

    info!(user_id = %user.id, role = %role, "role updated");
    Ok(Json(RoleUpdateResponse {
        message: "Role updated".into(),
        role,
    }))
}
