use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Level, Role, TaskProgress, User};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for picking a career track.
#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client; never carries the hash.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Option<Role>,
    pub points: i64,
    pub level: Level,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            email: u.email.clone(),
            name: u.name.clone(),
            role: u.role,
            points: u.points,
            level: u.level,
        }
    }
}

/// Profile view: public fields plus the per-task progress map.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: PublicUser,
    pub progress: HashMap<String, TaskProgress>,
}

#[derive(Debug, Serialize)]
pub struct RoleUpdateResponse {
    pub message: String,
    pub role: Role,
}
