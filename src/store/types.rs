use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::LevelThresholds;

/// User record as persisted. The password hash never reaches JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Option<Role>,
    pub points: i64,
    pub level: Level,
    pub progress: HashMap<String, TaskProgress>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            password_hash,
            role: None,
            points: 0,
            level: Level::Beginner,
            progress: HashMap::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Per-task completion state. `completed` only ever goes false -> true and
/// `attempts` only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskProgress {
    pub attempts: u32,
    pub completed: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub last_submission: Option<OffsetDateTime>,
    #[serde(default)]
    pub code: Option<String>,
}

impl Default for TaskProgress {
    fn default() -> Self {
        Self {
            attempts: 0,
            completed: false,
            last_submission: None,
            code: None,
        }
    }
}

/// Career track a user picks once on onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SDE")]
    Sde,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "ML Engineer")]
    MlEngineer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Sde => "SDE",
            Role::DataAnalyst => "Data Analyst",
            Role::DataScientist => "Data Scientist",
            Role::MlEngineer => "ML Engineer",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SDE" => Ok(Role::Sde),
            "Data Analyst" => Ok(Role::DataAnalyst),
            "Data Scientist" => Ok(Role::DataScientist),
            "ML Engineer" => Ok(Role::MlEngineer),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skill level, a pure function of total points. The stored value is a
/// denormalized copy that must be recomputed whenever points change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub fn for_points(points: i64, thresholds: LevelThresholds) -> Self {
        if points >= thresholds.advanced {
            Level::Advanced
        } else if points >= thresholds.intermediate {
            Level::Intermediate
        } else {
            Level::Beginner
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Level::Beginner),
            "Intermediate" => Ok(Level::Intermediate),
            "Advanced" => Ok(Level::Advanced),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: LevelThresholds = LevelThresholds {
        intermediate: 50,
        advanced: 100,
    };

    #[test]
    fn level_thresholds() {
        assert_eq!(Level::for_points(0, THRESHOLDS), Level::Beginner);
        assert_eq!(Level::for_points(49, THRESHOLDS), Level::Beginner);
        assert_eq!(Level::for_points(50, THRESHOLDS), Level::Intermediate);
        assert_eq!(Level::for_points(99, THRESHOLDS), Level::Intermediate);
        assert_eq!(Level::for_points(100, THRESHOLDS), Level::Advanced);
        assert_eq!(Level::for_points(250, THRESHOLDS), Level::Advanced);
    }

    #[test]
    fn password_hash_never_serialized() {
        let user = User::new(
            "alice@iit.ac.in".into(),
            "Alice".into(),
            "$argon2id$fake".into(),
        );
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice@iit.ac.in"));
    }

    #[test]
    fn role_round_trips_wire_names() {
        for name in ["SDE", "Data Analyst", "Data Scientist", "ML Engineer"] {
            let role: Role = name.parse().expect("known role");
            assert_eq!(role.as_str(), name);
        }
        assert!("Barista".parse::<Role>().is_err());
    }
}
