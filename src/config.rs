use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

/// Points thresholds at which a user's level changes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LevelThresholds {
    pub intermediate: i64,
    pub advanced: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub leveling: LevelThresholds,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(72),
        };
        let leveling = LevelThresholds {
            intermediate: std::env::var("LEVEL_INTERMEDIATE_POINTS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(50),
            advanced: std::env::var("LEVEL_ADVANCED_POINTS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(100),
        };
        Ok(Self {
            database_url,
            jwt,
            leveling,
        })
    }
}
