//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use anyhow::Result;

use crate::db::Database;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, Default)]
pub struct PlannerConfig {
    /// Database file (from PHASE_PLANNER_DB). Defaults to the platform data dir.
    pub db_path: Option<PathBuf>,
    /// Bearer token required by the HTTP API (from PHASE_PLANNER_API_KEY).
    pub api_key: Option<String>,
    /// Allowed CORS origins (from PHASE_PLANNER_CORS_ORIGINS, comma-separated).
    /// Any origin is allowed when unset.
    pub cors_origins: Option<Vec<String>>,
}

impl PlannerConfig {
    pub fn from_env() -> Self {
        let db_path = std::env::var_os("PHASE_PLANNER_DB").map(PathBuf::from);

        let api_key = std::env::var("PHASE_PLANNER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let cors_origins = std::env::var("PHASE_PLANNER_CORS_ORIGINS")
            .ok()
            .map(|s| parse_origins(&s))
            .filter(|origins| !origins.is_empty());

        Self {
            db_path,
            api_key,
            cors_origins,
        }
    }

    /// Open and migrate the configured database.
    pub fn open_database(&self) -> Result<Database> {
        let db = match &self.db_path {
            Some(path) => Database::open(path.clone())?,
            None => Database::open_default()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
