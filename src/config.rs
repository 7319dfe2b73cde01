//! Server configuration from environment variables

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    /// Maximum messages returned by the history endpoint
    pub history_limit: usize,
    /// Fixed seed for reply selection; random when unset
    pub response_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (lets tests avoid touching the process env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("EMPATHY_DB_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".empathy-chat").join("empathy.db")
            },
            PathBuf::from,
        );

        let port = lookup("EMPATHY_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let history_limit = lookup("EMPATHY_HISTORY_LIMIT")
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        let response_seed = lookup("EMPATHY_RESPONSE_SEED").and_then(|s| s.parse().ok());

        Self {
            db_path,
            port,
            history_limit,
            response_seed,
        }
    }
}
