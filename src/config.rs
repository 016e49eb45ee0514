// src/config.rs

use crate::error::Result;
use clap::Parser;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "study.db";

/// NeetCode Study - spaced repetition for coding practice
#[derive(Parser, Debug)]
#[command(name = "neetcode-study")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Spaced-repetition study tracker for NeetCode problems")]
pub struct Cli {
    /// SQLite database file (default: platform data dir)
    #[arg(long, env = "NEETCODE_STUDY_DB")]
    pub db: Option<PathBuf>,

    /// JSON problem list used to seed an empty database
    #[arg(long, env = "NEETCODE_STUDY_SEED")]
    pub seed: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, env = "NEETCODE_STUDY_LOG", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub seed_path: Option<PathBuf>,
    pub log_level: String,
}

impl Config {
    /// Resolves the database location and makes sure its directory exists.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let db_path = cli.db.unwrap_or_else(default_db_path);
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Ok(Config {
            db_path,
            seed_path: cli.seed,
            log_level: cli.log_level,
        })
    }
}

fn default_db_path() -> PathBuf {
    ProjectDirs::from("com", "neetcode", "neetcode-study")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_db_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("my.db");
        let cli = Cli::try_parse_from([
            "neetcode-study",
            "--db",
            db.to_str().unwrap(),
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.db_path, db);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.seed_path, None);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_default_db_file_name() {
        assert!(default_db_path().ends_with(DB_FILE_NAME));
    }
}
