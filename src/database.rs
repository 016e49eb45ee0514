// src/database.rs

use crate::error::{Result, StudyError};
use crate::models::{Difficulty, JsonProblem};
use log::{debug, info, warn};
use rusqlite::{params, Connection};
use std::fs;
use std::path::Path;

const BUNDLED_SEED: &str = include_str!("data/neetcode_150.json");

pub fn init_db(conn: &Connection, seed_path: Option<&Path>) -> Result<()> {
    debug!("init_db: Checking database schema...");

    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        CREATE TABLE IF NOT EXISTS problems (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            difficulty TEXT NOT NULL CHECK (difficulty IN ('Easy','Medium','Hard')),
            grouping TEXT NOT NULL DEFAULT '',
            leetcode_number INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
        );
        CREATE TABLE IF NOT EXISTS completions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            problem_id INTEGER NOT NULL REFERENCES problems(id),
            effort_rating INTEGER NOT NULL CHECK (effort_rating BETWEEN 1 AND 3),
            interval_days INTEGER NOT NULL DEFAULT 1,
            easiness_factor REAL NOT NULL DEFAULT 2.5,
            repetitions INTEGER NOT NULL DEFAULT 0,
            next_review_ts INTEGER NOT NULL,
            completed_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_completions_problem
            ON completions (problem_id, completed_at);
        ",
    )?;

    let count: i64 = conn.query_row("SELECT count(*) FROM problems", [], |row| row.get(0))?;
    if count == 0 {
        debug!("init_db: Table empty. Seeding data...");
        let inserted = seed_data(conn, &load_seed(seed_path)?)?;
        info!("Seeded {} problems", inserted);
    }

    Ok(())
}

/// Reads the seed file if one was given and exists, otherwise the bundled
/// NeetCode 150 list.
fn load_seed(seed_path: Option<&Path>) -> Result<String> {
    match seed_path {
        Some(path) if path.exists() => {
            info!("Seeding from {:?}", path);
            Ok(fs::read_to_string(path)?)
        }
        Some(path) => {
            warn!("Seed file {:?} not found; using bundled problem list", path);
            Ok(BUNDLED_SEED.to_string())
        }
        None => Ok(BUNDLED_SEED.to_string()),
    }
}

/// Inserts problems from a JSON array. Blank titles are skipped and existing
/// titles are left alone. Returns the number of new rows.
pub fn seed_data(conn: &Connection, json: &str) -> Result<usize> {
    let problems: Vec<JsonProblem> = serde_json::from_str(json)?;

    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO problems (title, difficulty, grouping, leetcode_number) VALUES (?, ?, ?, ?)",
        )?;
        for p in problems {
            let title = p.title.trim();
            if title.is_empty() {
                continue;
            }
            let difficulty: Difficulty = p
                .difficulty
                .parse()
                .map_err(|_| {
                    StudyError::InvalidDifficulty(format!("{} ({})", p.difficulty, title))
                })?;
            inserted += stmt.execute(params![
                title,
                difficulty.as_str(),
                p.grouping,
                p.leetcode_number
            ])?;
        }
    }
    tx.commit()?;

    Ok(inserted)
}
