// src/repository.rs

use crate::error::{Result, StudyError};
use crate::models::{
    CompletionEvent, DifficultyFilter, EffortRating, Problem, ScheduleOutcome, SchedulingState,
};
use crate::scheduler;
use chrono::{DateTime, SubsecRound, Utc};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;

const PROBLEM_COLUMNS: &str = "id, title, difficulty, grouping, leetcode_number";
const COMPLETION_COLUMNS: &str =
    "id, problem_id, effort_rating, interval_days, easiness_factor, repetitions, next_review_ts, completed_at";

// --- Row Mapping ---

fn problem_from_row(row: &Row) -> rusqlite::Result<Problem> {
    let difficulty: String = row.get(2)?;
    Ok(Problem {
        id: row.get(0)?,
        title: row.get(1)?,
        difficulty: difficulty
            .parse()
            .map_err(|e: String| {
                rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into())
            })?,
        grouping: row.get(3)?,
        leetcode_number: row.get(4)?,
    })
}

fn completion_from_row(row: &Row) -> rusqlite::Result<CompletionEvent> {
    let rating: i64 = row.get(2)?;
    Ok(CompletionEvent {
        id: row.get(0)?,
        problem_id: row.get(1)?,
        rating: EffortRating::try_from(rating)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e)))?,
        interval_days: row.get(3)?,
        ease_factor: row.get(4)?,
        repetitions: row.get(5)?,
        next_review: from_ts(row, 6)?,
        completed_at: from_ts(row, 7)?,
    })
}

fn from_ts(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let ts: i64 = row.get(idx)?;
    DateTime::<Utc>::from_timestamp(ts, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp {} out of range", ts).into(),
        )
    })
}

// --- Catalog ---

/// Lists catalog problems in insertion order, optionally restricted to one
/// difficulty (case-insensitive).
pub fn list_problems(conn: &Connection, filter: DifficultyFilter) -> Result<Vec<Problem>> {
    let problems = match filter {
        DifficultyFilter::Any => {
            let mut stmt =
                conn.prepare(&format!("SELECT {} FROM problems ORDER BY id ASC", PROBLEM_COLUMNS))?;
            let rows = stmt.query_map([], problem_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
        DifficultyFilter::Only(difficulty) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM problems WHERE LOWER(difficulty) = LOWER(?) ORDER BY id ASC",
                PROBLEM_COLUMNS
            ))?;
            let rows = stmt.query_map([difficulty.as_str()], problem_from_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
    };
    Ok(problems)
}

/// Looks up a problem by its exact title.
pub fn find_problem(conn: &Connection, title: &str) -> Result<Problem> {
    conn.query_row(
        &format!("SELECT {} FROM problems WHERE title = ?", PROBLEM_COLUMNS),
        [title],
        problem_from_row,
    )
    .optional()?
    .ok_or_else(|| StudyError::ProblemNotFound(title.to_string()))
}

pub fn count_problems(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT count(*) FROM problems", [], |r| r.get(0))?)
}

// --- Completions ---

/// All completions of one problem, oldest first.
pub fn problem_history(conn: &Connection, problem_id: i64) -> Result<Vec<CompletionEvent>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM completions WHERE problem_id = ? ORDER BY completed_at ASC, id ASC",
        COMPLETION_COLUMNS
    ))?;
    let events = stmt
        .query_map([problem_id], completion_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(events)
}

pub fn all_completions(conn: &Connection) -> Result<Vec<CompletionEvent>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM completions ORDER BY completed_at ASC, id ASC",
        COMPLETION_COLUMNS
    ))?;
    let events = stmt
        .query_map([], completion_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(events)
}

/// State from the most recent completion of a problem, if any.
pub fn latest_state(conn: &Connection, problem_id: i64) -> Result<Option<SchedulingState>> {
    let event = conn
        .query_row(
            &format!(
                "SELECT {} FROM completions WHERE problem_id = ? ORDER BY completed_at DESC, id DESC LIMIT 1",
                COMPLETION_COLUMNS
            ),
            [problem_id],
            completion_from_row,
        )
        .optional()?;
    Ok(event.map(|e| e.state()))
}

/// Latest state for every problem that has at least one completion.
pub fn latest_states(conn: &Connection) -> Result<HashMap<i64, SchedulingState>> {
    let events = all_completions(conn)?;
    let states = scheduler::latest_states(&events);
    debug!(
        "[DB] Derived {} states from {} completions",
        states.len(),
        events.len()
    );
    Ok(states)
}

/// Records a completion. The next review is `now + interval` days; a date
/// past the supported range is rejected before anything is written.
pub fn append_completion(
    conn: &Connection,
    problem_id: i64,
    rating: EffortRating,
    outcome: &ScheduleOutcome,
    now: DateTime<Utc>,
) -> Result<CompletionEvent> {
    let next_review = outcome
        .next_review(now)
        .ok_or(StudyError::ScheduleOutOfRange(outcome.interval_days))?;
    conn.execute(
        "INSERT INTO completions (problem_id, effort_rating, interval_days, easiness_factor, repetitions, next_review_ts, completed_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            problem_id,
            rating.value(),
            outcome.interval_days,
            outcome.ease_factor,
            outcome.repetitions,
            next_review.timestamp(),
            now.timestamp()
        ],
    )?;

    Ok(CompletionEvent {
        id: conn.last_insert_rowid(),
        problem_id,
        rating,
        interval_days: outcome.interval_days,
        ease_factor: outcome.ease_factor,
        repetitions: outcome.repetitions,
        next_review: next_review.trunc_subsecs(0),
        completed_at: now.trunc_subsecs(0),
    })
}
