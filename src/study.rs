// src/study.rs

use crate::error::Result;
use crate::models::{CompletionEvent, DifficultyFilter, EffortRating, Problem};
use crate::repository;
use crate::scheduler;
use crate::selector;
use crate::stats::{self, OverallStats, ReviewEntry};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::Connection;

// --- Public Interface ---

pub fn next_candidates(
    conn: &Connection,
    filter: DifficultyFilter,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<Problem>> {
    debug!("Requesting {} candidates (difficulty: {})", count, filter);
    let problems = repository::list_problems(conn, filter)?;
    let states = repository::latest_states(conn)?;
    let picked = selector::select_candidates(&problems, &states, filter, count, now);
    info!("Selected {} of {} problems", picked.len(), problems.len());
    Ok(picked)
}

/// Schedules the next review of `title` and stores the completion. Nothing
/// is written unless the rating is valid and the problem exists.
pub fn record_completion(
    conn: &Connection,
    title: &str,
    rating: i64,
    now: DateTime<Utc>,
) -> Result<CompletionEvent> {
    let rating = EffortRating::try_from(rating)?;
    info!("Processing completion for '{}' ({:?})", title, rating);

    let tx = conn.unchecked_transaction()?;
    let problem = repository::find_problem(&tx, title)?;
    let prior = repository::latest_state(&tx, problem.id)?;
    let outcome = scheduler::next_state(rating, prior.as_ref());
    let event = repository::append_completion(&tx, problem.id, rating, &outcome, now)?;
    tx.commit()?;

    let prior = prior.unwrap_or_default();
    info!(
        "[SM-2 Result] {}: Ease {:.2} -> {:.2}, Interval {}d -> {}d, Reps {} -> {}",
        problem.title,
        prior.ease_factor,
        outcome.ease_factor,
        prior.interval_days,
        outcome.interval_days,
        prior.repetitions,
        outcome.repetitions
    );
    Ok(event)
}

pub fn review_history(
    conn: &Connection,
    filter: DifficultyFilter,
    now: DateTime<Utc>,
) -> Result<Vec<ReviewEntry>> {
    let problems = repository::list_problems(conn, filter)?;
    let states = repository::latest_states(conn)?;
    Ok(stats::review_history(&problems, &states, filter, now))
}

pub fn overall_stats(conn: &Connection, now: DateTime<Utc>) -> Result<OverallStats> {
    let problems = repository::list_problems(conn, DifficultyFilter::Any)?;
    let states = repository::latest_states(conn)?;
    Ok(stats::overall_stats(&problems, &states, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INTERVAL_MAX;
    use crate::database;
    use crate::error::StudyError;
    use chrono::{Duration, TimeZone};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        database::init_db(&conn, None).unwrap();
        conn
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 10, 7, 0, 0).unwrap()
    }

    #[test]
    fn test_two_sum_easy_then_medium() {
        let conn = setup();
        let first = record_completion(&conn, "Two Sum", 1, now()).unwrap();
        assert_eq!(first.interval_days, 4);
        assert_eq!(first.repetitions, 1);
        assert!((first.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(first.next_review, now() + Duration::days(4));

        let later = now() + Duration::days(4);
        let second = record_completion(&conn, "Two Sum", 2, later).unwrap();
        assert_eq!(second.interval_days, 7);
        assert_eq!(second.repetitions, 2);
        assert!((second.ease_factor - (first.ease_factor - 0.14)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_rating_writes_nothing() {
        let conn = setup();
        assert!(matches!(
            record_completion(&conn, "Two Sum", 4, now()),
            Err(StudyError::InvalidRating(4))
        ));
        assert!(repository::all_completions(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_problem_writes_nothing() {
        let conn = setup();
        assert!(matches!(
            record_completion(&conn, "Not A Problem", 1, now()),
            Err(StudyError::ProblemNotFound(_))
        ));
        assert!(repository::all_completions(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_completed_problem_moves_behind_new_ones() {
        let conn = setup();
        let before = next_candidates(&conn, DifficultyFilter::Any, 1, now()).unwrap();
        assert_eq!(before[0].title, "Contains Duplicate");

        record_completion(&conn, "Contains Duplicate", 1, now()).unwrap();
        let after = next_candidates(&conn, DifficultyFilter::Any, 150, now()).unwrap();
        assert_eq!(after.len(), 150);
        assert_eq!(after[0].title, "Valid Anagram");
        assert_eq!(after[149].title, "Contains Duplicate");

        let later = now() + Duration::days(5);
        let due = next_candidates(&conn, DifficultyFilter::Any, 1, later).unwrap();
        assert_eq!(due[0].title, "Contains Duplicate");
    }

    #[test]
    fn test_stats_follow_completions() {
        let conn = setup();
        record_completion(&conn, "Two Sum", 3, now()).unwrap();
        let stats = overall_stats(&conn, now()).unwrap();
        assert_eq!(stats.overall.completed, 1);
        assert_eq!(stats.remaining, 149);
        assert_eq!(stats.easy.completed, 1);
        assert_eq!(stats.upcoming, 1);

        let history = review_history(&conn, DifficultyFilter::Any, now()).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].days_until_review, Some(1));
    }

    #[test]
    fn test_many_easy_marks_stay_in_range() {
        let conn = setup();
        let mut last = None;
        for _ in 0..40 {
            last = Some(record_completion(&conn, "Two Sum", 1, now()).unwrap());
        }
        let last = last.unwrap();
        assert_eq!(last.repetitions, 40);
        assert_eq!(last.interval_days, INTERVAL_MAX);
        assert_eq!(last.next_review, now() + Duration::days(INTERVAL_MAX));

        let p = repository::find_problem(&conn, "Two Sum").unwrap();
        assert_eq!(repository::problem_history(&conn, p.id).unwrap().len(), 40);
        assert_eq!(
            repository::latest_state(&conn, p.id).unwrap().map(|s| s.interval_days),
            Some(INTERVAL_MAX)
        );

        let history = review_history(&conn, DifficultyFilter::Any, now()).unwrap();
        assert_eq!(history[0].days_until_review, Some(INTERVAL_MAX));
    }
}
