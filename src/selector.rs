// src/selector.rs

use crate::models::{DifficultyFilter, Problem, SchedulingState};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;

/// Priority bucket a problem falls into for a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    DueNow = 1,
    NeverAttempted = 2,
    Upcoming = 3,
}

pub fn classify(
    state: Option<&SchedulingState>,
    now: DateTime<Utc>,
) -> (Tier, Option<DateTime<Utc>>) {
    match state.and_then(|s| s.next_review) {
        Some(due) if due <= now => (Tier::DueNow, Some(due)),
        Some(due) => (Tier::Upcoming, Some(due)),
        None => (Tier::NeverAttempted, None),
    }
}

/// Ranks `problems` for a session of `count`: due reviews (most overdue
/// first), then never-attempted problems in catalog order, then upcoming
/// reviews (soonest first). `states` is keyed by problem id and holds only
/// the latest state of each problem.
///
/// Sorting is stable, so equal due dates keep catalog order.
pub fn select_candidates(
    problems: &[Problem],
    states: &HashMap<i64, SchedulingState>,
    filter: DifficultyFilter,
    count: usize,
    now: DateTime<Utc>,
) -> Vec<Problem> {
    if count == 0 {
        return Vec::new();
    }

    let mut due_now = Vec::new();
    let mut never_attempted = Vec::new();
    let mut upcoming = Vec::new();

    for problem in problems.iter().filter(|p| filter.matches(p.difficulty)) {
        match classify(states.get(&problem.id), now) {
            (Tier::DueNow, Some(due)) => due_now.push((due, problem)),
            (Tier::Upcoming, Some(due)) => upcoming.push((due, problem)),
            _ => never_attempted.push(problem),
        }
    }

    due_now.sort_by_key(|(due, _)| *due);
    upcoming.sort_by_key(|(due, _)| *due);

    debug!(
        "[Selector] filter={} due={} new={} upcoming={}",
        filter,
        due_now.len(),
        never_attempted.len(),
        upcoming.len()
    );

    due_now
        .into_iter()
        .map(|(_, p)| p)
        .chain(never_attempted)
        .chain(upcoming.into_iter().map(|(_, p)| p))
        .take(count)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 9, 30, 0).unwrap()
    }

    fn problem(id: i64, title: &str, difficulty: Difficulty) -> Problem {
        Problem {
            id,
            title: title.to_string(),
            difficulty,
            grouping: "Arrays & Hashing".to_string(),
            leetcode_number: id,
        }
    }

    fn due_in(days: i64) -> SchedulingState {
        SchedulingState {
            next_review: Some(now() + Duration::days(days)),
            last_completed_at: Some(now() - Duration::days(10)),
            ..SchedulingState::default()
        }
    }

    fn titles(ps: &[Problem]) -> Vec<&str> {
        ps.iter().map(|p| p.title.as_str()).collect()
    }

    #[test]
    fn test_three_tier_order() {
        let problems = vec![
            problem(3, "P3", Difficulty::Medium),
            problem(2, "P2", Difficulty::Easy),
            problem(1, "P1", Difficulty::Hard),
        ];
        let states = HashMap::from([(1, due_in(-5)), (3, due_in(2))]);

        let picked = select_candidates(&problems, &states, DifficultyFilter::Any, 3, now());
        assert_eq!(titles(&picked), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_due_exactly_now_is_due() {
        let problems = vec![
            problem(1, "New", Difficulty::Easy),
            problem(2, "Edge", Difficulty::Easy),
        ];
        let states = HashMap::from([(2, due_in(0))]);
        let picked = select_candidates(&problems, &states, DifficultyFilter::Any, 2, now());
        assert_eq!(titles(&picked), vec!["Edge", "New"]);
    }

    #[test]
    fn test_within_tier_sorted_by_due_date() {
        let problems = vec![
            problem(1, "A", Difficulty::Easy),
            problem(2, "B", Difficulty::Easy),
            problem(3, "C", Difficulty::Easy),
            problem(4, "D", Difficulty::Easy),
            problem(5, "E", Difficulty::Easy),
        ];
        let states = HashMap::from([
            (1, due_in(-1)),
            (2, due_in(-9)),
            (3, due_in(6)),
            (4, due_in(1)),
        ]);
        let picked = select_candidates(&problems, &states, DifficultyFilter::Any, 10, now());
        assert_eq!(titles(&picked), vec!["B", "A", "E", "D", "C"]);
    }

    #[test]
    fn test_equal_due_dates_keep_catalog_order() {
        let problems = vec![
            problem(1, "Up first", Difficulty::Easy),
            problem(2, "Due first", Difficulty::Medium),
            problem(3, "New", Difficulty::Easy),
            problem(4, "Up second", Difficulty::Hard),
            problem(5, "Due second", Difficulty::Easy),
            problem(6, "Due third", Difficulty::Hard),
        ];
        let states = HashMap::from([
            (1, due_in(2)),
            (2, due_in(-4)),
            (4, due_in(2)),
            (5, due_in(-4)),
            (6, due_in(-4)),
        ]);

        let picked = select_candidates(&problems, &states, DifficultyFilter::Any, 10, now());
        assert_eq!(
            titles(&picked),
            vec!["Due first", "Due second", "Due third", "New", "Up first", "Up second"]
        );
    }

    #[test]
    fn test_filter_keeps_tier_order() {
        let problems = vec![
            problem(1, "Easy new", Difficulty::Easy),
            problem(2, "Hard upcoming", Difficulty::Hard),
            problem(3, "Hard new", Difficulty::Hard),
            problem(4, "Medium due", Difficulty::Medium),
            problem(5, "Hard due", Difficulty::Hard),
        ];
        let states = HashMap::from([(2, due_in(3)), (4, due_in(-2)), (5, due_in(-1))]);

        let picked = select_candidates(
            &problems,
            &states,
            "HARD".parse().unwrap(),
            10,
            now(),
        );
        assert_eq!(titles(&picked), vec!["Hard due", "Hard new", "Hard upcoming"]);
        assert!(picked.iter().all(|p| p.difficulty == Difficulty::Hard));
    }

    #[test]
    fn test_truncation_and_zero_count() {
        let problems = vec![problem(1, "A", Difficulty::Easy), problem(2, "B", Difficulty::Easy)];
        let states = HashMap::from([(2, due_in(-3))]);

        let one = select_candidates(&problems, &states, DifficultyFilter::Any, 1, now());
        assert_eq!(titles(&one), vec!["B"]);

        assert!(select_candidates(&problems, &states, DifficultyFilter::Any, 0, now()).is_empty());
    }

    #[test]
    fn test_empty_catalog_is_empty() {
        let picked = select_candidates(&[], &HashMap::new(), DifficultyFilter::Any, 5, now());
        assert!(picked.is_empty());
    }

    #[test]
    fn test_repeatable() {
        let problems: Vec<Problem> = (1..=20)
            .map(|i| problem(i, &format!("P{}", i), Difficulty::Medium))
            .collect();
        let states: HashMap<i64, SchedulingState> = (1..=20)
            .filter(|i| i % 3 != 0)
            .map(|i| (i, due_in((i % 5) - 2)))
            .collect();

        let first = select_candidates(&problems, &states, DifficultyFilter::Any, 12, now());
        let second = select_candidates(&problems, &states, DifficultyFilter::Any, 12, now());
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
    }
}
