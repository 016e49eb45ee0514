// src/stats.rs

use crate::constants::*;
use crate::models::{Difficulty, DifficultyFilter, Problem, SchedulingState};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::HashMap;

// --- Review Buckets ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Overdue,
    DueToday,
    DueSoon,
    Scheduled,
}

impl ReviewStatus {
    pub fn from_days(days_until: i64) -> Self {
        match days_until {
            d if d < 0 => ReviewStatus::Overdue,
            0 => ReviewStatus::DueToday,
            d if d <= UPCOMING_WINDOW_DAYS => ReviewStatus::DueSoon,
            _ => ReviewStatus::Scheduled,
        }
    }
}

/// Whole calendar days (UTC) from today until `due`. Negative when overdue.
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (due.date_naive() - now.date_naive()).num_days()
}

// --- Review History ---

#[derive(Debug, Clone)]
pub struct ReviewEntry {
    pub problem: Problem,
    pub state: SchedulingState,
    pub days_until_review: Option<i64>,
}

impl ReviewEntry {
    pub fn status(&self) -> Option<ReviewStatus> {
        self.days_until_review.map(ReviewStatus::from_days)
    }
}

/// Completed problems with their latest state, soonest review first, then by
/// title.
pub fn review_history(
    problems: &[Problem],
    states: &HashMap<i64, SchedulingState>,
    filter: DifficultyFilter,
    now: DateTime<Utc>,
) -> Vec<ReviewEntry> {
    let mut entries: Vec<ReviewEntry> = problems
        .iter()
        .filter(|p| filter.matches(p.difficulty))
        .filter_map(|p| {
            let state = states.get(&p.id)?;
            state.last_completed_at?;
            Some(ReviewEntry {
                problem: p.clone(),
                state: state.clone(),
                days_until_review: state.next_review.map(|due| days_until(due, now)),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.state
            .next_review
            .cmp(&b.state.next_review)
            .then_with(|| a.problem.title.cmp(&b.problem.title))
    });
    entries
}

// --- Overall Stats ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierProgress {
    pub total: usize,
    pub completed: usize,
}

impl TierProgress {
    pub fn percent(&self) -> f64 {
        if self.total > 0 {
            self.completed as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallStats {
    pub overall: TierProgress,
    pub remaining: usize,
    pub easy: TierProgress,
    pub medium: TierProgress,
    pub hard: TierProgress,

    pub overdue: usize,
    pub due_today: usize,
    pub upcoming: usize,
    pub future: usize,
    pub needs_review: usize,

    pub estimated_days_to_complete: i64,
    pub estimated_completion_date: NaiveDate,
}

impl OverallStats {
    pub fn tier(&self, difficulty: Difficulty) -> TierProgress {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Completion counts, review buckets and a pacing projection over one
/// snapshot of the catalog and its latest states.
pub fn overall_stats(
    problems: &[Problem],
    states: &HashMap<i64, SchedulingState>,
    now: DateTime<Utc>,
) -> OverallStats {
    let mut overall = TierProgress::default();
    let mut by_tier: HashMap<Difficulty, TierProgress> = HashMap::new();
    let (mut overdue, mut due_today, mut upcoming, mut future) = (0, 0, 0, 0);

    for problem in problems {
        let tier = by_tier.entry(problem.difficulty).or_default();
        tier.total += 1;
        overall.total += 1;

        let Some(state) = states.get(&problem.id) else {
            continue;
        };
        tier.completed += 1;
        overall.completed += 1;

        if let Some(due) = state.next_review {
            match ReviewStatus::from_days(days_until(due, now)) {
                ReviewStatus::Overdue => overdue += 1,
                ReviewStatus::DueToday => due_today += 1,
                ReviewStatus::DueSoon => upcoming += 1,
                ReviewStatus::Scheduled => future += 1,
            }
        }
    }

    let remaining = overall.total - overall.completed;
    let needs_review = overdue + due_today + upcoming;
    let estimated_days_to_complete = projected_days(remaining, needs_review);

    OverallStats {
        overall,
        remaining,
        easy: by_tier.get(&Difficulty::Easy).copied().unwrap_or_default(),
        medium: by_tier.get(&Difficulty::Medium).copied().unwrap_or_default(),
        hard: by_tier.get(&Difficulty::Hard).copied().unwrap_or_default(),
        overdue,
        due_today,
        upcoming,
        future,
        needs_review,
        estimated_days_to_complete,
        estimated_completion_date: (now + Duration::days(estimated_days_to_complete)).date_naive(),
    }
}

/// Days to finish at a fixed daily pace, counting every new problem as one
/// solve plus its follow-up reviews.
pub fn projected_days(remaining: usize, needs_review: usize) -> i64 {
    let work = remaining as i64 * (1 + REVIEWS_PER_PROBLEM) + needs_review as i64;
    (work + PROBLEMS_PER_DAY - 1) / PROBLEMS_PER_DAY
}
