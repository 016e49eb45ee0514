// src/models.rs

use crate::constants::*;
use crate::error::StudyError;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// --- Catalog Models ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difficulty filter used by `study` and `review`. Accepts the long names
/// and their one-letter shorthands, in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    Any,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::Any => true,
            DifficultyFilter::Only(d) => *d == difficulty,
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "any" => Ok(DifficultyFilter::Any),
            "e" => Ok(DifficultyFilter::Only(Difficulty::Easy)),
            "m" => Ok(DifficultyFilter::Only(Difficulty::Medium)),
            "h" => Ok(DifficultyFilter::Only(Difficulty::Hard)),
            other => other
                .parse::<Difficulty>()
                .map(DifficultyFilter::Only)
                .map_err(|_| format!("expected easy, medium, hard or any (got '{}')", s)),
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::Any => f.write_str("any"),
            DifficultyFilter::Only(d) => f.write_str(d.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub id: i64,
    pub title: String,
    pub difficulty: Difficulty,
    pub grouping: String,
    pub leetcode_number: i64,
}

impl Problem {
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    pub fn url(&self) -> String {
        format!("{}/{}/", LEETCODE_PROBLEM_BASE_URL, self.slug())
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// --- Rating Models ---

/// Self-reported effort after finishing a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffortRating {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl EffortRating {
    pub fn value(&self) -> i64 {
        *self as i64
    }

    /// SM-2 quality for this rating. Hard maps to a failing grade.
    pub fn quality(&self) -> u8 {
        match self {
            EffortRating::Easy => 5,
            EffortRating::Medium => 3,
            EffortRating::Hard => 1,
        }
    }
}

impl TryFrom<i64> for EffortRating {
    type Error = StudyError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(EffortRating::Easy),
            2 => Ok(EffortRating::Medium),
            3 => Ok(EffortRating::Hard),
            other => Err(StudyError::InvalidRating(other)),
        }
    }
}

// --- Scheduling Models ---

/// Current repetition state of a problem, derived from its latest completion.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingState {
    pub ease_factor: f64,
    pub interval_days: i64,
    pub repetitions: i64,
    pub next_review: Option<DateTime<Utc>>,
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl Default for SchedulingState {
    fn default() -> Self {
        SchedulingState {
            ease_factor: EASE_FACTOR_DEFAULT,
            interval_days: INTERVAL_DEFAULT,
            repetitions: REPETITIONS_DEFAULT,
            next_review: None,
            last_completed_at: None,
        }
    }
}

/// Output of one scheduler step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOutcome {
    pub interval_days: i64,
    pub ease_factor: f64,
    pub repetitions: i64,
}

impl ScheduleOutcome {
    /// `now + interval` days, or `None` past the last representable date.
    pub fn next_review(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.interval_days
            .checked_mul(DAY_SECONDS)
            .and_then(Duration::try_seconds)
            .and_then(|delta| now.checked_add_signed(delta))
    }
}

/// One stored completion row. Never updated once written.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionEvent {
    pub id: i64,
    pub problem_id: i64,
    pub rating: EffortRating,
    pub interval_days: i64,
    pub ease_factor: f64,
    pub repetitions: i64,
    pub next_review: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub fn state(&self) -> SchedulingState {
        SchedulingState {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
            repetitions: self.repetitions,
            next_review: Some(self.next_review),
            last_completed_at: Some(self.completed_at),
        }
    }
}

// Used for seeding
#[derive(Deserialize, Debug)]
pub struct JsonProblem {
    pub title: String,
    pub difficulty: String,
    #[serde(default, alias = "category")]
    pub grouping: String,
    #[serde(default, alias = "id")]
    pub leetcode_number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_filter_accepts_shorthands_and_case() {
        assert_eq!("a".parse::<DifficultyFilter>(), Ok(DifficultyFilter::Any));
        assert_eq!("ANY".parse::<DifficultyFilter>(), Ok(DifficultyFilter::Any));
        assert_eq!(
            "h".parse::<DifficultyFilter>(),
            Ok(DifficultyFilter::Only(Difficulty::Hard))
        );
        assert_eq!(
            "Medium".parse::<DifficultyFilter>(),
            Ok(DifficultyFilter::Only(Difficulty::Medium))
        );
        assert!("brutal".parse::<DifficultyFilter>().is_err());
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        assert!(matches!(
            EffortRating::try_from(0),
            Err(StudyError::InvalidRating(0))
        ));
        assert!(matches!(
            EffortRating::try_from(4),
            Err(StudyError::InvalidRating(4))
        ));
        assert_eq!(EffortRating::try_from(3).ok(), Some(EffortRating::Hard));
    }

    #[test]
    fn test_problem_url_uses_slug() {
        let p = Problem {
            id: 1,
            title: "Two Sum II - Input Array Is Sorted".to_string(),
            difficulty: Difficulty::Medium,
            grouping: "Two Pointers".to_string(),
            leetcode_number: 167,
        };
        assert_eq!(
            p.url(),
            "https://leetcode.com/problems/two-sum-ii-input-array-is-sorted/"
        );
    }

    #[test]
    fn test_next_review_out_of_range_is_none() {
        let outcome = ScheduleOutcome {
            interval_days: INTERVAL_MAX,
            ease_factor: 4.0,
            repetitions: 12,
        };
        let start = DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap();
        assert_eq!(
            outcome.next_review(start),
            Some(start + Duration::days(INTERVAL_MAX))
        );
        assert_eq!(outcome.next_review(DateTime::<Utc>::MAX_UTC), None);

        let huge = ScheduleOutcome {
            interval_days: i64::MAX,
            ..outcome
        };
        assert_eq!(huge.next_review(start), None);
    }
}
