// src/constants.rs

// --- Time Constants ---
pub const DAY_SECONDS: i64 = 86400;

// --- Spaced Repetition (SM-2) Parameters ---
pub const EASE_FACTOR_MIN: f64 = 1.3;
pub const EASE_FACTOR_DEFAULT: f64 = 2.5;
pub const INTERVAL_DEFAULT: i64 = 1; // Days
pub const REPETITIONS_DEFAULT: i64 = 0;

// Quality below this is a lapse
pub const QUALITY_PASS: u8 = 3;
pub const QUALITY_MAX: u8 = 5;

// Fixed intervals for the first two successful reviews (days)
pub const INTERVAL_FIRST_EASY: i64 = 4;
pub const INTERVAL_FIRST_MEDIUM: i64 = 2;
pub const INTERVAL_SECOND_EASY: i64 = 14;
pub const INTERVAL_SECOND_MEDIUM: i64 = 7;
pub const INTERVAL_LAPSE: i64 = 1;
// Cap on any interval (days), roughly a century
pub const INTERVAL_MAX: i64 = 36_500;

// --- Review Buckets ---
// Reviews due within this many days count as "upcoming"
pub const UPCOMING_WINDOW_DAYS: i64 = 3;

// --- Projection ---
pub const PROBLEMS_PER_DAY: i64 = 3;
pub const REVIEWS_PER_PROBLEM: i64 = 2;

// --- Catalog ---
pub const LEETCODE_PROBLEM_BASE_URL: &str = "https://leetcode.com/problems";
