// src/render.rs

use crate::models::{Difficulty, Problem};
use crate::stats::{OverallStats, ReviewEntry, ReviewStatus, TierProgress};
use chrono::{DateTime, Utc};
use colored::{Color, ColoredString, Colorize};

const BAR_LENGTH: usize = 20;
const TITLE_WIDTH: usize = 40;

pub fn print_banner() {
    println!("{}", "=================================".cyan());
    println!("{}", "      NeetCode Study Tracker     ".cyan().bold());
    println!("{}", "=================================".cyan());
    println!();
    println!("Type 'help' to see available commands");
}

pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

pub fn print_candidates(problems: &[Problem]) {
    if problems.is_empty() {
        println!("\nNo problems match that filter.");
        return;
    }
    println!("\n{}", "Your Study Problems:".bold());
    println!("========================");
    for (i, p) in problems.iter().enumerate() {
        println!(
            "{}. [LC {}] {} ({}) - {}",
            i + 1,
            p.leetcode_number,
            p.title,
            p.difficulty.as_str().color(difficulty_color(p.difficulty)),
            p.grouping
        );
    }
    println!();
}

pub fn print_remaining(problems: &[Problem]) {
    if problems.is_empty() {
        return;
    }
    println!("\nRemaining problems:");
    for (i, p) in problems.iter().enumerate() {
        println!("{}. [LC {}] {}", i + 1, p.leetcode_number, p.title);
    }
    println!();
}

pub fn status_marker(status: Option<ReviewStatus>) -> ColoredString {
    match status {
        None => "○".dimmed(),
        Some(ReviewStatus::Overdue) => "●".red(),
        Some(ReviewStatus::DueToday) => "●".truecolor(255, 140, 0),
        Some(ReviewStatus::DueSoon) => "●".yellow(),
        Some(ReviewStatus::Scheduled) => "●".green(),
    }
}

pub fn status_label(days_until: Option<i64>) -> String {
    match days_until {
        None => "Never attempted".to_string(),
        Some(d) if d < 0 => format!("Overdue by {} days", -d),
        Some(0) => "Due today".to_string(),
        Some(d) => format!("Due in {} days", d),
    }
}

pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "Never".to_string(),
    }
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn print_review_history(entries: &[ReviewEntry]) {
    if entries.is_empty() {
        println!("\nNo completed problems yet. Complete some problems first!");
        return;
    }

    let rule = "=".repeat(92);
    println!("\n{}", "Review History:".bold());
    println!("{}", rule);
    println!(
        "{:<4} {:<40} {:<10} {:<15} {:<15}",
        "Stat", "Problem", "Difficulty", "Last Done", "Next Review"
    );
    println!("{}", "-".repeat(92));

    for e in entries {
        println!(
            "{}    {:<40} {:<10} {:<15} {:<15} {}",
            status_marker(e.status()),
            truncate(&e.problem.title, TITLE_WIDTH),
            e.problem.difficulty.as_str(),
            format_date(e.state.last_completed_at),
            format_date(e.state.next_review),
            status_label(e.days_until_review).dimmed()
        );
    }
    println!();
}

pub fn progress_bar(percent: f64, color: Color) -> String {
    let filled = ((percent / 100.0 * BAR_LENGTH as f64) as usize).min(BAR_LENGTH);
    format!(
        "[{}{}]",
        "█".repeat(filled).color(color),
        "░".repeat(BAR_LENGTH - filled)
    )
}

fn print_tier(difficulty: Difficulty, progress: TierProgress) {
    let color = difficulty_color(difficulty);
    println!(
        "  {:<8} {:>3} / {:<3} ({:>5.1}%)  {}",
        format!("{}:", difficulty.as_str()).color(color),
        progress.completed,
        progress.total,
        progress.percent(),
        progress_bar(progress.percent(), color)
    );
}

pub fn print_stats(stats: &OverallStats) {
    let rule = "─".repeat(57);

    println!();
    println!("{}", "Your Study Statistics".bold());
    println!("{}", "═".repeat(59));
    println!();

    println!("Overall Progress:");
    println!("{}", rule);
    println!(
        "  Total:      {} / {} problems completed ({:.1}%)",
        stats.overall.completed,
        stats.overall.total,
        stats.overall.percent()
    );
    println!("  Remaining:  {} problems", stats.remaining);
    println!();

    println!("Progress by Difficulty:");
    println!("{}", rule);
    for difficulty in Difficulty::ALL {
        print_tier(difficulty, stats.tier(difficulty));
    }
    println!();

    println!("Review Status:");
    println!("{}", rule);
    println!(
        "  {} Overdue:  {} problems",
        status_marker(Some(ReviewStatus::Overdue)),
        stats.overdue
    );
    println!(
        "  {} Today:    {} problems",
        status_marker(Some(ReviewStatus::DueToday)),
        stats.due_today
    );
    println!(
        "  {} Soon:     {} problems (within 3 days)",
        status_marker(Some(ReviewStatus::DueSoon)),
        stats.upcoming
    );
    println!(
        "  {} Later:    {} problems",
        status_marker(Some(ReviewStatus::Scheduled)),
        stats.future
    );
    println!();

    println!("Projections (at 3 problems/day assuming {} completions):", "Easy".green());
    println!("{}", rule);
    println!("  Estimated days to complete:  {} days", stats.estimated_days_to_complete);
    println!(
        "  Estimated completion date:   {}",
        stats.estimated_completion_date.format("%b %-d, %Y")
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Two Sum", 40), "Two Sum");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("abcdefgh", 8), "abcdefgh");
    }

    #[test]
    fn test_format_date() {
        let d = Utc.with_ymd_and_hms(2025, 1, 5, 3, 0, 0).unwrap();
        assert_eq!(format_date(Some(d)), "Jan 5, 2025");
        assert_eq!(format_date(None), "Never");
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(None), "Never attempted");
        assert_eq!(status_label(Some(-2)), "Overdue by 2 days");
        assert_eq!(status_label(Some(0)), "Due today");
        assert_eq!(status_label(Some(5)), "Due in 5 days");
    }

    #[test]
    fn test_progress_bar_fill() {
        colored::control::set_override(false);
        assert_eq!(progress_bar(0.0, Color::Green), format!("[{}]", "░".repeat(20)));
        assert_eq!(
            progress_bar(50.0, Color::Green),
            format!("[{}{}]", "█".repeat(10), "░".repeat(10))
        );
        assert_eq!(progress_bar(140.0, Color::Red), format!("[{}]", "█".repeat(20)));
    }
}
