// src/scheduler.rs

use crate::constants::*;
use crate::models::{CompletionEvent, EffortRating, ScheduleOutcome, SchedulingState};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;

// --- Public Interface ---

/// Runs one SM-2 step. A missing prior state behaves like a never-completed
/// problem.
pub fn next_state(rating: EffortRating, prior: Option<&SchedulingState>) -> ScheduleOutcome {
    match prior {
        Some(state) => compute_next_state(rating, state),
        None => compute_next_state(rating, &SchedulingState::default()),
    }
}

/// One SM-2 step (Easy=5, Medium=3, Hard=1). Pure.
pub fn compute_next_state(rating: EffortRating, prior: &SchedulingState) -> ScheduleOutcome {
    let quality = rating.quality();
    let miss = f64::from(QUALITY_MAX - quality);

    // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floor only
    let ease_factor =
        (prior.ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(EASE_FACTOR_MIN);

    let (interval_days, repetitions) = if quality < QUALITY_PASS {
        debug!("[SM-2 logic] Branch: Lapse");
        (INTERVAL_LAPSE, 0)
    } else {
        let repetitions = prior.repetitions + 1;
        let easy = quality == QUALITY_MAX;
        let interval = match repetitions {
            1 if easy => INTERVAL_FIRST_EASY,
            1 => INTERVAL_FIRST_MEDIUM,
            2 if easy => INTERVAL_SECOND_EASY,
            2 => INTERVAL_SECOND_MEDIUM,
            _ => ((prior.interval_days as f64 * ease_factor).floor() as i64).min(INTERVAL_MAX),
        };
        debug!(
            "[SM-2 logic] Branch: Pass (reps {}, easy {})",
            repetitions, easy
        );
        (interval, repetitions)
    };

    ScheduleOutcome {
        interval_days,
        ease_factor,
        repetitions,
    }
}

/// Current state of one problem given its stored completions, in any order.
/// The latest completion wins; ties on time go to the later row.
pub fn derive_state(history: &[CompletionEvent]) -> SchedulingState {
    history
        .iter()
        .max_by_key(|e| (e.completed_at, e.id))
        .map(CompletionEvent::state)
        .unwrap_or_default()
}

/// Latest state per problem id from a flat list of completions.
pub fn latest_states(events: &[CompletionEvent]) -> HashMap<i64, SchedulingState> {
    let mut latest: HashMap<i64, &CompletionEvent> = HashMap::new();
    for event in events {
        latest
            .entry(event.problem_id)
            .and_modify(|current| {
                if (event.completed_at, event.id) > (current.completed_at, current.id) {
                    *current = event;
                }
            })
            .or_insert(event);
    }
    latest
        .into_iter()
        .map(|(problem_id, event)| (problem_id, event.state()))
        .collect()
}

/// Replays an ordered sequence of ratings from a fresh state. A due date past
/// the representable range is left unset.
pub fn replay(ratings: &[(EffortRating, DateTime<Utc>)]) -> SchedulingState {
    ratings
        .iter()
        .fold(SchedulingState::default(), |state, &(rating, at)| {
            let outcome = compute_next_state(rating, &state);
            SchedulingState {
                ease_factor: outcome.ease_factor,
                interval_days: outcome.interval_days,
                repetitions: outcome.repetitions,
                next_review: outcome.next_review(at),
                last_completed_at: Some(at),
            }
        })
}
