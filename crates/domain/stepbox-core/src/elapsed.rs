//! Elapsed-time math for a step box: what value to show, when the next whole-second boundary
//! falls, and how to print a duration.

use crate::StepState;

pub const MS_PER_SECOND: i64 = 1000;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Whole seconds elapsed since `start_ms`, expressed in milliseconds. Truncates, so the value
/// never runs ahead of the real elapsed time. Clock skew (start in the future) shows zero.
pub fn running_elapsed_ms(start_ms: i64, now_ms: i64) -> i64 {
    let since = now_ms.saturating_sub(start_ms).max(0);
    since / MS_PER_SECOND * MS_PER_SECOND
}

/// Milliseconds until the elapsed time since `start_ms` crosses the next second boundary.
/// Always in `1..=1000`.
pub fn next_tick_delay_ms(start_ms: i64, now_ms: i64) -> i64 {
    MS_PER_SECOND - now_ms.saturating_sub(start_ms).rem_euclid(MS_PER_SECOND)
}

/// The elapsed value a box should display, if any.
///
/// A running step derives it from `start`; without a start timestamp there is nothing to show.
/// Any other state shows the supplied `elapsed` untouched.
pub fn displayed_elapsed_ms(
    state: StepState,
    start_ms: Option<i64>,
    elapsed_ms: Option<f64>,
    now_ms: i64,
) -> Option<f64> {
    if state.is_running() {
        return start_ms.map(|start| running_elapsed_ms(start, now_ms) as f64);
    }
    elapsed_ms
}

/// Formats a duration: `"420 msec"` below one second, `"4:07"` below one hour, `"1:04:07"` above.
pub fn format_elapsed(elapsed_ms: f64) -> String {
    if elapsed_ms < MS_PER_SECOND as f64 {
        return format!("{} msec", elapsed_ms.max(0.0).ceil() as u64);
    }

    let total_secs = (elapsed_ms / MS_PER_SECOND as f64).floor() as u64;
    let sec = total_secs % SECONDS_PER_MINUTE;
    let min = (total_secs / SECONDS_PER_MINUTE) % SECONDS_PER_MINUTE;
    let hours = total_secs / SECONDS_PER_HOUR;

    if hours > 0 {
        format!("{hours}:{min:02}:{sec:02}")
    } else {
        format!("{min}:{sec:02}")
    }
}
