//! Timestamp masking.
//!
//! Event times are cut down to the start of their hour and shifted by a
//! bounded padding so stored events cannot be correlated by precise time.
//! Without usable padding the offset is the seconds-within-minute of the
//! original time, which spreads events across a minute without adding any
//! information beyond one-second resolution.

mod padding;

pub use padding::TimePadding;

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 3_600_000;

/// Upper bound for explicit padding (one day).
pub const MAX_PADDING_MS: i64 = 24 * MS_PER_HOUR;

/// Start of the hour containing `time` (ms since epoch).
pub fn base_hour(time: i64) -> i64 {
    // Saturates at i64::MIN, whose hour start is not representable.
    time.saturating_sub(time.rem_euclid(MS_PER_HOUR))
}

/// Mask `time` to its hour bucket plus padding.
///
/// Explicit padding is clamped to `[0, 24h]` and truncated to whole
/// milliseconds. Absent or non-numeric padding falls back to the second
/// within the minute of `time`.
pub fn mask_time(time: i64, padding: &TimePadding) -> i64 {
    let base = base_hour(time);

    if let Some(pad) = padding.resolve() {
        let pad = pad.clamp(0.0, MAX_PADDING_MS as f64) as i64;
        return base.saturating_add(pad);
    }

    let num_seconds = (time - base) / 1000;
    base + (num_seconds % 60) * 1000
}

/// Current wall-clock time in ms since epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Mask the current time. Code that needs to be reproducible should call
/// [`mask_time`] with an injected time instead.
pub fn masked_now(padding: &TimePadding) -> i64 {
    mask_time(now_millis(), padding)
}
