//! Time representation in seconds, with tick interop for engine adapters.
//!
//! The composition model manipulates time as `f64` seconds throughout. The
//! value `-1.0` is a reserved sentinel meaning "unspecified / natural length"
//! and must survive tick conversion untouched in both directions.

/// Time in seconds since timeline start.
/// This is the core time representation throughout the model.
pub type Seconds = f64;

/// Ticks per second used by tick-based rendering engines.
pub const TICKS_PER_SECOND: f64 = 10_000_000.0;

/// Sentinel meaning "unspecified / use the natural length".
pub const UNSPECIFIED: Seconds = -1.0;

/// True if `value` is the unspecified sentinel (any negative value counts,
/// matching the `clip_end < 0` contract in clip insertion).
#[inline]
pub fn is_unspecified(value: Seconds) -> bool {
    value < 0.0
}

/// Convert seconds to engine ticks.
///
/// The unspecified sentinel passes through unscaled.
#[inline]
pub fn to_ticks(seconds: Seconds) -> i64 {
    if seconds == UNSPECIFIED {
        return -1;
    }
    (seconds * TICKS_PER_SECOND) as i64
}

/// Convert engine ticks to seconds.
///
/// The unspecified sentinel passes through unscaled.
#[inline]
pub fn from_ticks(ticks: i64) -> Seconds {
    if ticks == -1 {
        return UNSPECIFIED;
    }
    ticks as f64 / TICKS_PER_SECOND
}

/// Format time as HH:MM:SS.mmm
pub fn format_time(seconds: Seconds) -> String {
    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as i64;
    let secs = (seconds % 60.0).floor() as i64;
    let millis = ((seconds * 1000.0).round() as i64) % 1000;

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, millis)
}
