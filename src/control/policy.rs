//! Parameter coercion rules.
//!
//! Out-of-domain input is corrected here and never reported as an error.

use super::command::ArgValue;

pub const DEFAULT_VOLUME: f32 = 0.5;
pub const DEFAULT_FREQUENCY: f32 = 440.0;
pub const MIN_VOLUME: f32 = 0.0;
pub const MAX_VOLUME: f32 = 1.0;

/// Resolve a raw `volume` argument to a value in `[0.0, 1.0]`.
///
/// Absent, non-numeric or non-finite input yields [`DEFAULT_VOLUME`].
pub fn coerce_volume(raw: Option<&ArgValue>) -> f32 {
    raw.and_then(ArgValue::as_f64)
        .map_or(DEFAULT_VOLUME, |value| clamp_volume(value as f32))
}

/// Resolve a raw `frequency` argument to a positive value.
///
/// Absent, non-numeric, non-finite or non-positive input yields
/// [`DEFAULT_FREQUENCY`]. Positive values pass through unclamped.
pub fn coerce_frequency(raw: Option<&ArgValue>) -> f32 {
    raw.and_then(ArgValue::as_f64)
        .map_or(DEFAULT_FREQUENCY, |value| sanitize_frequency(value as f32))
}

pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        DEFAULT_VOLUME
    } else {
        volume.clamp(MIN_VOLUME, MAX_VOLUME)
    }
}

pub fn sanitize_frequency(frequency: f32) -> f32 {
    // f64 -> f32 can overflow to infinity or underflow to zero
    if frequency.is_finite() && frequency > 0.0 {
        frequency
    } else {
        DEFAULT_FREQUENCY
    }
}
