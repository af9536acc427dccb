// SPDX-License-Identifier: MPL-2.0
//! Time normalization for subtitle indexing.
//!
//! Media engines report positions with their own precision (timescales,
//! fractional seconds). Every subtitle comparison and every authored mark
//! goes through [`normalize`] so lookup and authoring share one discrete
//! time domain: whole seconds.

/// Rounds a media timestamp (in seconds) to the nearest whole second.
///
/// Absent, negative or non-finite timestamps normalize to `0`. Halves round
/// away from zero.
///
/// # Examples
///
/// ```
/// use playmark::video_player::time_units::normalize;
///
/// assert_eq!(normalize(Some(2.4)), 2);
/// assert_eq!(normalize(Some(2.5)), 3);
/// assert_eq!(normalize(None), 0);
/// ```
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize(timestamp: Option<f64>) -> u64 {
    match timestamp {
        Some(secs) if secs.is_finite() && secs > 0.0 => secs.round() as u64,
        _ => 0,
    }
}

/// Converts a canonical second back to a media timestamp.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn second_to_secs(second: u64) -> f64 {
    second as f64
}
