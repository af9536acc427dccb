// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

use crate::config::{DEFAULT_HIDE_DELAY_TICKS, MAX_HIDE_DELAY_TICKS, MIN_HIDE_DELAY_TICKS};

// =============================================================================
// Progress
// =============================================================================

/// Fractional playback position, guaranteed to be within `[0.0, 1.0]`.
///
/// This is the scrub value bound to the timeline slider. Non-finite input
/// collapses to the start of the media.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    /// Start of the media.
    pub const START: Self = Self(0.0);

    /// End of the media.
    pub const END: Self = Self(1.0);

    /// Creates a new progress value, clamping to valid range.
    #[must_use]
    pub fn new(fraction: f64) -> Self {
        if fraction.is_finite() {
            Self(fraction.clamp(0.0, 1.0))
        } else {
            Self::START
        }
    }

    /// Computes the progress of `position_secs` within a media of
    /// `duration_secs`. An unknown or empty duration yields the start.
    #[must_use]
    pub fn from_position(position_secs: f64, duration_secs: f64) -> Self {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Self::START;
        }
        Self::new(position_secs / duration_secs)
    }

    /// Returns the fraction as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Converts the fraction to an absolute position in seconds.
    #[must_use]
    pub fn seconds_at(self, duration_secs: f64) -> f64 {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return 0.0;
        }
        self.0 * duration_secs
    }
}

// =============================================================================
// HideDelay
// =============================================================================

/// Number of idle ticks after which the control overlay hides itself.
///
/// Clamped to 1–30 ticks so the overlay can neither hide instantly nor
/// linger indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideDelay(u32);

impl HideDelay {
    /// Creates a new hide delay, clamping to valid range.
    #[must_use]
    pub fn new(ticks: u32) -> Self {
        Self(ticks.clamp(MIN_HIDE_DELAY_TICKS, MAX_HIDE_DELAY_TICKS))
    }

    /// Returns the value as u32.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns true once `idle_ticks` has reached the delay.
    #[must_use]
    pub fn is_reached(self, idle_ticks: u32) -> bool {
        idle_ticks >= self.0
    }
}

impl Default for HideDelay {
    fn default() -> Self {
        Self(DEFAULT_HIDE_DELAY_TICKS)
    }
}

// =============================================================================
// Tests
// =============================================================================
