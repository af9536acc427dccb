// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Controls**: Idle auto-hide delay for the control overlay
//! - **Clocks**: Idle tick and progress report cadences
//! - **Logging**: Default log filter

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Default number of idle ticks before the control overlay hides.
pub const DEFAULT_HIDE_DELAY_TICKS: u32 = 3;

/// Minimum hide delay (in ticks).
pub const MIN_HIDE_DELAY_TICKS: u32 = 1;

/// Maximum hide delay (in ticks).
pub const MAX_HIDE_DELAY_TICKS: u32 = 30;

// ==========================================================================
// Clock Defaults
// ==========================================================================

/// Default interval between idle ticks (1 Hz).
pub const DEFAULT_IDLE_TICK_INTERVAL_MS: u64 = 1_000;

/// Default interval between progress reports from the player (≈2 Hz).
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 500;

/// Shortest accepted clock interval.
pub const MIN_CLOCK_INTERVAL_MS: u64 = 10;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Default `env_logger` filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_HIDE_DELAY_TICKS > 0);
    assert!(MAX_HIDE_DELAY_TICKS >= MIN_HIDE_DELAY_TICKS);
    assert!(DEFAULT_HIDE_DELAY_TICKS >= MIN_HIDE_DELAY_TICKS);
    assert!(DEFAULT_HIDE_DELAY_TICKS <= MAX_HIDE_DELAY_TICKS);

    assert!(MIN_CLOCK_INTERVAL_MS > 0);
    assert!(DEFAULT_IDLE_TICK_INTERVAL_MS >= MIN_CLOCK_INTERVAL_MS);
    assert!(DEFAULT_PROGRESS_INTERVAL_MS >= MIN_CLOCK_INTERVAL_MS);
};
