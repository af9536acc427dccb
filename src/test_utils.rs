// SPDX-License-Identifier: MPL-2.0
//! Test helpers for float comparisons.
//!
//! Re-exports the `approx` assertion macros, which handle floating-point
//! precision where `assert_eq!` cannot.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

/// Default epsilon for f32 comparisons.
pub const F32_EPSILON: f32 = 1e-6;

/// Default epsilon for f64 comparisons.
pub const F64_EPSILON: f64 = 1e-10;
