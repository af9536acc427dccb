// SPDX-License-Identifier: MPL-2.0
//! Subtitle value records.
//!
//! Subtitles are immutable once created and compare by value: two records
//! with the same text and the same range are the same subtitle.

mod types;

pub use types::{Subtitle, TimeRange};
