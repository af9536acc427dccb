// SPDX-License-Identifier: MPL-2.0
//! `playmark` plays a single video while keeping a time-indexed set of text
//! labels in sync with it, and lets the viewer author new labels by marking
//! start and end points on the timeline.
//!
//! The playback core lives in [`video_player`]; [`subtitle_store`] holds
//! the labels of a session and [`config`] the user settings.

#![doc(html_root_url = "https://docs.rs/playmark/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod subtitle_store;
pub mod video_player;

#[cfg(test)]
pub mod test_utils;
