// SPDX-License-Identifier: MPL-2.0
//! Contract between the playback core and a media engine.
//!
//! The core never decodes or renders. It issues transport commands through
//! [`MediaPlayer`] and consumes two independent streams the engine emits
//! once configured:
//!
//! - progress: `(fraction, current time)` at a fixed cadence (≈2 Hz)
//! - readiness: `true`/`false` whenever the asset becomes (un)playable
//!
//! No ordering is assumed between the two streams, and either may start
//! delivering before or after the session processes `prepare`.

use crate::domain::video::Progress;
use crate::error::PlayerError;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Container extensions the bundled adapters accept.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "mkv", "webm", "avi"];

/// Location of the media a session plays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    location: PathBuf,
}

impl MediaSource {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Returns true if the extension is one of [`SUPPORTED_EXTENSIONS`].
    pub fn has_supported_extension(&self) -> bool {
        self.location
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }
}

impl fmt::Display for MediaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location.display())
    }
}

/// One periodic position report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressUpdate {
    /// Position as a fraction of the media duration.
    pub fraction: Progress,
    /// Engine timestamp in seconds, if the engine knows it.
    pub time_secs: Option<f64>,
}

/// Receivers handed out by [`MediaPlayer::configure`].
///
/// Both streams stay open for the lifetime of the configured asset.
#[derive(Debug)]
pub struct PlayerStreams {
    pub progress: mpsc::UnboundedReceiver<ProgressUpdate>,
    pub readiness: mpsc::UnboundedReceiver<bool>,
}

/// Transport surface of a media engine.
///
/// Commands are fire-and-forget: an `Ok` means the engine accepted the
/// request, not that the transition already happened.
pub trait MediaPlayer: Send {
    /// Loads `source`, replacing any previous asset, and returns fresh
    /// progress and readiness streams.
    fn configure(&mut self, source: &MediaSource) -> Result<PlayerStreams, PlayerError>;

    fn play(&mut self) -> Result<(), PlayerError>;

    fn pause(&mut self) -> Result<(), PlayerError>;

    /// Moves the playhead to a fraction of the media duration.
    fn seek(&mut self, to: Progress) -> Result<(), PlayerError>;

    /// Current playhead position in seconds, `None` before configuration.
    fn current_time(&self) -> Option<f64>;
}
