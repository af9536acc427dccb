// SPDX-License-Identifier: MPL-2.0
//! Playback core for Playmark.
//!
//! This module holds the playback state machine, the label authoring flow,
//! the idle-hide timer and the session driver that connects them to a
//! [`MediaPlayer`] through Tokio channels.

pub mod adapter;
pub mod authoring;
pub mod idle_timer;
pub mod session;
pub mod simulated;
mod state;
pub mod time_units;

pub use adapter::{MediaPlayer, MediaSource, PlayerStreams, ProgressUpdate};
pub use authoring::{AuthoringState, AuthoringStep, PendingRange};
pub use idle_timer::{IdleTimer, TimerId};
pub use session::{Gesture, ParseGestureError, Session, SessionHandle};
pub use simulated::SimulatedPlayer;
pub use state::{Effect, Message, PlaybackMachine, PlaybackState};

use crate::config::Config;
use crate::subtitle_store::SubtitleStore;

/// Starts a session for `source` on the simulated player.
///
/// `duration_secs` is the length the player pretends the media has.
pub fn spawn_simulated(
    source: MediaSource,
    duration_secs: f64,
    config: &Config,
) -> (tokio::task::JoinHandle<SubtitleStore>, SessionHandle) {
    let player = SimulatedPlayer::new(duration_secs).with_progress_interval(config.progress_interval());
    let (session, handle) = Session::new(player, source, SubtitleStore::new(), config);
    (session.spawn(), handle)
}
