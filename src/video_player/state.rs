// SPDX-License-Identifier: MPL-2.0
//! Playback state machine.
//!
//! Every input (position reports, readiness changes, idle ticks, user
//! gestures) arrives as a [`Message`]. [`PlaybackState::handle`] applies it
//! and returns the [`Effect`]s the driver must carry out: transport commands
//! for the media player, idle timer arming, subtitle store writes, and
//! follow-up messages. The transition itself never performs I/O, so every
//! rule below is testable without a live player.
//!
//! Rules worth knowing:
//! - Position reports are ignored while the user scrubs (`can_accept_progress`
//!   is false); otherwise they update progress and the active subtitle.
//! - Play/pause gestures are only honored while the controls are visible.
//! - A scrub session pauses on entry and, on exit, seeks to the scrubbed
//!   position before resuming.
//! - Starting a label pauses playback regardless of controls visibility.

use super::adapter::{MediaSource, ProgressUpdate};
use super::authoring::{AuthoringState, AuthoringStep};
use super::idle_timer::TimerId;
use super::time_units::normalize;
use crate::domain::subtitle::Subtitle;
use crate::domain::video::{ControlsState, HideDelay, Progress};
use crate::error::PlayerError;
use crate::subtitle_store::SubtitleStore;
use log::{debug, info, trace, warn};
use std::collections::VecDeque;

/// Inputs to the playback state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Configure the player for the session's source.
    Prepare,
    /// Periodic position report from the player.
    PositionTick(ProgressUpdate),
    /// Slider drag. Visual only: no lookup, no seek.
    UserScrub(Progress),
    /// The asset became playable or stopped being playable.
    ReadinessChanged(bool),
    /// Show or hide the control overlay.
    ToggleControls,
    /// One second of inactivity elapsed on the given timer arm.
    IdleTick(TimerId),
    /// Play/pause gesture.
    TogglePlay,
    /// Begin or end a scrub session.
    ToggleEditing,
    /// Begin authoring a new label.
    StartAuthoring,
    /// Mark the label start at the given player time.
    MarkStart { at: Option<f64> },
    /// Mark the label end at the given player time.
    MarkEnd { at: Option<f64> },
    /// Caption text for the label being authored.
    ProvideText(String),
    /// Store the completed label.
    Commit,
    /// Abandon the label being authored.
    CancelAuthoring,
    /// The player reported a failure.
    PlayerFailed(PlayerError),
}

/// Work requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Load the source and start forwarding its streams.
    Configure(MediaSource),
    Play,
    Pause,
    Seek(Progress),
    /// Start the idle timer with a fresh identity.
    ArmIdleTimer(TimerId),
    CancelIdleTimer,
    /// Append to the session's subtitle store.
    AppendSubtitle(Subtitle),
    /// Process this message before any other input.
    Dispatch(Message),
}

/// Complete playback and UI state of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    source: MediaSource,
    prepared: bool,
    is_playing: bool,
    is_ready_to_play: bool,
    progress: Progress,
    /// False while the user drags the slider.
    can_accept_progress: bool,
    controls: ControlsState,
    hide_delay: HideDelay,
    idle_ticks: u32,
    /// Identity of the idle timer arm whose ticks are accepted.
    idle_timer: Option<TimerId>,
    next_timer: TimerId,
    active_subtitle: Option<Subtitle>,
    authoring: Option<AuthoringState>,
    text_prompt_visible: bool,
    last_error: Option<PlayerError>,
}

impl PlaybackState {
    /// Initial state: not ready, paused at the start, controls hidden.
    pub fn new(source: MediaSource, hide_delay: HideDelay) -> Self {
        Self {
            source,
            prepared: false,
            is_playing: false,
            is_ready_to_play: false,
            progress: Progress::START,
            can_accept_progress: true,
            controls: ControlsState::Hidden,
            hide_delay,
            idle_ticks: 0,
            idle_timer: None,
            next_timer: TimerId::default(),
            active_subtitle: None,
            authoring: None,
            text_prompt_visible: false,
            last_error: None,
        }
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// True once `Prepare` has been processed.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_ready_to_play(&self) -> bool {
        self.is_ready_to_play
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn can_accept_progress(&self) -> bool {
        self.can_accept_progress
    }

    /// True during a scrub session.
    pub fn is_editing(&self) -> bool {
        !self.can_accept_progress
    }

    pub fn controls(&self) -> ControlsState {
        self.controls
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    pub fn idle_timer(&self) -> Option<TimerId> {
        self.idle_timer
    }

    pub fn active_subtitle(&self) -> Option<&Subtitle> {
        self.active_subtitle.as_ref()
    }

    pub fn authoring(&self) -> Option<&AuthoringState> {
        self.authoring.as_ref()
    }

    /// Current authoring step, `None` when no label is being authored.
    pub fn authoring_step(&self) -> Option<AuthoringStep> {
        self.authoring.as_ref().map(AuthoringState::step)
    }

    pub fn is_text_prompt_visible(&self) -> bool {
        self.text_prompt_visible
    }

    pub fn last_error(&self) -> Option<&PlayerError> {
        self.last_error.as_ref()
    }

    /// Applies one message and returns the effects it requires.
    ///
    /// `store` is read for subtitle lookup only; writes come back as
    /// [`Effect::AppendSubtitle`].
    pub fn handle(&mut self, store: &SubtitleStore, msg: Message) -> Vec<Effect> {
        match msg {
            Message::Prepare => {
                self.prepared = true;
                debug!("Preparing {}", self.source);
                vec![Effect::Configure(self.source.clone())]
            }
            Message::PositionTick(update) => self.apply_position(store, update),
            Message::UserScrub(progress) => {
                self.progress = progress;
                Vec::new()
            }
            Message::ReadinessChanged(ready) => {
                self.is_ready_to_play = ready;
                if ready {
                    self.last_error = None;
                }
                debug!("Ready to play: {}", ready);
                Vec::new()
            }
            Message::ToggleControls => self.toggle_controls(),
            Message::IdleTick(id) => self.idle_tick(id),
            Message::TogglePlay => self.toggle_play(),
            Message::ToggleEditing => self.toggle_editing(),
            Message::StartAuthoring => self.start_authoring(),
            Message::MarkStart { at } => {
                if self.authoring.as_mut().is_some_and(|flow| flow.mark_start(at)) {
                    debug!("Label start marked at {}s", normalize(at));
                } else {
                    trace!("Ignoring start mark outside AwaitingStart");
                }
                Vec::new()
            }
            Message::MarkEnd { at } => {
                if self.authoring.as_mut().is_some_and(|flow| flow.mark_end(at)) {
                    debug!("Label end marked at {}s", normalize(at));
                    self.text_prompt_visible = true;
                } else {
                    trace!("Ignoring end mark outside AwaitingEnd");
                }
                Vec::new()
            }
            Message::ProvideText(text) => {
                if self.authoring.as_mut().is_some_and(|flow| flow.provide_text(text)) {
                    vec![Effect::Dispatch(Message::Commit)]
                } else {
                    trace!("Ignoring label text outside AwaitingText");
                    Vec::new()
                }
            }
            Message::Commit => self.commit(),
            Message::CancelAuthoring => {
                if self.authoring.take().is_some() {
                    self.text_prompt_visible = false;
                    debug!("Label authoring cancelled");
                }
                Vec::new()
            }
            Message::PlayerFailed(error) => {
                warn!("Player failure for {}: {}", self.source, error);
                self.is_ready_to_play = false;
                self.is_playing = false;
                self.active_subtitle = None;
                self.last_error = Some(error);
                Vec::new()
            }
        }
    }

    fn apply_position(&mut self, store: &SubtitleStore, update: ProgressUpdate) -> Vec<Effect> {
        if !self.can_accept_progress {
            trace!("Ignoring position report while scrubbing");
            return Vec::new();
        }
        self.progress = update.fraction;

        let second = normalize(update.time_secs);
        let subtitle = store.lookup(second).cloned();
        if subtitle != self.active_subtitle {
            debug!(
                "Active subtitle at {}s: {:?}",
                second,
                subtitle.as_ref().map(Subtitle::text)
            );
            self.active_subtitle = subtitle;
        }
        Vec::new()
    }

    fn toggle_controls(&mut self) -> Vec<Effect> {
        self.controls = self.controls.toggled();
        self.idle_ticks = 0;

        if self.controls.is_visible() {
            let id = self.next_timer;
            self.next_timer = id.next();
            self.idle_timer = Some(id);
            vec![Effect::ArmIdleTimer(id)]
        } else {
            self.idle_timer = None;
            vec![Effect::CancelIdleTimer]
        }
    }

    fn idle_tick(&mut self, id: TimerId) -> Vec<Effect> {
        if self.idle_timer != Some(id) {
            trace!("Dropping stale idle tick from {:?}", id);
            return Vec::new();
        }
        self.idle_ticks = self.idle_ticks.saturating_add(1);
        if self.hide_delay.is_reached(self.idle_ticks) {
            vec![Effect::Dispatch(Message::ToggleControls)]
        } else {
            Vec::new()
        }
    }

    fn toggle_play(&mut self) -> Vec<Effect> {
        // Play/pause is surfaced through the overlay
        if !self.controls.is_visible() {
            trace!("Ignoring play toggle while controls are hidden");
            return Vec::new();
        }
        self.is_playing = !self.is_playing;
        if self.is_playing {
            vec![Effect::Play]
        } else {
            vec![Effect::Pause]
        }
    }

    fn toggle_editing(&mut self) -> Vec<Effect> {
        self.can_accept_progress = !self.can_accept_progress;
        if self.can_accept_progress {
            self.is_playing = true;
            vec![Effect::Seek(self.progress), Effect::Play]
        } else {
            self.is_playing = false;
            vec![Effect::Pause]
        }
    }

    fn start_authoring(&mut self) -> Vec<Effect> {
        if self.authoring.is_some() {
            debug!("Label authoring already in progress");
            return Vec::new();
        }
        self.authoring = Some(AuthoringState::new());
        self.is_playing = false;
        vec![Effect::Pause]
    }

    fn commit(&mut self) -> Vec<Effect> {
        let Some(flow) = self.authoring.take() else {
            trace!("Ignoring commit without a label in progress");
            return Vec::new();
        };
        if flow.is_reversed() {
            warn!("Label end precedes its start, swapping range endpoints");
        }
        match flow.into_subtitle() {
            Ok(subtitle) => {
                info!(
                    "Label committed: {:?} [{}s, {}s)",
                    subtitle.text(),
                    subtitle.range().start_second(),
                    subtitle.range().end_second()
                );
                self.text_prompt_visible = false;
                vec![Effect::AppendSubtitle(subtitle)]
            }
            Err(flow) => {
                trace!("Ignoring commit of incomplete label");
                self.authoring = Some(flow);
                Vec::new()
            }
        }
    }
}

/// Playback state together with the subtitle store it reads and writes.
///
/// [`apply`](Self::apply) runs a message and every follow-up it dispatches
/// to completion, writes committed subtitles to the store, and returns the
/// effects that need the outside world.
#[derive(Debug, Clone)]
pub struct PlaybackMachine {
    state: PlaybackState,
    store: SubtitleStore,
}

impl PlaybackMachine {
    pub fn new(state: PlaybackState, store: SubtitleStore) -> Self {
        Self { state, store }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn store(&self) -> &SubtitleStore {
        &self.store
    }

    pub fn into_store(self) -> SubtitleStore {
        self.store
    }

    pub fn apply(&mut self, message: Message) -> Vec<Effect> {
        self.apply_with(message, |_| {})
    }

    /// Like [`apply`](Self::apply), calling `observe` after each transition.
    pub fn apply_with(
        &mut self,
        message: Message,
        mut observe: impl FnMut(&PlaybackState),
    ) -> Vec<Effect> {
        let mut external = Vec::new();
        let mut pending = VecDeque::from([message]);

        while let Some(message) = pending.pop_front() {
            let effects = self.state.handle(&self.store, message);
            observe(&self.state);

            // Follow-ups go ahead of anything queued after them
            let mut follow_ups = Vec::new();
            for effect in effects {
                match effect {
                    Effect::Dispatch(next) => follow_ups.push(next),
                    Effect::AppendSubtitle(subtitle) => self.store.append(subtitle),
                    other => external.push(other),
                }
            }
            for next in follow_ups.into_iter().rev() {
                pending.push_front(next);
            }
        }
        external
    }
}
