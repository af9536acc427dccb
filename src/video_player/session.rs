// SPDX-License-Identifier: MPL-2.0
//! Serial driver for one playback session.
//!
//! A [`Session`] owns the media player, the [`PlaybackMachine`] and the idle
//! timer. Every producer (user gestures through [`SessionHandle`], the
//! player's progress and readiness streams, the idle timer) feeds one
//! unbounded event channel; the session task drains it in arrival order and
//! is the only code that mutates state or talks to the player.
//!
//! Producers other than the handle hold weak senders, so the session ends
//! once every handle is dropped or [`SessionHandle::shutdown`] is called.
//! The final subtitle store is handed back to the caller.

use super::adapter::{MediaPlayer, MediaSource, PlayerStreams, ProgressUpdate};
use super::idle_timer::{IdleTimer, TimerId};
use super::state::{Effect, Message, PlaybackMachine, PlaybackState};
use crate::config::Config;
use crate::domain::video::Progress;
use crate::error::{Error, PlayerError, Result};
use crate::subtitle_store::SubtitleStore;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender, WeakUnboundedSender};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// User intents accepted by a session.
///
/// Marks carry no timestamp: the session reads the player's current time
/// when it processes them.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    TogglePlay,
    ToggleControls,
    Scrub(Progress),
    ToggleEditing,
    StartAuthoring,
    MarkStart,
    MarkEnd,
    ProvideText(String),
    CancelAuthoring,
}

/// Error returned when a gesture command cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGestureError(String);

impl fmt::Display for ParseGestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unrecognized gesture: {}", self.0)
    }
}

impl std::error::Error for ParseGestureError {}

impl FromStr for Gesture {
    type Err = ParseGestureError;

    /// Parses the terminal command syntax, e.g. `scrub 0.4` or `text Hello`.
    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let input = input.trim();
        let (command, argument) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match (command.to_ascii_lowercase().as_str(), argument) {
            ("play", "") => Ok(Self::TogglePlay),
            ("controls", "") => Ok(Self::ToggleControls),
            ("edit", "") => Ok(Self::ToggleEditing),
            ("label", "") => Ok(Self::StartAuthoring),
            ("start", "") => Ok(Self::MarkStart),
            ("end", "") => Ok(Self::MarkEnd),
            ("cancel", "") => Ok(Self::CancelAuthoring),
            ("scrub", fraction) => fraction
                .parse::<f64>()
                .map(|value| Self::Scrub(Progress::new(value)))
                .map_err(|_| ParseGestureError(input.to_string())),
            ("text", caption) if !caption.is_empty() => Ok(Self::ProvideText(caption.to_string())),
            _ => Err(ParseGestureError(input.to_string())),
        }
    }
}

/// Everything that can wake the session task.
#[derive(Debug)]
enum Event {
    Prepare,
    Gesture(Gesture),
    Progress(ProgressUpdate),
    Readiness(bool),
    IdleTick(TimerId),
    Shutdown,
}

/// Cloneable handle for feeding a running session and observing its state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: UnboundedSender<Event>,
    snapshots: watch::Receiver<PlaybackState>,
}

impl SessionHandle {
    /// Asks the session to configure its player.
    pub fn prepare(&self) -> Result<()> {
        self.dispatch(Event::Prepare)
    }

    pub fn send(&self, gesture: Gesture) -> Result<()> {
        self.dispatch(Event::Gesture(gesture))
    }

    /// Stops the session after the events already queued.
    pub fn shutdown(&self) -> Result<()> {
        self.dispatch(Event::Shutdown)
    }

    /// Latest published state.
    pub fn snapshot(&self) -> PlaybackState {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every transition that changed the state.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.snapshots.clone()
    }

    fn dispatch(&self, event: Event) -> Result<()> {
        self.events.send(event).map_err(|_| Error::SessionClosed)
    }
}

/// Serial action processor driving a [`MediaPlayer`].
pub struct Session<P> {
    player: P,
    machine: PlaybackMachine,
    events: UnboundedReceiver<Event>,
    sender: WeakUnboundedSender<Event>,
    idle_timer: IdleTimer,
    /// Tasks forwarding the configured player's streams.
    forwarders: Vec<JoinHandle<()>>,
    snapshots: watch::Sender<PlaybackState>,
}

impl<P: MediaPlayer + 'static> Session<P> {
    /// Creates a session for `source`, reading lookups from and committing
    /// labels to `store`.
    pub fn new(
        player: P,
        source: MediaSource,
        store: SubtitleStore,
        config: &Config,
    ) -> (Self, SessionHandle) {
        let state = PlaybackState::new(source, config.hide_delay());
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshots_tx, snapshots_rx) = watch::channel(state.clone());

        let session = Self {
            player,
            machine: PlaybackMachine::new(state, store),
            events: events_rx,
            sender: events_tx.downgrade(),
            idle_timer: IdleTimer::new(config.idle_tick_interval()),
            forwarders: Vec::new(),
            snapshots: snapshots_tx,
        };
        let handle = SessionHandle {
            events: events_tx,
            snapshots: snapshots_rx,
        };
        (session, handle)
    }

    /// Runs the session on the Tokio runtime.
    pub fn spawn(self) -> JoinHandle<SubtitleStore> {
        tokio::spawn(self.run())
    }

    /// Processes events until shutdown and returns the subtitle store.
    pub async fn run(mut self) -> SubtitleStore {
        log::debug!("Session started for {}", self.machine.state().source());

        while let Some(event) = self.events.recv().await {
            let Some(message) = self.translate(event) else {
                break;
            };
            self.process(message);
        }

        self.idle_timer.cancel();
        self.stop_forwarders();
        log::debug!(
            "Session ended with {} label(s)",
            self.machine.store().len()
        );
        self.machine.into_store()
    }

    /// Maps an event to its machine message, `None` for shutdown.
    fn translate(&self, event: Event) -> Option<Message> {
        let message = match event {
            Event::Prepare => Message::Prepare,
            Event::Progress(update) => Message::PositionTick(update),
            Event::Readiness(ready) => Message::ReadinessChanged(ready),
            Event::IdleTick(id) => Message::IdleTick(id),
            Event::Gesture(gesture) => match gesture {
                Gesture::TogglePlay => Message::TogglePlay,
                Gesture::ToggleControls => Message::ToggleControls,
                Gesture::Scrub(progress) => Message::UserScrub(progress),
                Gesture::ToggleEditing => Message::ToggleEditing,
                Gesture::StartAuthoring => Message::StartAuthoring,
                Gesture::MarkStart => Message::MarkStart {
                    at: self.player.current_time(),
                },
                Gesture::MarkEnd => Message::MarkEnd {
                    at: self.player.current_time(),
                },
                Gesture::ProvideText(text) => Message::ProvideText(text),
                Gesture::CancelAuthoring => Message::CancelAuthoring,
            },
            Event::Shutdown => return None,
        };
        Some(message)
    }

    /// Applies a message and carries out its effects. Player failures are
    /// fed back as `PlayerFailed` before the next event is taken.
    fn process(&mut self, message: Message) {
        let mut pending = VecDeque::from([message]);

        while let Some(message) = pending.pop_front() {
            let snapshots = &self.snapshots;
            let effects = self
                .machine
                .apply_with(message, |state| publish(snapshots, state));

            for effect in effects {
                if let Err(error) = self.execute(effect) {
                    pending.push_back(Message::PlayerFailed(error));
                }
            }
        }
    }

    fn execute(&mut self, effect: Effect) -> std::result::Result<(), PlayerError> {
        match effect {
            Effect::Configure(source) => {
                let streams = self.player.configure(&source)?;
                self.attach(streams);
            }
            Effect::Play => self.player.play()?,
            Effect::Pause => self.player.pause()?,
            Effect::Seek(progress) => self.player.seek(progress)?,
            Effect::ArmIdleTimer(id) => self.idle_timer.arm(id, self.sender.clone(), Event::IdleTick),
            Effect::CancelIdleTimer => self.idle_timer.cancel(),
            Effect::AppendSubtitle(_) | Effect::Dispatch(_) => {
                log::warn!("Unexpected internal effect reached the driver: {:?}", effect);
            }
        }
        Ok(())
    }

    /// Forwards the configured player's streams into the event channel,
    /// replacing the forwarders of a previous configuration.
    fn attach(&mut self, streams: PlayerStreams) {
        self.stop_forwarders();
        self.forwarders = vec![
            forward(streams.progress, self.sender.clone(), Event::Progress),
            forward(streams.readiness, self.sender.clone(), Event::Readiness),
        ];
    }

    fn stop_forwarders(&mut self) {
        for task in self.forwarders.drain(..) {
            task.abort();
        }
    }
}

impl<P> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", self.machine.state())
            .field("labels", &self.machine.store().len())
            .field("idle_timer", &self.idle_timer.armed())
            .finish_non_exhaustive()
    }
}

fn publish(snapshots: &watch::Sender<PlaybackState>, state: &PlaybackState) {
    snapshots.send_if_modified(|current| {
        if *current == *state {
            false
        } else {
            current.clone_from(state);
            true
        }
    });
}

fn forward<T: Send + 'static>(
    mut stream: UnboundedReceiver<T>,
    events: WeakUnboundedSender<Event>,
    wrap: fn(T) -> Event,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(item) = stream.recv().await {
            let Some(events) = events.upgrade() else {
                break;
            };
            if events.send(wrap(item)).is_err() {
                break;
            }
        }
    })
}
