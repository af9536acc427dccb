// SPDX-License-Identifier: MPL-2.0
//! Clock-driven stand-in for a real media engine.
//!
//! `SimulatedPlayer` does not open the media file. It advances a playhead
//! against the Tokio clock for a fixed duration, which is enough to drive
//! the playback core end to end from the terminal binary and from tests
//! running on a paused runtime.

use super::adapter::{MediaPlayer, MediaSource, PlayerStreams, ProgressUpdate};
use crate::config::DEFAULT_PROGRESS_INTERVAL_MS;
use crate::domain::video::Progress;
use crate::error::PlayerError;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Delay between `configure` and the first readiness report.
pub const DEFAULT_READY_DELAY: Duration = Duration::from_millis(100);

/// Playhead that advances with wall-clock time while playing.
#[derive(Debug, Default)]
struct Playhead {
    /// Position at the last transport change.
    anchor_secs: f64,
    /// When playback (re)started; `None` while paused.
    playing_since: Option<Instant>,
}

impl Playhead {
    fn position_secs(&self, duration_secs: f64) -> f64 {
        let elapsed = self
            .playing_since
            .map_or(0.0, |since| since.elapsed().as_secs_f64());
        (self.anchor_secs + elapsed).min(duration_secs)
    }

    fn play(&mut self, duration_secs: f64) {
        if self.playing_since.is_none() {
            // Restart from the top once the end has been reached
            if self.anchor_secs >= duration_secs {
                self.anchor_secs = 0.0;
            }
            self.playing_since = Some(Instant::now());
        }
    }

    fn pause(&mut self, duration_secs: f64) {
        self.anchor_secs = self.position_secs(duration_secs);
        self.playing_since = None;
    }

    fn seek(&mut self, target_secs: f64) {
        self.anchor_secs = target_secs;
        if self.playing_since.is_some() {
            self.playing_since = Some(Instant::now());
        }
    }
}

type SharedPlayhead = Arc<Mutex<Playhead>>;

fn with_playhead<R>(playhead: &SharedPlayhead, f: impl FnOnce(&mut Playhead) -> R) -> R {
    let mut guard = playhead.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// In-process [`MediaPlayer`] with a fixed media duration.
#[derive(Debug)]
pub struct SimulatedPlayer {
    duration_secs: f64,
    progress_interval: Duration,
    ready_delay: Duration,
    playhead: SharedPlayhead,
    /// Reporter task of the configured asset.
    reporter: Option<JoinHandle<()>>,
}

impl SimulatedPlayer {
    /// Creates a player for media lasting `duration_secs`.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            progress_interval: Duration::from_millis(DEFAULT_PROGRESS_INTERVAL_MS),
            ready_delay: DEFAULT_READY_DELAY,
            playhead: SharedPlayhead::default(),
            reporter: None,
        }
    }

    /// Sets the cadence of progress reports.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Sets how long the asset takes to report ready after `configure`.
    #[must_use]
    pub fn with_ready_delay(mut self, delay: Duration) -> Self {
        self.ready_delay = delay;
        self
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn is_configured(&self) -> bool {
        self.reporter.is_some()
    }

    fn ensure_configured(&self) -> Result<(), PlayerError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(PlayerError::NotConfigured)
        }
    }

    fn stop_reporter(&mut self) {
        if let Some(task) = self.reporter.take() {
            task.abort();
        }
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn configure(&mut self, source: &MediaSource) -> Result<PlayerStreams, PlayerError> {
        if !source.has_supported_extension() {
            return Err(PlayerError::UnsupportedSource(source.to_string()));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(PlayerError::ConfigureFailed(format!(
                "{} has no playable duration",
                source
            )));
        }

        self.stop_reporter();
        with_playhead(&self.playhead, |playhead| *playhead = Playhead::default());

        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (readiness_tx, readiness_rx) = mpsc::unbounded_channel();
        let playhead = Arc::clone(&self.playhead);
        let duration_secs = self.duration_secs;
        let progress_interval = self.progress_interval;
        let ready_delay = self.ready_delay;

        self.reporter = Some(tokio::spawn(async move {
            let ready = tokio::time::sleep(ready_delay);
            tokio::pin!(ready);
            let mut announced = false;

            let mut ticker = tokio::time::interval(progress_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    () = &mut ready, if !announced => {
                        announced = true;
                        if readiness_tx.send(true).is_err() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let position = with_playhead(&playhead, |p| p.position_secs(duration_secs));
                        let update = ProgressUpdate {
                            fraction: Progress::from_position(position, duration_secs),
                            time_secs: Some(position),
                        };
                        if progress_tx.send(update).is_err() {
                            break;
                        }
                    }
                }
            }
        }));

        log::debug!("Simulated player configured for {} ({:.1}s)", source, duration_secs);

        Ok(PlayerStreams {
            progress: progress_rx,
            readiness: readiness_rx,
        })
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.ensure_configured()?;
        let duration_secs = self.duration_secs;
        with_playhead(&self.playhead, |playhead| playhead.play(duration_secs));
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.ensure_configured()?;
        let duration_secs = self.duration_secs;
        with_playhead(&self.playhead, |playhead| playhead.pause(duration_secs));
        Ok(())
    }

    fn seek(&mut self, to: Progress) -> Result<(), PlayerError> {
        self.ensure_configured()?;
        let target = to.seconds_at(self.duration_secs);
        with_playhead(&self.playhead, |playhead| playhead.seek(target));
        Ok(())
    }

    fn current_time(&self) -> Option<f64> {
        if !self.is_configured() {
            return None;
        }
        let duration_secs = self.duration_secs;
        Some(with_playhead(&self.playhead, |playhead| {
            playhead.position_secs(duration_secs)
        }))
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        self.stop_reporter();
    }
}
