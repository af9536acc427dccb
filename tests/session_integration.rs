// SPDX-License-Identifier: MPL-2.0
//! End-to-end session tests against the simulated player.
//!
//! Every test runs on a paused Tokio clock, so timer-driven behavior
//! (progress reports, idle ticks) is deterministic.

use approx::assert_abs_diff_eq;
use playmark::config::Config;
use playmark::domain::subtitle::{Subtitle, TimeRange};
use playmark::domain::video::{ControlsState, Progress};
use playmark::error::PlayerError;
use playmark::subtitle_store::SubtitleStore;
use playmark::video_player::{
    AuthoringStep, Gesture, MediaSource, PlaybackState, Session, SessionHandle, SimulatedPlayer,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

const MEDIA_SECS: f64 = 60.0;

fn start_with(store: SubtitleStore, config: &Config) -> (JoinHandle<SubtitleStore>, SessionHandle) {
    let player = SimulatedPlayer::new(MEDIA_SECS).with_progress_interval(config.progress_interval());
    let (session, handle) = Session::new(player, MediaSource::new("clip.mp4"), store, config);
    (session.spawn(), handle)
}

fn start() -> (JoinHandle<SubtitleStore>, SessionHandle) {
    start_with(SubtitleStore::new(), &Config::default())
}

async fn wait_until(handle: &SessionHandle, predicate: impl FnMut(&PlaybackState) -> bool) {
    handle
        .subscribe()
        .wait_for(predicate)
        .await
        .expect("session should be running");
}

async fn prepared() -> (JoinHandle<SubtitleStore>, SessionHandle) {
    let (task, handle) = start();
    handle.prepare().expect("prepare");
    wait_until(&handle, PlaybackState::is_ready_to_play).await;
    (task, handle)
}

/// Shows the controls and starts playback.
fn play(handle: &SessionHandle) {
    handle.send(Gesture::ToggleControls).expect("controls");
    handle.send(Gesture::TogglePlay).expect("play");
}

async fn finish(task: JoinHandle<SubtitleStore>, handle: SessionHandle) -> SubtitleStore {
    handle.shutdown().expect("shutdown");
    task.await.expect("session task")
}

#[tokio::test(start_paused = true)]
async fn authored_label_is_committed_to_store() {
    let (task, handle) = prepared().await;

    play(&handle);
    sleep(Duration::from_secs(10)).await;

    handle.send(Gesture::StartAuthoring).expect("label");
    handle.send(Gesture::MarkStart).expect("start");
    wait_until(&handle, |state| {
        state.authoring_step() == Some(AuthoringStep::AwaitingEnd)
    })
    .await;
    assert!(!handle.snapshot().is_playing());

    // Controls hid while playing; show them again to resume
    play(&handle);
    sleep(Duration::from_secs(5)).await;

    handle.send(Gesture::MarkEnd).expect("end");
    wait_until(&handle, PlaybackState::is_text_prompt_visible).await;

    handle
        .send(Gesture::ProvideText("caption".into()))
        .expect("text");
    wait_until(&handle, |state| state.authoring().is_none()).await;
    assert!(!handle.snapshot().is_text_prompt_visible());

    let store = finish(task, handle).await;
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.first(),
        Some(&Subtitle::new("caption", TimeRange::new(10, 15)))
    );
}

#[tokio::test(start_paused = true)]
async fn controls_hide_after_three_idle_seconds() {
    let (task, handle) = prepared().await;

    handle.send(Gesture::ToggleControls).expect("controls");
    wait_until(&handle, |state| state.controls().is_visible()).await;
    let shown_at = Instant::now();

    wait_until(&handle, |state| state.controls() == ControlsState::Hidden).await;
    assert_eq!(shown_at.elapsed(), Duration::from_secs(3));

    let state = handle.snapshot();
    assert_eq!(state.idle_ticks(), 0);
    assert_eq!(state.idle_timer(), None);

    // No further toggles once hidden
    sleep(Duration::from_secs(10)).await;
    assert_eq!(handle.snapshot().controls(), ControlsState::Hidden);

    finish(task, handle).await;
}

#[tokio::test(start_paused = true)]
async fn reshowing_controls_restarts_idle_count() {
    let (task, handle) = prepared().await;

    handle.send(Gesture::ToggleControls).expect("show");
    wait_until(&handle, |state| state.controls().is_visible()).await;
    sleep(Duration::from_millis(2_500)).await;
    let first_arm = handle.snapshot().idle_timer();
    assert_eq!(handle.snapshot().idle_ticks(), 2);

    handle.send(Gesture::ToggleControls).expect("hide");
    handle.send(Gesture::ToggleControls).expect("show again");
    wait_until(&handle, |state| {
        state.controls().is_visible() && state.idle_timer() != first_arm
    })
    .await;
    assert_eq!(handle.snapshot().idle_ticks(), 0);
    let shown_at = Instant::now();

    wait_until(&handle, |state| !state.controls().is_visible()).await;
    assert_eq!(shown_at.elapsed(), Duration::from_secs(3));

    finish(task, handle).await;
}

#[tokio::test(start_paused = true)]
async fn hide_delay_follows_config() {
    let config = Config {
        hide_delay_ticks: Some(5),
        ..Config::default()
    };
    let (task, handle) = start_with(SubtitleStore::new(), &config);

    handle.send(Gesture::ToggleControls).expect("controls");
    wait_until(&handle, |state| state.controls().is_visible()).await;
    let shown_at = Instant::now();

    wait_until(&handle, |state| !state.controls().is_visible()).await;
    assert_eq!(shown_at.elapsed(), Duration::from_secs(5));

    finish(task, handle).await;
}

#[tokio::test(start_paused = true)]
async fn scrub_session_freezes_then_seeks() {
    let (task, handle) = prepared().await;

    play(&handle);
    sleep(Duration::from_secs(4)).await;

    handle.send(Gesture::ToggleEditing).expect("edit");
    handle
        .send(Gesture::Scrub(Progress::new(0.5)))
        .expect("scrub");
    wait_until(&handle, |state| state.is_editing()).await;

    // Progress reports keep arriving but must not move the slider
    sleep(Duration::from_secs(3)).await;
    let frozen = handle.snapshot();
    assert!(!frozen.is_playing());
    assert_abs_diff_eq!(frozen.progress().value(), 0.5, epsilon = 1e-9);

    handle.send(Gesture::ToggleEditing).expect("edit done");
    wait_until(&handle, |state| !state.is_editing()).await;
    assert!(handle.snapshot().is_playing());

    // Playback resumed from the scrubbed position (30s of 60s)
    sleep(Duration::from_secs(2)).await;
    let resumed = handle.snapshot().progress().value();
    assert!(resumed > 0.5 && resumed < 0.56, "progress was {resumed}");

    finish(task, handle).await;
}

#[tokio::test(start_paused = true)]
async fn subtitle_follows_playhead() {
    let store: SubtitleStore = [Subtitle::new("hi", TimeRange::new(2, 4))]
        .into_iter()
        .collect();
    let (task, handle) = start_with(store, &Config::default());
    handle.prepare().expect("prepare");
    wait_until(&handle, PlaybackState::is_ready_to_play).await;

    play(&handle);
    wait_until(&handle, |state| {
        state.active_subtitle().map(Subtitle::text) == Some("hi")
    })
    .await;
    wait_until(&handle, |state| state.active_subtitle().is_none()).await;

    let position = handle.snapshot().progress().seconds_at(MEDIA_SECS);
    assert!(position >= 3.5, "overlay cleared at {position}s");

    let store = finish(task, handle).await;
    assert_eq!(store.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn transport_before_prepare_is_reported() {
    let (task, handle) = start();

    play(&handle);
    wait_until(&handle, |state| state.last_error().is_some()).await;

    let state = handle.snapshot();
    assert_eq!(state.last_error(), Some(&PlayerError::NotConfigured));
    assert!(!state.is_playing());
    assert!(!state.is_ready_to_play());

    // A later prepare recovers
    handle.prepare().expect("prepare");
    wait_until(&handle, PlaybackState::is_ready_to_play).await;
    assert!(handle.snapshot().last_error().is_none());

    finish(task, handle).await;
}

#[tokio::test(start_paused = true)]
async fn cancelled_label_leaves_store_untouched() {
    let (task, handle) = prepared().await;

    handle.send(Gesture::StartAuthoring).expect("label");
    handle.send(Gesture::MarkStart).expect("start");
    handle.send(Gesture::MarkEnd).expect("end");
    wait_until(&handle, PlaybackState::is_text_prompt_visible).await;

    handle.send(Gesture::CancelAuthoring).expect("cancel");
    wait_until(&handle, |state| state.authoring().is_none()).await;
    assert!(!handle.snapshot().is_text_prompt_visible());

    let store = finish(task, handle).await;
    assert!(store.is_empty());
}
