// SPDX-License-Identifier: MPL-2.0
use playmark::config::{self, Config, DEFAULT_IDLE_TICK_INTERVAL_MS};
use playmark::video_player::{self, Gesture, MediaSource, PlaybackState};
use std::time::Duration;
use tempfile::tempdir;
use tokio::time::Instant;

/// Measures how long the controls stay visible under `config`.
async fn visible_duration(config: &Config) -> Duration {
    let (task, handle) = video_player::spawn_simulated(MediaSource::new("clip.mkv"), 30.0, config);
    let mut snapshots = handle.subscribe();

    handle.prepare().expect("prepare");
    snapshots
        .wait_for(PlaybackState::is_ready_to_play)
        .await
        .expect("session running");

    handle.send(Gesture::ToggleControls).expect("controls");
    snapshots
        .wait_for(|state| state.controls().is_visible())
        .await
        .expect("session running");
    let shown_at = Instant::now();
    snapshots
        .wait_for(|state| !state.controls().is_visible())
        .await
        .expect("session running");
    let elapsed = shown_at.elapsed();

    handle.shutdown().expect("shutdown");
    task.await.expect("session task");
    elapsed
}

#[tokio::test(start_paused = true)]
async fn test_hide_delay_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: default delay
    let initial_config = Config::default();
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");
    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    assert_eq!(
        visible_duration(&loaded_initial_config).await,
        Duration::from_secs(3)
    );

    // 2. Slower clock and a longer delay
    let slow_config = Config {
        hide_delay_ticks: Some(4),
        idle_tick_interval_ms: Some(DEFAULT_IDLE_TICK_INTERVAL_MS / 2),
        ..Config::default()
    };
    config::save_to_path(&slow_config, &temp_config_file_path)
        .expect("Failed to write updated config file");
    let loaded_slow_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load updated config from path");
    assert_eq!(
        visible_duration(&loaded_slow_config).await,
        Duration::from_secs(2)
    );

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_partial_config_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "log_level = \"debug\"\n").expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    assert_eq!(loaded.log_level(), "debug");
    assert_eq!(loaded.hide_delay().value(), config::DEFAULT_HIDE_DELAY_TICKS);
    assert_eq!(
        loaded.progress_interval(),
        Duration::from_millis(config::DEFAULT_PROGRESS_INTERVAL_MS)
    );
}
