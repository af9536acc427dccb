// SPDX-License-Identifier: MPL-2.0
use playmark::config::{self, Config};
use playmark::subtitle_store::SubtitleStore;
use playmark::video_player::{self, Gesture, MediaSource, PlaybackState};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "\
Usage: playmark [--config PATH] [--duration SECS] [--log-level LEVEL] <media>

Gestures (one per line on stdin):
  play | controls | edit | scrub <fraction> | label | start | end
  text <caption> | cancel | quit";

/// Length reported by the simulated player when `--duration` is absent.
const DEFAULT_DURATION_SECS: f64 = 60.0;

struct Flags {
    config_path: Option<PathBuf>,
    duration_secs: f64,
    log_level: Option<String>,
    media: PathBuf,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        config_path: args.opt_value_from_str("--config")?,
        duration_secs: args
            .opt_value_from_str("--duration")?
            .unwrap_or(DEFAULT_DURATION_SECS),
        log_level: args.opt_value_from_str("--log-level")?,
        media: args.free_from_str()?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        eprintln!("Ignoring extra arguments: {:?}", rest);
    }
    Ok(flags)
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|err| {
        eprintln!("Failed to load settings, using defaults: {}", err);
        Config::default()
    })
}

fn describe(state: &PlaybackState) -> String {
    let mut line = format!(
        "[{}] {:>5.1}%",
        if state.is_playing() { "playing" } else { "paused" },
        state.progress().value() * 100.0
    );
    if !state.is_ready_to_play() {
        line.push_str(" not-ready");
    }
    if state.controls().is_visible() {
        line.push_str(" controls");
    }
    if state.is_editing() {
        line.push_str(" scrubbing");
    }
    if let Some(subtitle) = state.active_subtitle() {
        line.push_str(&format!(" \"{}\"", subtitle.text()));
    }
    if let Some(step) = state.authoring_step() {
        line.push_str(&format!(" authoring:{:?}", step));
    }
    if state.is_text_prompt_visible() {
        line.push_str(" (enter: text <caption>)");
    }
    if let Some(err) = state.last_error() {
        line.push_str(&format!(" error:{}", err.key()));
    }
    line
}

fn print_labels(store: &SubtitleStore) {
    if store.is_empty() {
        println!("No labels authored.");
        return;
    }
    println!("Authored labels:");
    for (index, subtitle) in store.iter().enumerate() {
        println!(
            "{:>3}. [{}s, {}s) {}",
            index + 1,
            subtitle.range().start_second(),
            subtitle.range().end_second(),
            subtitle.text()
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("Error: {}\n\n{}", err, USAGE);
            return ExitCode::from(2);
        }
    };

    let config = load_config(flags.config_path.as_ref());
    let level = flags
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level().to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (task, handle) = video_player::spawn_simulated(
        MediaSource::new(flags.media),
        flags.duration_secs,
        &config,
    );
    if let Err(err) = handle.prepare() {
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }

    let mut snapshots = handle.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if line.eq_ignore_ascii_case("quit") {
                        break;
                    }
                    match line.parse::<Gesture>() {
                        Ok(gesture) => {
                            if handle.send(gesture).is_err() {
                                break;
                            }
                        }
                        Err(err) => eprintln!("{}", err),
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    log::warn!("Failed to read stdin: {}", err);
                    break;
                }
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = snapshots.borrow_and_update().clone();
                println!("{}", describe(&state));
            }
        }
    }

    if let Err(err) = handle.shutdown() {
        log::debug!("Session already closed: {}", err);
    }
    match task.await {
        Ok(store) => {
            print_labels(&store);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Session task failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
