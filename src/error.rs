// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Player(PlayerError),
    SessionClosed,
}

/// Failures reported by the media player adapter.
///
/// These never abort a session: the playback machine absorbs them as a
/// `PlayerFailed` message and stays in the "not ready" state until the
/// caller prepares the source again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    /// The source has no playable extension or an unknown container.
    UnsupportedSource(String),

    /// The source location does not exist.
    SourceNotFound(String),

    /// The engine rejected the configuration request.
    ConfigureFailed(String),

    /// A command was issued before `configure` succeeded.
    NotConfigured,

    /// Generic error with raw message
    Other(String),
}

impl PlayerError {
    /// Returns a stable key display layers can map to a message.
    pub fn key(&self) -> &'static str {
        match self {
            PlayerError::UnsupportedSource(_) => "error-player-unsupported-source",
            PlayerError::SourceNotFound(_) => "error-player-source-not-found",
            PlayerError::ConfigureFailed(_) => "error-player-configure-failed",
            PlayerError::NotConfigured => "error-player-not-configured",
            PlayerError::Other(_) => "error-player-general",
        }
    }

    /// Classifies a raw engine message into a specific variant.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("does not exist")
        {
            return PlayerError::SourceNotFound(msg.to_string());
        }

        if msg_lower.contains("unsupported")
            || msg_lower.contains("unknown format")
            || msg_lower.contains("codec")
        {
            return PlayerError::UnsupportedSource(msg.to_string());
        }

        if msg_lower.contains("not configured") {
            return PlayerError::NotConfigured;
        }

        if msg_lower.contains("configure") || msg_lower.contains("initialize") {
            return PlayerError::ConfigureFailed(msg.to_string());
        }

        PlayerError::Other(msg.to_string())
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::UnsupportedSource(src) => write!(f, "Unsupported media source: {}", src),
            PlayerError::SourceNotFound(src) => write!(f, "Media source not found: {}", src),
            PlayerError::ConfigureFailed(msg) => write!(f, "Player configuration failed: {}", msg),
            PlayerError::NotConfigured => write!(f, "Player is not configured"),
            PlayerError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Player(e) => write!(f, "Player Error: {}", e),
            Error::SessionClosed => write!(f, "Playback session is no longer running"),
        }
    }
}

impl std::error::Error for Error {}

impl From<PlayerError> for Error {
    fn from(err: PlayerError) -> Self {
        Error::Player(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn player_error_wraps_into_error() {
        let err: Error = PlayerError::NotConfigured.into();
        assert_eq!(format!("{}", err), "Player Error: Player is not configured");
    }

    #[test]
    fn player_error_from_message_not_found() {
        let err = PlayerError::from_message("No such file or directory");
        assert!(matches!(err, PlayerError::SourceNotFound(_)));
    }

    #[test]
    fn player_error_from_message_unsupported() {
        let err = PlayerError::from_message("Unsupported container 'xyz'");
        assert!(matches!(err, PlayerError::UnsupportedSource(_)));
    }

    #[test]
    fn player_error_from_message_configure() {
        let err = PlayerError::from_message("engine failed to initialize output");
        assert!(matches!(err, PlayerError::ConfigureFailed(_)));
    }

    #[test]
    fn player_error_from_message_fallback() {
        let err = PlayerError::from_message("something odd happened");
        assert_eq!(err, PlayerError::Other("something odd happened".into()));
    }

    #[test]
    fn player_error_keys() {
        assert_eq!(
            PlayerError::NotConfigured.key(),
            "error-player-not-configured"
        );
        assert_eq!(
            PlayerError::SourceNotFound("a".into()).key(),
            "error-player-source-not-found"
        );
    }
}
