// SPDX-License-Identifier: MPL-2.0
//! Label authoring sub-flow.
//!
//! A label is authored in three steps while the video is paused:
//!
//! ```text
//! idle ──start──▶ AwaitingStart ──mark──▶ AwaitingEnd ──mark──▶ AwaitingText ──text──▶ commit ──▶ idle
//! ```
//!
//! "Idle" is the absence of an [`AuthoringState`] on the playback state.
//! The current step is derived from which fields are filled in, so the
//! step and the captured data can never disagree.

use super::time_units::normalize;
use crate::domain::subtitle::{Subtitle, TimeRange};

/// Step of an in-progress authoring flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthoringStep {
    /// Waiting for the start of the range to be marked.
    AwaitingStart,
    /// Waiting for the end of the range to be marked.
    AwaitingEnd,
    /// Waiting for the caption text.
    AwaitingText,
}

/// Range being captured. Either end stays unset until marked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingRange {
    pub start_second: Option<u64>,
    pub end_second: Option<u64>,
}

/// Data captured so far for the label being authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthoringState {
    range: PendingRange,
    text: Option<String>,
}

impl AuthoringState {
    /// Starts a flow with both ends of the range unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> AuthoringStep {
        match (self.range.start_second, self.range.end_second) {
            (None, _) => AuthoringStep::AwaitingStart,
            (Some(_), None) => AuthoringStep::AwaitingEnd,
            (Some(_), Some(_)) => AuthoringStep::AwaitingText,
        }
    }

    #[must_use]
    pub fn range(&self) -> PendingRange {
        self.range
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Records the start mark. Returns false outside `AwaitingStart`.
    pub fn mark_start(&mut self, timestamp: Option<f64>) -> bool {
        if self.step() != AuthoringStep::AwaitingStart {
            return false;
        }
        self.range.start_second = Some(normalize(timestamp));
        true
    }

    /// Records the end mark. Returns false outside `AwaitingEnd`.
    pub fn mark_end(&mut self, timestamp: Option<f64>) -> bool {
        if self.step() != AuthoringStep::AwaitingEnd {
            return false;
        }
        self.range.end_second = Some(normalize(timestamp));
        true
    }

    /// Records the caption. Returns false outside `AwaitingText` or if text
    /// was already provided.
    pub fn provide_text(&mut self, text: String) -> bool {
        if self.step() != AuthoringStep::AwaitingText || self.text.is_some() {
            return false;
        }
        self.text = Some(text);
        true
    }

    /// True once both marks and the text are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step() == AuthoringStep::AwaitingText && self.text.is_some()
    }

    /// True if the end was marked before the start on the timeline.
    #[must_use]
    pub fn is_reversed(&self) -> bool {
        matches!(
            (self.range.start_second, self.range.end_second),
            (Some(start), Some(end)) if end < start
        )
    }

    /// Builds the subtitle, or hands the state back if it is not complete.
    pub fn into_subtitle(self) -> Result<Subtitle, Self> {
        match (self.range.start_second, self.range.end_second, self.text) {
            (Some(start), Some(end), Some(text)) => {
                Ok(Subtitle::new(text, TimeRange::new(start, end)))
            }
            (start_second, end_second, text) => Err(Self {
                range: PendingRange {
                    start_second,
                    end_second,
                },
                text,
            }),
        }
    }
}
