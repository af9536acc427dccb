// SPDX-License-Identifier: MPL-2.0

/// Whole-second span of the timeline a subtitle is shown for.
///
/// Invariant: `start_second <= end_second`. The end is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeRange {
    start_second: u64,
    end_second: u64,
}

impl TimeRange {
    /// Creates a range from two canonical seconds.
    ///
    /// Endpoints given in reverse order are swapped.
    #[must_use]
    pub fn new(start_second: u64, end_second: u64) -> Self {
        Self {
            start_second: start_second.min(end_second),
            end_second: start_second.max(end_second),
        }
    }

    #[must_use]
    pub fn start_second(self) -> u64 {
        self.start_second
    }

    #[must_use]
    pub fn end_second(self) -> u64 {
        self.end_second
    }

    /// Returns true if `second` falls in `[start, end)`.
    #[must_use]
    pub fn contains(self, second: u64) -> bool {
        self.start_second <= second && second < self.end_second
    }

    /// A zero-length range never matches any second.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start_second == self.end_second
    }

    #[must_use]
    pub fn duration_secs(self) -> u64 {
        self.end_second - self.start_second
    }
}

/// A text overlay bound to a time range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subtitle {
    text: String,
    range: TimeRange,
}

impl Subtitle {
    #[must_use]
    pub fn new(text: impl Into<String>, range: TimeRange) -> Self {
        Self {
            text: text.into(),
            range,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Returns true if this subtitle should be displayed at `second`.
    #[must_use]
    pub fn is_active_at(&self, second: u64) -> bool {
        self.range.contains(second)
    }
}
