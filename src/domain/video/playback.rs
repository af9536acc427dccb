// SPDX-License-Identifier: MPL-2.0
//! Control overlay visibility.

/// Visibility of the playback control overlay.
///
/// The overlay starts hidden and only changes on an explicit toggle,
/// either from the user or from the idle-hide timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlsState {
    /// Controls are drawn and accept play/pause gestures.
    Visible,
    /// Controls are not drawn.
    #[default]
    Hidden,
}

impl ControlsState {
    /// Returns true if the controls are visible.
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Returns the opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Visible => Self::Hidden,
            Self::Hidden => Self::Visible,
        }
    }

    /// Opacity the display layer should draw the overlay with.
    #[must_use]
    pub fn opacity(self) -> f32 {
        match self {
            Self::Visible => 1.0,
            Self::Hidden => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    #[test]
    fn default_is_hidden() {
        assert_eq!(ControlsState::default(), ControlsState::Hidden);
    }

    #[test]
    fn toggled_flips_state() {
        assert_eq!(ControlsState::Hidden.toggled(), ControlsState::Visible);
        assert_eq!(ControlsState::Visible.toggled(), ControlsState::Hidden);
    }

    #[test]
    fn opacity_matches_visibility() {
        assert!(ControlsState::Visible.is_visible());
        assert!(!ControlsState::Hidden.is_visible());
        assert_abs_diff_eq!(ControlsState::Visible.opacity(), 1.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(ControlsState::Hidden.opacity(), 0.0, epsilon = F32_EPSILON);
    }
}
