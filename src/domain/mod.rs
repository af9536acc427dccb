// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects shared by the playback core.
//!
//! # Modules
//!
//! - [`subtitle`]: Subtitle records ([`TimeRange`](subtitle::TimeRange),
//!   [`Subtitle`](subtitle::Subtitle))
//! - [`video`]: Video playback types ([`ControlsState`](video::ControlsState),
//!   [`Progress`](video::Progress), [`HideDelay`](video::HideDelay))

pub mod subtitle;
pub mod video;
