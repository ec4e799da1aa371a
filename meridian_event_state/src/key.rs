// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete key and relative trackball input.

use kurbo::Vec2;

use crate::pointer::Timestamp;

/// Keys that drive the map without a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// D-pad or arrow left.
    Left,
    /// D-pad or arrow right.
    Right,
    /// D-pad or arrow up.
    Up,
    /// D-pad or arrow down.
    Down,
    /// D-pad center.
    Center,
    /// Enter.
    Enter,
    /// Any other key; never handled.
    Other(u32),
}

impl KeyCode {
    /// Returns `true` for the keys that zoom rather than pan.
    #[must_use]
    pub fn is_confirm(self) -> bool {
        matches!(self, Self::Center | Self::Enter)
    }
}

/// A key press or release as delivered by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Auto-repeat count of a held key; `0` for the initial press.
    pub repeat_count: u32,
    /// Set on a release that the platform aborted.
    pub canceled: bool,
    /// When the event was produced.
    pub time: Timestamp,
}

impl KeyEvent {
    /// Initial press of `code`.
    #[must_use]
    pub fn new(code: KeyCode, time: Timestamp) -> Self {
        Self {
            code,
            repeat_count: 0,
            canceled: false,
            time,
        }
    }

    /// Sets the auto-repeat count.
    #[must_use]
    pub fn with_repeat_count(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Marks the event canceled.
    #[must_use]
    pub fn canceled(mut self) -> Self {
        self.canceled = true;
        self
    }
}

/// What a trackball did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackballAction {
    /// The ball was pushed.
    Down,
    /// The ball was released.
    Up,
    /// The ball rolled by a relative amount.
    Move(Vec2),
    /// The platform aborted the interaction.
    Cancel,
}

/// A trackball event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackballEvent {
    /// What happened.
    pub action: TrackballAction,
    /// When it happened.
    pub time: Timestamp,
}

impl TrackballEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(action: TrackballAction, time: Timestamp) -> Self {
        Self { action, time }
    }
}
