// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional keys and trackball.
//!
//! Arrow keys and trackball motion pan the map. The confirm key zooms in on
//! release and out on long press; the platform tracks that long press. The
//! trackball button does the same, but its long press is a deferred task owned
//! by a [`LongPressTimer`].

use kurbo::Vec2;
use meridian_event_state::config::DetectorConfig;
use meridian_event_state::key::{KeyCode, KeyEvent, TrackballAction, TrackballEvent};

use crate::command::CameraCommand;
use crate::host::MapHost;
use crate::timer::{LongPressTimer, Scheduler, TimerId};

/// Pan step of an arrow key, in density-independent units.
pub const KEY_PAN_STEP: f64 = 10.0;

/// Pan step of an arrow key held past [`KEY_FAST_REPEAT_COUNT`] repeats.
pub const KEY_PAN_STEP_FAST: f64 = 50.0;

/// Auto-repeat count from which arrow keys pan faster.
pub const KEY_FAST_REPEAT_COUNT: u32 = 5;

/// Trackball motion is multiplied by this before panning.
pub const TRACKBALL_PAN_SCALE: f64 = 10.0;

/// What the platform should do with a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyDisposition {
    /// Not for the map; let the platform route it elsewhere.
    Ignored,
    /// Consumed.
    Handled,
    /// Consumed; report a long press with
    /// [`MapKeyListener::on_key_long_press`] if the key is held.
    TrackLongPress,
}

/// Maps key and trackball input of one map view to camera commands.
#[derive(Clone, Debug)]
pub struct MapKeyListener {
    config: DetectorConfig,
    trackball_timer: LongPressTimer,
    confirm_long_pressed: bool,
}

impl Default for MapKeyListener {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl MapKeyListener {
    /// Creates a listener using the long-press delay and density of `config`.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            trackball_timer: LongPressTimer::new(),
            confirm_long_pressed: false,
        }
    }

    /// The trackball long-press timer.
    #[must_use]
    pub fn trackball_timer(&self) -> &LongPressTimer {
        &self.trackball_timer
    }

    /// A key went down (or auto-repeated).
    pub fn on_key_down<H: MapHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> KeyDisposition {
        let step = if event.repeat_count >= KEY_FAST_REPEAT_COUNT {
            KEY_PAN_STEP_FAST / self.config.density
        } else {
            KEY_PAN_STEP / self.config.density
        };

        let offset = match event.code {
            KeyCode::Left => Vec2::new(step, 0.0),
            KeyCode::Right => Vec2::new(-step, 0.0),
            KeyCode::Up => Vec2::new(0.0, step),
            KeyCode::Down => Vec2::new(0.0, -step),
            KeyCode::Center | KeyCode::Enter => {
                // Repeats of a held key keep the long-press mark.
                if event.repeat_count == 0 {
                    self.confirm_long_pressed = false;
                }
                return KeyDisposition::TrackLongPress;
            }
            KeyCode::Other(_) => return KeyDisposition::Ignored,
        };

        if !host.is_pan_enabled() {
            return KeyDisposition::Ignored;
        }
        host.apply(CameraCommand::CancelTransitions);
        host.apply(CameraCommand::PanBy {
            offset,
            duration_ms: 0,
        });
        KeyDisposition::Handled
    }

    /// The platform reports a key held past the long-press delay.
    pub fn on_key_long_press<H: MapHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> bool {
        if !event.code.is_confirm() || !host.is_zoom_gestures_enabled() {
            return false;
        }
        self.confirm_long_pressed = true;
        let anchor = host.view_center();
        host.apply(CameraCommand::ZoomStep {
            zoom_in: false,
            anchor,
        });
        true
    }

    /// A key was released.
    pub fn on_key_up<H: MapHost + ?Sized>(&mut self, event: &KeyEvent, host: &mut H) -> bool {
        if !event.code.is_confirm() {
            return false;
        }
        if core::mem::take(&mut self.confirm_long_pressed) {
            log::trace!("confirm release after long press ignored");
            return false;
        }
        if event.canceled || !host.is_zoom_gestures_enabled() {
            return false;
        }
        let anchor = host.view_center();
        host.apply(CameraCommand::ZoomStep {
            zoom_in: true,
            anchor,
        });
        true
    }

    /// Trackball motion or button input.
    pub fn on_trackball_event<H, S>(&mut self, event: &TrackballEvent, host: &mut H, scheduler: &mut S) -> bool
    where
        H: MapHost + ?Sized,
        S: Scheduler + ?Sized,
    {
        match event.action {
            TrackballAction::Move(delta) => {
                if !host.is_pan_enabled() {
                    return false;
                }
                host.apply(CameraCommand::CancelTransitions);
                host.apply(CameraCommand::PanBy {
                    offset: -delta * TRACKBALL_PAN_SCALE / self.config.density,
                    duration_ms: 0,
                });
                true
            }
            TrackballAction::Down => {
                self.trackball_timer
                    .arm(scheduler, self.config.long_press_timeout_ms);
                true
            }
            TrackballAction::Up => {
                let pending = self.trackball_timer.cancel(scheduler);
                if !pending || !host.is_zoom_gestures_enabled() {
                    return false;
                }
                let anchor = host.view_center();
                host.apply(CameraCommand::ZoomStep {
                    zoom_in: true,
                    anchor,
                });
                true
            }
            TrackballAction::Cancel => {
                self.trackball_timer.cancel(scheduler);
                true
            }
        }
    }

    /// A task scheduled by [`MapKeyListener::on_trackball_event`] fired.
    ///
    /// Zooms out about the viewport center unless `id` is stale. Returns
    /// `true` if it zoomed.
    pub fn on_long_press_timeout<H: MapHost + ?Sized>(&mut self, id: TimerId, host: &mut H) -> bool {
        if !self.trackball_timer.fire(id) {
            return false;
        }
        let anchor = host.view_center();
        host.apply(CameraCommand::ZoomStep {
            zoom_in: false,
            anchor,
        });
        true
    }
}
