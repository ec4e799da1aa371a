// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use meridian_event_state::tap::{DoubleTapPhase, TapListener};

use crate::arbitration::GestureContext;
use crate::callbacks::MapCallbacks;
use crate::command::CameraCommand;
use crate::host::{MapHost, TelemetryKind};

/// Share of the release velocity turned into fling travel.
pub const FLING_DECELERATION_RATE: f64 = 1.0;

/// Fling travel is the release velocity (per second) divided by this.
pub const FLING_VELOCITY_DIVISOR: f64 = 4.0;

/// Nominal duration of the pan issued for a fling.
pub const FLING_DURATION_MS: u64 = 1000;

/// Fling offset, in density-independent units, for a release velocity in
/// pixels per second.
#[must_use]
pub fn fling_offset(velocity: Vec2, density: f64) -> Vec2 {
    velocity * FLING_DECELERATION_RATE / FLING_VELOCITY_DIVISOR / density
}

/// Single-pointer map gestures: taps, double-tap zoom, long press, scroll
/// and fling.
pub(crate) struct TapRecognizer<'a, 'c, H: ?Sized> {
    pub(crate) callbacks: &'a mut MapCallbacks,
    pub(crate) ctx: GestureContext<'c, H>,
}

impl<H: MapHost + ?Sized> TapListener for TapRecognizer<'_, '_, H> {
    fn on_down(&mut self, _: Point) -> bool {
        if self.ctx.host.is_zoom_controls_enabled() {
            self.ctx.host.show_zoom_controls();
        }
        true
    }

    fn on_single_tap_up(&mut self, _: Point) -> bool {
        self.ctx.cancel_transitions();
        true
    }

    fn on_single_tap_confirmed(&mut self, position: Point) -> bool {
        let density = self.ctx.config.density;
        if !self.ctx.host.hit_test(position, density) {
            if self.ctx.host.deselect_markers_on_tap() {
                self.ctx.host.clear_selection();
            }
            let at = self.ctx.host.screen_to_model(position);
            self.callbacks.map_click(at);
        }
        self.ctx.record(TelemetryKind::SingleTap, position);
        true
    }

    fn on_double_tap_event(&mut self, phase: DoubleTapPhase, position: Point) -> bool {
        if !self.ctx.host.is_zoom_gestures_enabled() {
            return false;
        }
        match phase {
            DoubleTapPhase::Down => self.ctx.record(TelemetryKind::DoubleTap, position),
            DoubleTapPhase::Move => {}
            DoubleTapPhase::Up if self.ctx.session.quick_zoom => {
                log::debug!("double tap release ends quick zoom");
                self.ctx.session.quick_zoom = false;
            }
            DoubleTapPhase::Up => {
                self.ctx.cancel_transitions();
                let anchor = self.ctx.anchor(position);
                self.ctx.host.apply(CameraCommand::ZoomStep {
                    zoom_in: true,
                    anchor,
                });
            }
        }
        true
    }

    fn on_long_press(&mut self, position: Point) {
        if self.ctx.session.quick_zoom {
            return;
        }
        let at = self.ctx.host.screen_to_model(position);
        self.callbacks.map_long_click(at);
    }

    fn on_scroll(&mut self, distance: Vec2) -> bool {
        self.ctx.session.pan_in_progress = true;
        if self.ctx.pan_suppressed() {
            log::trace!("scroll suppressed by tracking or tilt");
            return false;
        }
        self.ctx.host.reset_tracking_modes(true, false);
        self.ctx.cancel_transitions();
        let offset = -distance / self.ctx.config.density;
        self.ctx.host.apply(CameraCommand::PanBy {
            offset,
            duration_ms: 0,
        });
        self.callbacks.scroll();
        true
    }

    fn on_fling(&mut self, velocity: Vec2, origin: Point) -> bool {
        if !self.ctx.host.is_pan_enabled() {
            return false;
        }
        self.ctx.host.reset_tracking_modes(true, false);
        self.ctx.cancel_transitions();

        let offset = fling_offset(velocity, self.ctx.config.density);
        self.ctx.host.set_gesture_in_progress(true);
        self.ctx.host.apply(CameraCommand::PanBy {
            offset,
            duration_ms: FLING_DURATION_MS,
        });
        self.ctx.host.set_gesture_in_progress(false);

        self.callbacks.fling();
        self.ctx.record(TelemetryKind::PanStart, origin);
        true
    }
}
