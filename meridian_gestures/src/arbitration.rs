// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-recognizer rules: who may move the camera, and about which point.
//!
//! Priorities between the recognizers are asymmetric:
//!
//! - A shove that has activated suppresses pan, rotate and pinch updates.
//! - An active zoom keeps rotate and shove from activating; nothing keeps a
//!   pinch from activating during a rotation.
//! - A two-finger tap only fires if none of the recognizers activated.
//!
//! Anchors follow one rule everywhere: the focal point override, if set,
//! wins over any point derived from the gesture.

use kurbo::Point;
use meridian_event_state::config::DetectorConfig;
use meridian_event_state::pointer::Timestamp;

use crate::command::CameraCommand;
use crate::host::{MapHost, TelemetryEvent, TelemetryKind};
use crate::recognizer::RecognizerState;
use crate::session::GestureSession;

/// Everything a recognizer may read or change during one dispatch step.
pub(crate) struct GestureContext<'a, H: ?Sized> {
    pub(crate) session: &'a mut GestureSession,
    pub(crate) host: &'a mut H,
    pub(crate) focal_point: Option<Point>,
    pub(crate) config: &'a DetectorConfig,
}

impl<H: MapHost + ?Sized> GestureContext<'_, H> {
    /// `natural`, unless a focal point override is set.
    pub(crate) fn anchor(&self, natural: Point) -> Point {
        self.focal_point.unwrap_or(natural)
    }

    /// Anchor of a scale update: the override, the viewport center for a
    /// quick zoom, or the pinch focus.
    pub(crate) fn scale_anchor(&self, focus: Point) -> Point {
        match self.focal_point {
            Some(point) => point,
            None if self.session.quick_zoom => self.host.view_center(),
            None => focus,
        }
    }

    /// Returns `true` once more than the tap timeout has passed since `state`
    /// began.
    pub(crate) fn past_tap_timeout(&self, state: &RecognizerState, now: Timestamp) -> bool {
        state
            .elapsed(now)
            .is_some_and(|elapsed| elapsed > self.config.tap_timeout_ms)
    }

    /// Returns `true` if scroll updates must not move the camera.
    pub(crate) fn pan_suppressed(&self) -> bool {
        !self.host.is_pan_enabled() || self.session.tilt_active
    }

    /// Returns `true` if rotate updates must not move the camera.
    pub(crate) fn rotate_suppressed(&self) -> bool {
        !self.host.is_rotate_enabled() || self.session.tilt_active
    }

    pub(crate) fn cancel_transitions(&mut self) {
        self.host.apply(CameraCommand::CancelTransitions);
    }

    pub(crate) fn record(&mut self, kind: TelemetryKind, position: Point) {
        record(&mut *self.host, kind, position);
    }
}

/// Reports a telemetry event at `position` with the current zoom.
pub(crate) fn record<H: MapHost + ?Sized>(host: &mut H, kind: TelemetryKind, position: Point) {
    let zoom = host.zoom();
    host.record(TelemetryEvent {
        kind,
        position,
        zoom,
    });
}
