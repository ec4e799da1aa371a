// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer, wheel and hover entry points of a map view.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `powf`
use kurbo::Point;
use meridian_event_state::config::DetectorConfig;
use meridian_event_state::pointer::{HoverEvent, PointerAction, PointerEvent, Timestamp, WheelEvent};
use meridian_event_state::rotate::RotateDetector;
use meridian_event_state::scale::ScaleDetector;
use meridian_event_state::shove::ShoveDetector;
use meridian_event_state::tap::TapDetector;

use crate::arbitration::{GestureContext, record};
use crate::callbacks::{MapCallbacks, MapClickCallback, MovementCallback};
use crate::command::CameraCommand;
use crate::host::{MapHost, TelemetryKind, UiPolicy};
use crate::recognizer::Bound;
use crate::rotate::RotateRecognizer;
use crate::scale::ScaleRecognizer;
use crate::session::GestureSession;
use crate::shove::ShoveRecognizer;
use crate::tap::TapRecognizer;

/// Routes pointer input through the gesture recognizers of one map view.
///
/// Each pointer frame is seen by the rotate, scale and shove recognizers (in
/// that order), then by the session bookkeeping that detects two-finger taps,
/// and finally by the tap and pan recognizer. All state lives in the
/// dispatcher; independent views use independent dispatchers.
///
/// Deferred callbacks (single-tap confirmation, long press) are deadlines on
/// the input clock. They fire when a later event arrives, or when the host
/// calls [`GestureDispatcher::poll_timers`] at [`GestureDispatcher::next_deadline`].
#[derive(Debug)]
pub struct GestureDispatcher {
    config: DetectorConfig,
    session: GestureSession,
    focal_point: Option<Point>,
    rotate_detector: RotateDetector,
    scale_detector: ScaleDetector,
    shove_detector: ShoveDetector,
    tap_detector: TapDetector,
    rotate: RotateRecognizer,
    scale: ScaleRecognizer,
    shove: ShoveRecognizer,
    callbacks: MapCallbacks,
}

impl Default for GestureDispatcher {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl GestureDispatcher {
    /// Creates a dispatcher with the given platform thresholds.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            session: GestureSession::default(),
            focal_point: None,
            rotate_detector: RotateDetector::new(config),
            scale_detector: ScaleDetector::new(config),
            shove_detector: ShoveDetector::new(config),
            tap_detector: TapDetector::new(config),
            rotate: RotateRecognizer::default(),
            scale: ScaleRecognizer::default(),
            shove: ShoveRecognizer::default(),
            callbacks: MapCallbacks::default(),
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Arbitration flags of the current touch interaction.
    #[must_use]
    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    /// The focal point override, if any.
    #[must_use]
    pub fn focal_point(&self) -> Option<Point> {
        self.focal_point
    }

    /// Sets or clears the focal point override.
    ///
    /// While set, every zoom and rotation is anchored at it. Clearing falls
    /// back to the focal point configured in `ui`, if any.
    pub fn set_focal_point<U: UiPolicy + ?Sized>(&mut self, point: Option<Point>, ui: &U) {
        self.focal_point = point.or_else(|| ui.focal_point());
    }

    /// Enables or disables double-tap-and-drag zoom.
    pub fn set_quick_zoom_enabled(&mut self, enabled: bool) {
        self.scale_detector.set_quick_scale_enabled(enabled);
    }

    /// Replaces the map click callback.
    pub fn set_map_click_callback(&mut self, callback: Option<MapClickCallback>) {
        self.callbacks.map_click = callback;
    }

    /// Replaces the map long-click callback.
    pub fn set_map_long_click_callback(&mut self, callback: Option<MapClickCallback>) {
        self.callbacks.map_long_click = callback;
    }

    /// Replaces the fling callback.
    pub fn set_fling_callback(&mut self, callback: Option<MovementCallback>) {
        self.callbacks.fling = callback;
    }

    /// Replaces the scroll callback.
    pub fn set_scroll_callback(&mut self, callback: Option<MovementCallback>) {
        self.callbacks.scroll = callback;
    }

    /// Earliest pending deferred tap callback.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.tap_detector.next_deadline()
    }

    /// Fires deferred tap callbacks due at or before `now`, and closes the
    /// quick-zoom double-tap window on the same boundary.
    pub fn poll_timers<H: MapHost + ?Sized>(&mut self, now: Timestamp, host: &mut H) {
        let mut taps = TapRecognizer {
            callbacks: &mut self.callbacks,
            ctx: GestureContext {
                session: &mut self.session,
                host,
                focal_point: self.focal_point,
                config: &self.config,
            },
        };
        self.tap_detector.poll(now, &mut taps);
        self.scale_detector.poll(now);
    }

    /// Handles one pointer frame. Returns `true` if the frame was consumed.
    ///
    /// Frames with a button other than the primary one held are rejected
    /// untouched.
    pub fn handle_pointer_event<H: MapHost + ?Sized>(
        &mut self,
        event: &PointerEvent,
        host: &mut H,
    ) -> bool {
        if !event.buttons.is_primary_only() {
            log::trace!("ignoring pointer frame with buttons {:?}", event.buttons);
            return false;
        }

        self.rotate_detector.on_event(
            event,
            &mut Bound {
                recognizer: &mut self.rotate,
                ctx: GestureContext {
                    session: &mut self.session,
                    host: &mut *host,
                    focal_point: self.focal_point,
                    config: &self.config,
                },
            },
        );
        self.scale_detector.on_event(
            event,
            &mut Bound {
                recognizer: &mut self.scale,
                ctx: GestureContext {
                    session: &mut self.session,
                    host: &mut *host,
                    focal_point: self.focal_point,
                    config: &self.config,
                },
            },
        );
        self.shove_detector.on_event(
            event,
            &mut Bound {
                recognizer: &mut self.shove,
                ctx: GestureContext {
                    session: &mut self.session,
                    host: &mut *host,
                    focal_point: self.focal_point,
                    config: &self.config,
                },
            },
        );

        if self.track_session(event, &mut *host) {
            return true;
        }

        let mut taps = TapRecognizer {
            callbacks: &mut self.callbacks,
            ctx: GestureContext {
                session: &mut self.session,
                host,
                focal_point: self.focal_point,
                config: &self.config,
            },
        };
        let handled = self.tap_detector.on_event(event, &mut taps);
        if event.ends_stream() {
            self.session.reset();
        }
        handled
    }

    /// Session bookkeeping. Returns `true` if a two-finger tap consumed the frame.
    fn track_session<H: MapHost + ?Sized>(&mut self, event: &PointerEvent, host: &mut H) -> bool {
        if event.pointer_count() >= 2 {
            self.session.two_pointer_centroid = Some(event.centroid());
        }

        match event.action {
            PointerAction::Down => host.set_gesture_in_progress(true),
            PointerAction::PointerDown { .. } => {
                self.session.two_tap_candidate =
                    event.pointer_count() == 2 && host.is_zoom_gestures_enabled();
                if self.session.two_tap_candidate {
                    record(
                        host,
                        TelemetryKind::TwoFingerSingleTap,
                        event.primary_position(),
                    );
                }
            }
            PointerAction::Up => {
                let is_tap = event.time.saturating_sub(event.down_time) <= self.config.tap_timeout_ms;
                if self.session.two_tap_candidate && is_tap && !self.mid_gesture() {
                    let anchor = self
                        .focal_point
                        .or(self.session.two_pointer_centroid)
                        .unwrap_or_else(|| event.primary_position());
                    log::debug!("two-finger tap at {anchor:?}");
                    host.apply(CameraCommand::ZoomStep {
                        zoom_in: false,
                        anchor,
                    });
                    self.tap_detector.cancel();
                    self.session.reset();
                    host.set_gesture_in_progress(false);
                    return true;
                }

                if self.session.pan_in_progress {
                    record(host, TelemetryKind::DragEnd, event.primary_position());
                    self.session.pan_in_progress = false;
                }
                self.session.two_tap_candidate = false;
                host.set_gesture_in_progress(false);
            }
            PointerAction::Cancel => {
                self.session.two_tap_candidate = false;
                host.set_gesture_in_progress(false);
            }
            PointerAction::Move | PointerAction::PointerUp { .. } => {}
        }
        false
    }

    /// Whether a two-finger recognizer is running or has moved the camera in
    /// this session.
    fn mid_gesture(&self) -> bool {
        self.rotate_detector.is_in_progress()
            || self.scale_detector.is_in_progress()
            || self.shove_detector.is_in_progress()
            || self.session.any_recognizer_active()
    }

    /// Handles a mouse wheel notch: zooms about the cursor.
    pub fn handle_wheel_event<H: MapHost + ?Sized>(&mut self, event: &WheelEvent, host: &mut H) -> bool {
        if !host.is_zoom_gestures_enabled() {
            return false;
        }
        host.apply(CameraCommand::CancelTransitions);
        host.apply(CameraCommand::ScaleBy {
            factor: 2.0_f64.powf(event.vertical),
            anchor: event.position,
        });
        true
    }

    /// Shows the zoom controls while a mouse hovers over the view.
    pub fn handle_hover_event<H: MapHost + ?Sized>(&mut self, event: HoverEvent, host: &mut H) -> bool {
        if host.is_zoom_controls_enabled() {
            match event {
                HoverEvent::Enter | HoverEvent::Move => host.show_zoom_controls(),
                HoverEvent::Exit => host.hide_zoom_controls(),
            }
        }
        true
    }

    /// An on-screen zoom button was pressed.
    pub fn on_zoom_button<H: MapHost + ?Sized>(&mut self, zoom_in: bool, host: &mut H) -> bool {
        if !host.is_zoom_gestures_enabled() {
            return false;
        }
        host.apply(CameraCommand::CancelTransitions);
        let anchor = host.view_center();
        host.apply(CameraCommand::ZoomStep { zoom_in, anchor });
        true
    }

    /// The view was shown or hidden.
    pub fn on_visibility_changed<H: MapHost + ?Sized>(&mut self, visible: bool, host: &mut H) {
        if !host.is_zoom_controls_enabled() {
            return;
        }
        if visible {
            host.show_zoom_controls();
        } else {
            host.hide_zoom_controls();
        }
    }

    /// The view was detached from its window.
    pub fn on_detached<H: MapHost + ?Sized>(&mut self, host: &mut H) {
        if host.is_zoom_controls_enabled() {
            host.hide_zoom_controls();
        }
    }
}
