// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Meridian Gestures: gesture arbitration for interactive map views.
//!
//! This crate turns touch, mouse wheel, hover, key and trackball input into
//! [`CameraCommand`]s: pan, zoom, rotate, tilt and cancel-animation. Several
//! recognizers watch the same pointer stream, and this crate decides which of
//! them may move the camera:
//!
//! - **Tap and pan**: taps, double-tap zoom, long press, scroll and fling.
//! - **Scale**: two-finger pinch, and the one-finger quick zoom that follows a
//!   double tap.
//! - **Rotate**: two-finger twist.
//! - **Shove**: two-finger vertical drag that tilts the map.
//!
//! The rotate and shove recognizers wait until their signal leaves a deadband
//! *and* the tap timeout has passed; the scale recognizer waits for its
//! deadband. Once the shove has activated, pan, rotate and scale updates
//! yield to it. Once the zoom has activated, rotate and shove can no longer
//! activate. A quick two-finger tap zooms out if no recognizer activated.
//!
//! The surrounding view is reached through small collaborator traits bundled
//! as [`MapHost`]: [`Transform`] (the camera engine), [`TrackingPolicy`],
//! [`UiPolicy`], [`Projection`], [`Annotations`], [`Telemetry`] and
//! [`ZoomControls`].
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use meridian_camera::MapCamera;
//! use meridian_event_state::pointer::PointerEvent;
//! use meridian_gestures::{
//!     Annotations, CameraCommand, GestureDispatcher, LatLng, Projection, Telemetry,
//!     TrackingPolicy, Transform, UiPolicy, UiSettings, ZoomControls,
//! };
//!
//! struct View {
//!     camera: MapCamera,
//!     settings: UiSettings,
//! }
//!
//! impl Transform for View {
//!     fn apply(&mut self, command: CameraCommand) { self.camera.apply(command) }
//!     fn zoom(&self) -> f64 { self.camera.zoom() }
//!     fn bearing(&self) -> f64 { self.camera.bearing() }
//!     fn pitch(&self) -> f64 { self.camera.pitch() }
//!     fn view_center(&self) -> Point { self.camera.view_center() }
//!     fn set_gesture_in_progress(&mut self, on: bool) { self.camera.set_gesture_in_progress(on) }
//! }
//! impl TrackingPolicy for View {
//!     fn is_pan_enabled(&self) -> bool { true }
//!     fn is_rotate_enabled(&self) -> bool { true }
//!     fn reset_tracking_modes(&mut self, _: bool, _: bool) {}
//! }
//! impl UiPolicy for View {
//!     fn is_zoom_gestures_enabled(&self) -> bool { self.settings.zoom_gestures_enabled }
//!     fn is_tilt_gestures_enabled(&self) -> bool { self.settings.tilt_gestures_enabled }
//!     fn is_zoom_controls_enabled(&self) -> bool { self.settings.zoom_controls_enabled }
//!     fn deselect_markers_on_tap(&self) -> bool { self.settings.deselect_markers_on_tap }
//! }
//! impl Projection for View {
//!     fn screen_to_model(&self, p: Point) -> LatLng {
//!         let w = self.camera.view_to_world_point(p);
//!         LatLng::new(-w.y, w.x)
//!     }
//! }
//! impl Annotations for View {
//!     fn hit_test(&mut self, _: Point, _: f64) -> bool { false }
//!     fn clear_selection(&mut self) {}
//! }
//! impl Telemetry for View {}
//! impl ZoomControls for View {}
//!
//! let mut view = View {
//!     camera: MapCamera::new(Rect::new(0.0, 0.0, 800.0, 600.0)),
//!     settings: UiSettings::default(),
//! };
//! view.camera.set_zoom(4.0);
//! let mut gestures = GestureDispatcher::default();
//!
//! // A quick two-finger tap zooms out one step.
//! let (a, b) = (Point::new(300.0, 300.0), Point::new(500.0, 300.0));
//! gestures.handle_pointer_event(&PointerEvent::down(0, a), &mut view);
//! gestures.handle_pointer_event(&PointerEvent::pointer_down(10, 0, &[a, b], 1), &mut view);
//! gestures.handle_pointer_event(&PointerEvent::pointer_up(40, 0, &[a, b], 1), &mut view);
//! assert!(gestures.handle_pointer_event(&PointerEvent::up(60, 0, a), &mut view));
//! assert_eq!(view.camera.zoom(), 2.0);
//! ```
//!
//! Key and trackball input goes through [`MapKeyListener`], whose trackball
//! long press is a task scheduled through a [`Scheduler`] such as
//! [`TimerQueue`].
//!
//! ## Features
//!
//! - `std` (default): Build Kurbo against the standard library
//! - `libm`: Build Kurbo with `libm` float functions for `no_std` targets
//! - `camera_adapter` (default): Implement [`Transform`] for `meridian_camera::MapCamera`
//! - `serde`: Serialize and deserialize [`UiSettings`]
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod arbitration;
mod callbacks;
#[cfg(feature = "camera_adapter")]
mod camera_adapter;
mod command;
mod dispatcher;
mod host;
mod keys;
mod recognizer;
mod rotate;
mod scale;
mod session;
mod settings;
mod shove;
mod tap;
mod timer;

pub use callbacks::{MapClickCallback, MovementCallback};
pub use command::CameraCommand;
pub use dispatcher::GestureDispatcher;
pub use host::{
    Annotations, LatLng, MapHost, Projection, Telemetry, TelemetryEvent, TelemetryKind,
    TrackingPolicy, Transform, UiPolicy, ZoomControls,
};
pub use keys::{
    KEY_FAST_REPEAT_COUNT, KEY_PAN_STEP, KEY_PAN_STEP_FAST, KeyDisposition, MapKeyListener,
    TRACKBALL_PAN_SCALE,
};
pub use recognizer::{Accumulation, Deadband, RecognizerState};
pub use rotate::ROTATE_DEADBAND_DEGREES;
pub use scale::SCALE_DEADBAND;
pub use session::GestureSession;
pub use settings::UiSettings;
pub use shove::{MAX_TILT, MIN_TILT, SHOVE_DEADBAND_PIXELS, SHOVE_PITCH_PER_PIXEL, shove_pitch};
pub use tap::{FLING_DECELERATION_RATE, FLING_DURATION_MS, FLING_VELOCITY_DIVISOR, fling_offset};
pub use timer::{LongPressTimer, Scheduler, TimerId, TimerQueue};
