// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators the gesture layer drives or consults.
//!
//! The gesture layer owns no camera, overlays or widgets. Everything it needs
//! from the surrounding map view is expressed as a small trait here, and
//! [`MapHost`] bundles them so a dispatcher call takes a single `&mut host`.

use kurbo::Point;

use crate::command::CameraCommand;

/// The camera engine.
///
/// Commands are applied synchronously. Queries report the state after every
/// command applied so far.
pub trait Transform {
    /// Applies one command.
    fn apply(&mut self, command: CameraCommand);

    /// Current zoom.
    fn zoom(&self) -> f64;

    /// Current bearing in degrees.
    fn bearing(&self) -> f64;

    /// Current pitch in degrees.
    fn pitch(&self) -> f64;

    /// Center of the viewport in screen pixels.
    fn view_center(&self) -> Point;

    /// Marks whether a gesture is driving the camera, so the engine can hold
    /// back idle-time work.
    fn set_gesture_in_progress(&mut self, in_progress: bool);
}

/// Location and bearing tracking modes.
pub trait TrackingPolicy {
    /// Whether panning is currently allowed.
    fn is_pan_enabled(&self) -> bool;

    /// Whether rotating is currently allowed.
    fn is_rotate_enabled(&self) -> bool;

    /// Leaves the tracking modes a gesture is about to override.
    fn reset_tracking_modes(&mut self, disable_location: bool, disable_bearing: bool);
}

/// User-facing gesture settings.
pub trait UiPolicy {
    /// Whether pinch, double tap and other zoom gestures are enabled.
    fn is_zoom_gestures_enabled(&self) -> bool;

    /// Whether the two-finger tilt gesture is enabled.
    fn is_tilt_gestures_enabled(&self) -> bool;

    /// Whether on-screen zoom controls are shown.
    fn is_zoom_controls_enabled(&self) -> bool;

    /// Whether a tap on empty map clears the overlay selection.
    fn deselect_markers_on_tap(&self) -> bool;

    /// Configured focal point restored when the override is reset.
    fn focal_point(&self) -> Option<Point> {
        None
    }
}

/// A geographic coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLng {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
}

impl LatLng {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Screen to map conversion.
pub trait Projection {
    /// Converts a screen point.
    fn screen_to_model(&self, point: Point) -> LatLng;
}

/// Overlay annotations (markers, shapes).
pub trait Annotations {
    /// Selects whatever lies under `point`; returns `true` if anything was hit.
    fn hit_test(&mut self, point: Point, density: f64) -> bool;

    /// Deselects every annotation.
    fn clear_selection(&mut self);
}

/// Gesture transitions reported to analytics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TelemetryKind {
    /// Two pointers went down together.
    TwoFingerSingleTap,
    /// Second press of a double tap.
    DoubleTap,
    /// Confirmed single tap.
    SingleTap,
    /// Fling.
    PanStart,
    /// Pinch began.
    PinchStart,
    /// Rotation began.
    RotationStart,
    /// Shove began.
    PitchStart,
    /// A pan ended with the last pointer.
    DragEnd,
}

/// One analytics event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetryEvent {
    /// What happened.
    pub kind: TelemetryKind,
    /// Where, in screen pixels.
    pub position: Point,
    /// Camera zoom when it happened.
    pub zoom: f64,
}

/// Fire-and-forget analytics sink.
pub trait Telemetry {
    /// Records an event. Must not block.
    fn record(&mut self, _event: TelemetryEvent) {}
}

/// On-screen zoom buttons.
pub trait ZoomControls {
    /// Makes the controls visible.
    fn show_zoom_controls(&mut self) {}

    /// Hides the controls.
    fn hide_zoom_controls(&mut self) {}
}

/// Everything a [`GestureDispatcher`](crate::GestureDispatcher) talks to.
///
/// Implemented for every type that implements all of the collaborator traits.
pub trait MapHost:
    Transform + TrackingPolicy + UiPolicy + Projection + Annotations + Telemetry + ZoomControls
{
}

impl<T> MapHost for T where
    T: Transform
        + TrackingPolicy
        + UiPolicy
        + Projection
        + Annotations
        + Telemetry
        + ZoomControls
        + ?Sized
{
}
