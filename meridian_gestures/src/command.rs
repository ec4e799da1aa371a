// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Camera change requested by a recognizer or the key mapper.
///
/// Commands describe intent only; the [`Transform`](crate::Transform)
/// collaborator decides how to apply them. Anchors are screen pixels; pan
/// offsets are density-independent units.
///
/// ## Command vocabulary
///
/// - **Cancel**: [`CameraCommand::CancelTransitions`] stops any in-flight
///   animation before a gesture takes over.
/// - **Pan**: [`CameraCommand::PanBy`] moves the content, optionally as a
///   timed movement (fling).
/// - **Zoom**: [`CameraCommand::ZoomStep`] for discrete steps (double tap,
///   two-finger tap, keys), [`CameraCommand::ScaleBy`] for continuous factors
///   (pinch, quick zoom, wheel).
/// - **Rotate**: [`CameraCommand::SetBearing`] sets an absolute bearing.
/// - **Tilt**: [`CameraCommand::SetTilt`] sets an absolute pitch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    /// Stop any in-flight camera animation.
    CancelTransitions,
    /// Move the content by `offset`, over `duration_ms` (`0` = immediately).
    PanBy {
        /// Offset in density-independent units.
        offset: Vec2,
        /// Nominal duration of the movement.
        duration_ms: u64,
    },
    /// Zoom one step in or out, keeping `anchor` fixed.
    ZoomStep {
        /// `true` to zoom in.
        zoom_in: bool,
        /// Fixed point in screen pixels.
        anchor: Point,
    },
    /// Multiply the zoom by `factor`, keeping `anchor` fixed.
    ScaleBy {
        /// Scale factor; `> 1.0` zooms in.
        factor: f64,
        /// Fixed point in screen pixels.
        anchor: Point,
    },
    /// Set the bearing, rotating about `anchor`.
    SetBearing {
        /// New bearing in degrees.
        degrees: f64,
        /// Pivot in screen pixels.
        anchor: Point,
    },
    /// Set the pitch.
    SetTilt {
        /// New pitch in degrees.
        degrees: f64,
    },
}

impl CameraCommand {
    /// Returns `true` for commands that move the camera, as opposed to
    /// [`CameraCommand::CancelTransitions`].
    #[must_use]
    pub fn moves_camera(&self) -> bool {
        !matches!(self, Self::CancelTransitions)
    }
}
