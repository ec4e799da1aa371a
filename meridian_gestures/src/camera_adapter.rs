// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use meridian_camera::MapCamera;

use crate::command::CameraCommand;
use crate::host::Transform;

/// Applies commands to the reference camera.
impl Transform for MapCamera {
    fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::CancelTransitions => self.cancel_transitions(),
            CameraCommand::PanBy {
                offset,
                duration_ms,
            } => self.pan_by(offset, duration_ms),
            CameraCommand::ZoomStep { zoom_in, anchor } => self.zoom_step(zoom_in, anchor),
            CameraCommand::ScaleBy { factor, anchor } => self.zoom_about_view_point(anchor, factor),
            CameraCommand::SetBearing { degrees, anchor } => {
                self.rotate_about_view_point(anchor, degrees);
            }
            CameraCommand::SetTilt { degrees } => self.set_pitch(degrees),
        }
    }

    fn zoom(&self) -> f64 {
        Self::zoom(self)
    }

    fn bearing(&self) -> f64 {
        Self::bearing(self)
    }

    fn pitch(&self) -> f64 {
        Self::pitch(self)
    }

    fn view_center(&self) -> Point {
        Self::view_center(self)
    }

    fn set_gesture_in_progress(&mut self, in_progress: bool) {
        Self::set_gesture_in_progress(self, in_progress);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Vec2};

    use super::*;

    fn camera() -> MapCamera {
        MapCamera::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    #[test]
    fn fling_pan_records_a_transition_that_cancel_clears() {
        let mut camera = camera();
        camera.apply(CameraCommand::PanBy {
            offset: Vec2::new(50.0, 0.0),
            duration_ms: 1000,
        });
        assert!(camera.transition().is_some());
        camera.apply(CameraCommand::CancelTransitions);
        assert!(camera.transition().is_none());
    }

    #[test]
    fn scale_keeps_anchor_fixed() {
        let mut camera = camera();
        let anchor = Point::new(200.0, 150.0);
        let before = camera.view_to_world_point(anchor);
        camera.apply(CameraCommand::ScaleBy {
            factor: 1.5,
            anchor,
        });
        assert!((Transform::zoom(&camera) - 1.5).abs() < 1e-12);
        assert!((camera.view_to_world_point(anchor) - before).hypot() < 1e-9);
    }

    #[test]
    fn bearing_and_tilt() {
        let mut camera = camera();
        camera.apply(CameraCommand::SetBearing {
            degrees: -30.0,
            anchor: Point::new(400.0, 300.0),
        });
        assert!((Transform::bearing(&camera) - 330.0).abs() < 1e-9);
        camera.apply(CameraCommand::SetTilt { degrees: 80.0 });
        assert_eq!(Transform::pitch(&camera), 60.0);
    }
}
