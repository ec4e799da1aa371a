// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording host shared by the scenario tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use kurbo::{Point, Rect};
use meridian_camera::MapCamera;
use meridian_gestures::{
    Annotations, CameraCommand, LatLng, Projection, Telemetry, TelemetryEvent, TelemetryKind,
    TrackingPolicy, Transform, UiPolicy, UiSettings, ZoomControls,
};

/// Viewport used by every scenario: 800 x 600, center (400, 300).
pub const VIEW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// A map view made of a [`MapCamera`] and call logs.
#[derive(Debug)]
pub struct RecordingHost {
    pub camera: MapCamera,
    pub settings: UiSettings,
    pub pan_enabled: bool,
    pub rotate_enabled: bool,
    pub hit: bool,
    pub commands: Vec<CameraCommand>,
    pub tracking_resets: Vec<(bool, bool)>,
    pub telemetry: Vec<TelemetryEvent>,
    pub hit_tests: Vec<Point>,
    pub selection_clears: u32,
    pub controls_visible: Option<bool>,
    pub gesture_in_progress: Vec<bool>,
}

impl RecordingHost {
    pub fn new() -> Self {
        let mut camera = MapCamera::new(VIEW);
        camera.set_zoom(8.0);
        camera.set_pitch(30.0);
        Self {
            camera,
            settings: UiSettings::default(),
            pan_enabled: true,
            rotate_enabled: true,
            hit: false,
            commands: Vec::new(),
            tracking_resets: Vec::new(),
            telemetry: Vec::new(),
            hit_tests: Vec::new(),
            selection_clears: 0,
            controls_visible: None,
            gesture_in_progress: Vec::new(),
        }
    }

    /// Commands that move the camera, in order.
    pub fn moves(&self) -> Vec<CameraCommand> {
        self.commands
            .iter()
            .copied()
            .filter(CameraCommand::moves_camera)
            .collect()
    }

    pub fn telemetry_kinds(&self) -> Vec<TelemetryKind> {
        self.telemetry.iter().map(|event| event.kind).collect()
    }

    pub fn count(&self, pred: impl Fn(&CameraCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    pub fn clear_logs(&mut self) {
        self.commands.clear();
        self.tracking_resets.clear();
        self.telemetry.clear();
        self.hit_tests.clear();
        self.gesture_in_progress.clear();
    }
}

impl Transform for RecordingHost {
    fn apply(&mut self, command: CameraCommand) {
        self.commands.push(command);
        self.camera.apply(command);
    }

    fn zoom(&self) -> f64 {
        self.camera.zoom()
    }

    fn bearing(&self) -> f64 {
        self.camera.bearing()
    }

    fn pitch(&self) -> f64 {
        self.camera.pitch()
    }

    fn view_center(&self) -> Point {
        self.camera.view_center()
    }

    fn set_gesture_in_progress(&mut self, in_progress: bool) {
        self.gesture_in_progress.push(in_progress);
        self.camera.set_gesture_in_progress(in_progress);
    }
}

impl TrackingPolicy for RecordingHost {
    fn is_pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    fn is_rotate_enabled(&self) -> bool {
        self.rotate_enabled
    }

    fn reset_tracking_modes(&mut self, disable_location: bool, disable_bearing: bool) {
        self.tracking_resets.push((disable_location, disable_bearing));
    }
}

impl UiPolicy for RecordingHost {
    fn is_zoom_gestures_enabled(&self) -> bool {
        self.settings.is_zoom_gestures_enabled()
    }

    fn is_tilt_gestures_enabled(&self) -> bool {
        self.settings.is_tilt_gestures_enabled()
    }

    fn is_zoom_controls_enabled(&self) -> bool {
        self.settings.is_zoom_controls_enabled()
    }

    fn deselect_markers_on_tap(&self) -> bool {
        self.settings.deselect_markers_on_tap()
    }

    fn focal_point(&self) -> Option<Point> {
        self.settings.focal_point()
    }
}

impl Projection for RecordingHost {
    fn screen_to_model(&self, point: Point) -> LatLng {
        let world = self.camera.view_to_world_point(point);
        LatLng::new(-world.y, world.x)
    }
}

impl Annotations for RecordingHost {
    fn hit_test(&mut self, point: Point, _density: f64) -> bool {
        self.hit_tests.push(point);
        self.hit
    }

    fn clear_selection(&mut self) {
        self.selection_clears += 1;
    }
}

impl Telemetry for RecordingHost {
    fn record(&mut self, event: TelemetryEvent) {
        self.telemetry.push(event);
    }
}

impl ZoomControls for RecordingHost {
    fn show_zoom_controls(&mut self) {
        self.controls_visible = Some(true);
    }

    fn hide_zoom_controls(&mut self) {
        self.controls_visible = Some(false);
    }
}

/// Two points `half_width` either side of `center` on a horizontal line.
pub fn level_pair(center: Point, half_width: f64) -> [Point; 2] {
    [
        Point::new(center.x - half_width, center.y),
        Point::new(center.x + half_width, center.y),
    ]
}

/// Two points `half_height` above and below `center`.
pub fn vertical_pair(center: Point, half_height: f64) -> [Point; 2] {
    [
        Point::new(center.x, center.y - half_height),
        Point::new(center.x, center.y + half_height),
    ]
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
