// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::limits::CameraLimits;

/// A timed camera movement that has been issued but not yet finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Total view-space offset of the movement, in pixels.
    pub offset: Vec2,
    /// Nominal duration in milliseconds.
    pub duration_ms: u64,
}

/// Headless map camera over a world plane.
///
/// `MapCamera` tracks the screen rectangle it renders into, the world point
/// shown at the center of that rectangle, a uniform zoom factor, a bearing
/// and a pitch. It can be used to:
/// - Convert points between world and view coordinates.
/// - Pan, zoom and rotate around a chosen view-space anchor, keeping the
///   world point under the anchor fixed.
/// - Track whether a timed movement is in flight and whether a gesture is
///   currently driving the camera.
///
/// Pitch is recorded and clamped but does not take part in the world/view
/// mapping; perspective projection is left to the renderer.
#[derive(Clone, Debug)]
pub struct MapCamera {
    view_rect: Rect,
    density: f64,
    center: Point,
    zoom: f64,
    bearing: f64,
    pitch: f64,
    limits: CameraLimits,
    transition: Option<Transition>,
    gesture_in_progress: bool,
    world_to_view: Affine,
    view_to_world: Affine,
}

impl MapCamera {
    /// Creates a camera covering `view_rect`.
    ///
    /// - The world origin is shown at the view center.
    /// - Zoom is the smallest the default [`CameraLimits`] allow.
    /// - Bearing and pitch are zero; density is `1.0`.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let limits = CameraLimits::default();
        let mut camera = Self {
            view_rect,
            density: 1.0,
            center: Point::ZERO,
            zoom: limits.min_zoom,
            bearing: 0.0,
            pitch: 0.0,
            limits,
            transition: None,
            gesture_in_progress: false,
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
        };
        camera.rebuild_transforms();
        camera
    }

    /// Returns the view rectangle in screen pixels.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the view rectangle, keeping the world center.
    pub fn set_view_rect(&mut self, rect: Rect) {
        if self.view_rect == rect {
            return;
        }
        self.view_rect = rect;
        self.rebuild_transforms();
    }

    /// Center of the view rectangle in screen pixels.
    #[must_use]
    pub fn view_center(&self) -> Point {
        self.view_rect.center()
    }

    /// Screen pixels per density-independent unit.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Sets the screen density used by [`MapCamera::pan_by`].
    ///
    /// Non-positive or non-finite values are ignored.
    pub fn set_density(&mut self, density: f64) {
        if density.is_finite() && density > 0.0 {
            self.density = density;
        }
    }

    /// World point shown at the view center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Centers the view on a world point.
    pub fn set_center(&mut self, world_pt: Point) {
        self.center = world_pt;
        self.rebuild_transforms();
    }

    /// Current uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom factor about the view center, clamped to the limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = self.limits.clamp_zoom(zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
    }

    /// Current bearing in degrees, in `[0, 360)`.
    #[must_use]
    pub fn bearing(&self) -> f64 {
        self.bearing
    }

    /// Sets the bearing about the view center.
    pub fn set_bearing(&mut self, degrees: f64) {
        self.bearing = normalize_bearing(degrees);
        self.rebuild_transforms();
    }

    /// Current pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Sets the pitch, clamped to the limits.
    pub fn set_pitch(&mut self, degrees: f64) {
        self.pitch = self.limits.clamp_pitch(degrees);
    }

    /// Returns the zoom and pitch limits.
    #[must_use]
    pub fn limits(&self) -> CameraLimits {
        self.limits
    }

    /// Replaces the limits and clamps the current zoom and pitch into them.
    pub fn set_limits(&mut self, limits: CameraLimits) {
        self.limits = limits.normalized();
        self.zoom = self.limits.clamp_zoom(self.zoom);
        self.pitch = self.limits.clamp_pitch(self.pitch);
        self.rebuild_transforms();
    }

    /// Moves the content by a delta in view pixels.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.center = self.view_to_world * (self.view_center() - delta);
        self.rebuild_transforms();
    }

    /// Moves the content by an offset in density-independent units.
    ///
    /// A non-zero `duration_ms` is recorded as an in-flight [`Transition`]
    /// until [`MapCamera::cancel_transitions`] or
    /// [`MapCamera::finish_transition`]. The camera itself applies the whole
    /// offset immediately.
    pub fn pan_by(&mut self, offset: Vec2, duration_ms: u64) {
        let delta = offset * self.density;
        self.pan_by_view(delta);
        if duration_ms > 0 {
            self.transition = Some(Transition {
                offset: delta,
                duration_ms,
            });
        }
    }

    /// Zooms by `factor` keeping the world point under `anchor_view` fixed.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_zoom = self.limits.clamp_zoom(self.zoom * factor);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let old_world = self.view_to_world_point(anchor_view);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        self.pin(old_world, anchor_view);
    }

    /// Zooms one whole step in or out about `anchor_view`.
    pub fn zoom_step(&mut self, zoom_in: bool, anchor_view: Point) {
        self.zoom_about_view_point(anchor_view, if zoom_in { 2.0 } else { 0.5 });
    }

    /// Sets the bearing keeping the world point under `anchor_view` fixed.
    pub fn rotate_about_view_point(&mut self, anchor_view: Point, degrees: f64) {
        let old_world = self.view_to_world_point(anchor_view);
        self.bearing = normalize_bearing(degrees);
        self.rebuild_transforms();
        self.pin(old_world, anchor_view);
    }

    /// Abandons any in-flight movement.
    pub fn cancel_transitions(&mut self) {
        if self.transition.take().is_some() {
            log::debug!("camera transition canceled");
        }
    }

    /// Marks the in-flight movement as finished.
    pub fn finish_transition(&mut self) {
        self.transition = None;
    }

    /// The in-flight movement, if any.
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        self.transition
    }

    /// Records whether a gesture is driving the camera.
    pub fn set_gesture_in_progress(&mut self, in_progress: bool) {
        self.gesture_in_progress = in_progress;
    }

    /// Whether a gesture is driving the camera.
    #[must_use]
    pub fn is_gesture_in_progress(&self) -> bool {
        self.gesture_in_progress
    }

    /// World to view transform.
    #[must_use]
    pub fn world_to_view(&self) -> Affine {
        self.world_to_view
    }

    /// Converts a world point into view coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts a view point into world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Axis-aligned bounds of the world region currently visible.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world.transform_rect_bbox(self.view_rect)
    }

    /// Snapshot of the current camera state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> MapCameraDebugInfo {
        MapCameraDebugInfo {
            view_rect: self.view_rect,
            visible_world_rect: self.visible_world_rect(),
            center: self.center,
            zoom: self.zoom,
            bearing: self.bearing,
            pitch: self.pitch,
            limits: self.limits,
            transition: self.transition,
            gesture_in_progress: self.gesture_in_progress,
        }
    }

    /// Re-centers so that `world_pt` lands on `view_pt` again.
    fn pin(&mut self, world_pt: Point, view_pt: Point) {
        let drift = view_pt - self.world_to_view_point(world_pt);
        self.pan_by_view(drift);
    }

    fn rebuild_transforms(&mut self) {
        // World -> view: move the center to the origin, scale, rotate against
        // the bearing, then move the origin to the view center.
        self.world_to_view = Affine::translate(self.view_center().to_vec2())
            * Affine::rotate(-self.bearing.to_radians())
            * Affine::scale(self.zoom)
            * Affine::translate(-self.center.to_vec2());
        self.view_to_world = self.world_to_view.inverse();
    }
}

/// Wraps degrees into `[0, 360)`.
fn normalize_bearing(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Debug snapshot of a [`MapCamera`] state.
#[derive(Clone, Copy, Debug)]
pub struct MapCameraDebugInfo {
    /// View rectangle in screen pixels.
    pub view_rect: Rect,
    /// World region currently visible.
    pub visible_world_rect: Rect,
    /// World point at the view center.
    pub center: Point,
    /// Uniform zoom factor.
    pub zoom: f64,
    /// Bearing in degrees.
    pub bearing: f64,
    /// Pitch in degrees.
    pub pitch: f64,
    /// Zoom and pitch limits.
    pub limits: CameraLimits,
    /// In-flight movement.
    pub transition: Option<Transition>,
    /// Whether a gesture is driving the camera.
    pub gesture_in_progress: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{CameraLimits, MapCamera, normalize_bearing};

    fn camera() -> MapCamera {
        MapCamera::new(Rect::new(0.0, 0.0, 800.0, 600.0))
    }

    fn assert_near(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn world_view_roundtrip_with_bearing() {
        let mut cam = camera();
        cam.set_zoom(4.0);
        cam.set_bearing(33.0);
        let world = Point::new(10.0, -5.0);
        assert_near(cam.view_to_world_point(cam.world_to_view_point(world)), world);
        assert_near(cam.world_to_view_point(cam.center()), cam.view_center());
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut cam = camera();
        cam.set_bearing(45.0);
        let anchor = Point::new(100.0, 450.0);
        let before = cam.view_to_world_point(anchor);

        cam.zoom_about_view_point(anchor, 2.5);
        assert!((cam.zoom() - 2.5).abs() < 1e-12);
        assert_near(cam.view_to_world_point(anchor), before);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom_step(false, cam.view_center());
        assert_eq!(cam.zoom(), cam.limits().min_zoom);
        cam.set_zoom(1e12);
        assert_eq!(cam.zoom(), cam.limits().max_zoom);
    }

    #[test]
    fn rotate_about_anchor_keeps_anchor_fixed() {
        let mut cam = camera();
        cam.set_zoom(8.0);
        let anchor = Point::new(650.0, 120.0);
        let before = cam.view_to_world_point(anchor);

        cam.rotate_about_view_point(anchor, -90.0);
        assert_eq!(cam.bearing(), 270.0);
        assert_near(cam.view_to_world_point(anchor), before);
    }

    #[test]
    fn pan_moves_content_with_pointer() {
        let mut cam = camera();
        cam.set_density(2.0);
        let world = cam.view_to_world_point(Point::new(400.0, 300.0));

        cam.pan_by(Vec2::new(10.0, -5.0), 0);
        assert_near(cam.world_to_view_point(world), Point::new(420.0, 290.0));
        assert!(cam.transition().is_none());
    }

    #[test]
    fn timed_pan_is_cancelable() {
        let mut cam = camera();
        cam.pan_by(Vec2::new(100.0, 0.0), 1000);
        assert_eq!(cam.transition().map(|t| t.duration_ms), Some(1000));
        cam.cancel_transitions();
        assert!(cam.transition().is_none());
    }

    #[test]
    fn pitch_and_limits() {
        let mut cam = camera();
        cam.set_pitch(75.0);
        assert_eq!(cam.pitch(), 60.0);
        cam.set_limits(CameraLimits {
            min_pitch: 45.0,
            max_pitch: 10.0,
            ..CameraLimits::default()
        });
        assert_eq!(cam.pitch(), 45.0);

        let info = cam.debug_info();
        assert_eq!(info.limits.min_pitch, 10.0);
        assert!(!info.gesture_in_progress);
    }

    #[test]
    fn bearing_wraps() {
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert_eq!(normalize_bearing(-30.0), 330.0);
        assert_eq!(normalize_bearing(725.0), 5.0);
    }
}
