// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: scroll distances, total offsets and release velocity.
//!
//! ## Usage
//!
//! 1) Start tracking with [`DragState::start`] at the focus of the first down.
//! 2) On each move, call [`DragState::update`] to get the movement since the last
//!    consumed position, or [`DragState::total_offset`] to compare against a slop.
//! 3) When the pointer configuration changes, call [`DragState::refocus`] so the
//!    next delta is measured from the new focus.
//! 4) End with [`DragState::end`].
//!
//! [`VelocityTracker`] estimates the release velocity of a fling from the
//! trailing samples of the stream.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use meridian_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! // Scroll distance follows platform convention: last minus current.
//! assert_eq!(drag.scroll_distance(Point::new(15.0, 25.0)).unwrap().x, -5.0);
//!
//! let delta = drag.update(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(delta.x, 5.0);
//! assert_eq!(drag.total_offset(Point::new(15.0, 25.0)).unwrap().y, 5.0);
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::pointer::Timestamp;

/// Tracks the focus of a drag between move events.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Focus when tracking started or was last re-based.
    pub start_pos: Option<Point>,
    /// Last consumed focus.
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Start tracking from the given focus.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Re-base both the start and the last focus, keeping the drag alive.
    ///
    /// Used when a pointer joins or leaves so the focus jump is not reported
    /// as movement.
    pub fn refocus(&mut self, pos: Point) {
        if self.is_dragging() {
            self.start(pos);
        }
    }

    /// Consume a new focus, returning the movement since the last one.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        match self.last_pos.replace(pos) {
            Some(last) => Some(pos - last),
            None => None,
        }
    }

    /// Distance from `pos` back to the last consumed focus, without consuming it.
    pub fn scroll_distance(&self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        self.last_pos.map(|last| last - pos)
    }

    /// Offset of `current_pos` from the start focus.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Stop tracking.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while tracking.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

/// Samples older than this, relative to the newest one, are ignored.
const VELOCITY_HORIZON_MS: Timestamp = 100;

/// Estimates pointer velocity, in pixels per second, over a short trailing window.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[(Timestamp, Point); 16]>,
}

impl VelocityTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a position; samples outside the trailing window are dropped.
    pub fn add(&mut self, time: Timestamp, pos: Point) {
        if let Some(&(last, _)) = self.samples.last() {
            if time < last {
                // Out-of-order input restarts the estimate.
                self.samples.clear();
            }
        }
        self.samples.push((time, pos));
        let horizon = time.saturating_sub(VELOCITY_HORIZON_MS);
        self.samples.retain(|(t, _)| *t >= horizon);
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Velocity across the window, each axis clamped to `±max`.
    ///
    /// Returns zero with fewer than two samples or a zero-length window.
    pub fn velocity(&self, max: f64) -> Vec2 {
        let (Some(&(t0, p0)), Some(&(t1, p1))) = (self.samples.first(), self.samples.last()) else {
            return Vec2::ZERO;
        };
        if t1 <= t0 {
            return Vec2::ZERO;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "window is at most a few hundred milliseconds"
        )]
        let seconds = (t1 - t0) as f64 / 1000.0;
        let v = (p1 - p0) / seconds;
        Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_drag_state_is_not_dragging() {
        let drag = DragState::default();
        assert!(!drag.is_dragging());
        assert!(drag.last_pos.is_none());
    }

    #[test]
    fn update_returns_delta_when_dragging() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0));

        let new_pos = Point::new(15.0, 25.0);
        assert_eq!(drag.update(new_pos), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.last_pos, Some(new_pos));
    }

    #[test]
    fn update_returns_none_when_not_dragging() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(Point::new(15.0, 25.0)), None);
        assert!(drag.last_pos.is_none());
    }

    #[test]
    fn scroll_distance_does_not_consume() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));

        let pos = Point::new(3.0, -4.0);
        assert_eq!(drag.scroll_distance(pos), Some(Vec2::new(-3.0, 4.0)));
        assert_eq!(drag.scroll_distance(pos), Some(Vec2::new(-3.0, 4.0)));
        assert_eq!(drag.last_pos, Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn refocus_rebases_without_reporting_movement() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(5.0, 5.0));

        drag.refocus(Point::new(50.0, 50.0));
        assert_eq!(drag.total_offset(Point::new(50.0, 50.0)), Some(Vec2::ZERO));
        assert_eq!(drag.update(Point::new(52.0, 50.0)), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn refocus_is_ignored_when_idle() {
        let mut drag = DragState::default();
        drag.refocus(Point::new(1.0, 1.0));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn end_resets_drag_state() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0));
        drag.end();
        assert!(drag.start_pos.is_none());
        assert!(drag.last_pos.is_none());
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
    }

    #[test]
    fn velocity_over_window() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, Point::new(0.0, 0.0));
        tracker.add(50, Point::new(50.0, 0.0));
        tracker.add(100, Point::new(100.0, -20.0));

        let v = tracker.velocity(10_000.0);
        assert!((v.x - 1000.0).abs() < 1e-9, "x velocity was {}", v.x);
        assert!((v.y + 200.0).abs() < 1e-9, "y velocity was {}", v.y);
    }

    #[test]
    fn velocity_drops_stale_samples() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, Point::new(-500.0, 0.0));
        tracker.add(400, Point::new(0.0, 0.0));
        tracker.add(450, Point::new(10.0, 0.0));

        let v = tracker.velocity(10_000.0);
        assert!((v.x - 200.0).abs() < 1e-9, "x velocity was {}", v.x);
    }

    #[test]
    fn velocity_is_clamped_per_axis() {
        let mut tracker = VelocityTracker::new();
        tracker.add(0, Point::new(0.0, 0.0));
        tracker.add(10, Point::new(1000.0, 1.0));

        let v = tracker.velocity(500.0);
        assert_eq!(v.x, 500.0);
        assert_eq!(v.y, 100.0);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker::new();
        tracker.add(10, Point::new(3.0, 3.0));
        assert_eq!(tracker.velocity(100.0), Vec2::ZERO);
        tracker.clear();
        assert_eq!(tracker.velocity(100.0), Vec2::ZERO);
    }
}
