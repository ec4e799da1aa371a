// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger vertical drag ("shove") detection.
//!
//! A shove needs two pointers side by side: the line between them must lie
//! within [`MAX_SHOVE_ANGLE_DEGREES`] of horizontal. The gesture begins on the
//! second pointer down if that holds, otherwise on the first move where it
//! does, and ends when any pointer lifts. Updates report the change of the
//! mean Y of the two pointers, positive downwards.

use kurbo::{Point, Vec2};

use crate::config::DetectorConfig;
use crate::listener::GestureListener;
use crate::pointer::{PointerAction, PointerEvent, Timestamp};

/// Largest angle from horizontal at which two pointers still count as a shove.
pub const MAX_SHOVE_ANGLE_DEGREES: f64 = 20.0;

/// One shove sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShoveSample {
    /// Time of the frame.
    pub time: Timestamp,
    /// Midpoint of the first two pointers.
    pub focus: Point,
    /// Vertical movement since the previous sample; `0.0` on begin and end.
    pub delta_pixels: f64,
}

/// Two-finger vertical drag detector.
#[derive(Clone, Debug)]
pub struct ShoveDetector {
    config: DetectorConfig,
    armed: bool,
    in_progress: bool,
    previous_mean_y: f64,
    focus: Point,
    time: Timestamp,
}

impl ShoveDetector {
    /// Creates an idle detector.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            armed: false,
            in_progress: false,
            previous_mean_y: 0.0,
            focus: Point::ZERO,
            time: 0,
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns `true` between an accepted begin and the matching end.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Feeds one pointer frame. Returns `true` if the listener consumed an update.
    pub fn on_event<L: GestureListener<ShoveSample> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        listener: &mut L,
    ) -> bool {
        match event.action {
            PointerAction::Down => {
                self.armed = false;
                false
            }
            PointerAction::PointerDown { .. } if !self.in_progress => {
                self.armed = true;
                self.try_begin(event, listener);
                false
            }
            PointerAction::Move if self.in_progress => {
                let Some((a, b)) = pair(event) else {
                    return false;
                };
                let mean_y = (a.y + b.y) * 0.5;
                let delta = mean_y - self.previous_mean_y;
                self.previous_mean_y = mean_y;
                self.focus = a.midpoint(b);
                self.time = event.time;
                listener.on_update(&self.sample(delta))
            }
            PointerAction::Move if self.armed => {
                self.try_begin(event, listener);
                false
            }
            PointerAction::PointerUp { .. } | PointerAction::Up | PointerAction::Cancel => {
                self.armed = false;
                if self.in_progress {
                    self.in_progress = false;
                    self.time = event.time;
                    listener.on_end(&self.sample(0.0));
                }
                false
            }
            _ => false,
        }
    }

    fn try_begin<L: GestureListener<ShoveSample> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        listener: &mut L,
    ) {
        let Some((a, b)) = pair(event) else {
            return;
        };
        if !is_side_by_side(a, b) {
            log::trace!("shove not armed: pointers not level");
            return;
        }
        self.previous_mean_y = (a.y + b.y) * 0.5;
        self.focus = a.midpoint(b);
        self.time = event.time;
        self.in_progress = listener.on_begin(&self.sample(0.0));
    }

    fn sample(&self, delta_pixels: f64) -> ShoveSample {
        ShoveSample {
            time: self.time,
            focus: self.focus,
            delta_pixels,
        }
    }
}

fn pair(event: &PointerEvent) -> Option<(Point, Point)> {
    Some((event.position(0)?, event.position(1)?))
}

/// Whether the line through `a` and `b` is within the shove angle of horizontal.
fn is_side_by_side(a: Point, b: Point) -> bool {
    let d = b - a;
    if d.x == 0.0 && d.y == 0.0 {
        return false;
    }
    let angle = Vec2::new(d.x.abs(), d.y.abs()).atan2().to_degrees();
    angle <= MAX_SHOVE_ANGLE_DEGREES
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        begins: u32,
        deltas: Vec<f64>,
        ends: u32,
    }

    impl GestureListener<ShoveSample> for Recorder {
        fn on_begin(&mut self, _: &ShoveSample) -> bool {
            self.begins += 1;
            true
        }
        fn on_update(&mut self, sample: &ShoveSample) -> bool {
            self.deltas.push(sample.delta_pixels);
            true
        }
        fn on_end(&mut self, _: &ShoveSample) {
            self.ends += 1;
        }
    }

    fn level(y: f64) -> [Point; 2] {
        [Point::new(100.0, y), Point::new(300.0, y)]
    }

    #[test]
    fn level_pointers_shove() {
        let mut d = ShoveDetector::new(DetectorConfig::default());
        let mut r = Recorder::default();
        d.on_event(&PointerEvent::down(0, level(400.0)[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &level(400.0), 1), &mut r);
        assert_eq!(r.begins, 1);

        d.on_event(&PointerEvent::moved(10, 0, &level(390.0)), &mut r);
        d.on_event(&PointerEvent::moved(20, 0, &level(375.0)), &mut r);
        assert_eq!(r.deltas, [-10.0, -15.0]);

        d.on_event(&PointerEvent::pointer_up(30, 0, &level(375.0), 1), &mut r);
        assert_eq!(r.ends, 1);
        assert!(!d.is_in_progress());
    }

    #[test]
    fn steep_pointers_wait_until_level() {
        let mut d = ShoveDetector::new(DetectorConfig::default());
        let mut r = Recorder::default();
        let steep = [Point::new(100.0, 100.0), Point::new(150.0, 300.0)];
        d.on_event(&PointerEvent::down(0, steep[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &steep, 1), &mut r);
        assert_eq!(r.begins, 0);

        d.on_event(&PointerEvent::moved(10, 0, &level(300.0)), &mut r);
        assert_eq!(r.begins, 1);
        assert!(d.is_in_progress());
    }

    #[test]
    fn angle_boundary() {
        let a = Point::new(0.0, 0.0);
        let at = |degrees: f64| a + Vec2::from_angle(degrees.to_radians()) * 100.0;
        assert!(is_side_by_side(a, at(19.0)));
        assert!(is_side_by_side(a, at(161.0)));
        assert!(is_side_by_side(a, at(-19.0)));
        assert!(!is_side_by_side(a, at(21.0)));
        assert!(!is_side_by_side(a, at(90.0)));
        assert!(!is_side_by_side(a, a));
    }

    #[test]
    fn cancel_ends_shove() {
        let mut d = ShoveDetector::new(DetectorConfig::default());
        let mut r = Recorder::default();
        d.on_event(&PointerEvent::down(0, level(400.0)[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &level(400.0), 1), &mut r);
        d.on_event(&PointerEvent::cancel(10, 0, &level(400.0)), &mut r);
        assert_eq!(r.ends, 1);
        d.on_event(&PointerEvent::moved(20, 0, &level(300.0)), &mut r);
        assert!(r.deltas.is_empty());
    }
}
