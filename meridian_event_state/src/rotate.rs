// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger rotation detection.
//!
//! A rotation begins when a second pointer goes down and ends when any
//! pointer lifts. Each update reports the change, in degrees, of the angle of
//! the line from the first pointer to the second. The delta is positive when
//! that line turns counter-clockwise on screen and is always normalized to
//! `(-180, 180]`, so crossing the `atan2` branch cut never produces a
//! full-turn jump.

use kurbo::Point;

use crate::config::DetectorConfig;
use crate::listener::GestureListener;
use crate::pointer::{PointerAction, PointerEvent, Timestamp};

/// One rotation sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateSample {
    /// Time of the frame.
    pub time: Timestamp,
    /// Midpoint of the first two pointers.
    pub focus: Point,
    /// Rotation since the previous sample; `0.0` on begin and end.
    pub delta_degrees: f64,
}

/// Two-finger rotation detector.
#[derive(Clone, Debug)]
pub struct RotateDetector {
    config: DetectorConfig,
    in_progress: bool,
    previous_angle: f64,
    focus: Point,
    time: Timestamp,
}

impl RotateDetector {
    /// Creates an idle detector.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            in_progress: false,
            previous_angle: 0.0,
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
    pub fn on_event<L: GestureListener<RotateSample> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        listener: &mut L,
    ) -> bool {
        match event.action {
            PointerAction::PointerDown { .. } if !self.in_progress => {
                let Some((angle, focus)) = measure(event) else {
                    return false;
                };
                self.previous_angle = angle;
                self.focus = focus;
                self.time = event.time;
                self.in_progress = listener.on_begin(&self.sample(0.0));
                false
            }
            PointerAction::Move if self.in_progress => {
                let Some((angle, focus)) = measure(event) else {
                    return false;
                };
                let delta = normalize_degrees((self.previous_angle - angle).to_degrees());
                self.previous_angle = angle;
                self.focus = focus;
                self.time = event.time;
                listener.on_update(&self.sample(delta))
            }
            PointerAction::PointerUp { .. } | PointerAction::Up | PointerAction::Cancel
                if self.in_progress =>
            {
                self.in_progress = false;
                self.time = event.time;
                listener.on_end(&self.sample(0.0));
                false
            }
            _ => false,
        }
    }

    fn sample(&self, delta_degrees: f64) -> RotateSample {
        RotateSample {
            time: self.time,
            focus: self.focus,
            delta_degrees,
        }
    }
}

/// Angle in radians of the first-to-second pointer line, and its midpoint.
fn measure(event: &PointerEvent) -> Option<(f64, Point)> {
    let a = event.position(0)?;
    let b = event.position(1)?;
    Some(((b - a).atan2(), a.midpoint(b)))
}

/// Wraps an angle in degrees into `(-180, 180]`.
fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    if wrapped > 180.0 {
        wrapped - 360.0
    } else if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
