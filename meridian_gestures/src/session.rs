// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Arbitration flags shared by the recognizers for one touch interaction.
///
/// A session spans from the first pointer down to the last pointer up (or a
/// cancel), after which the dispatcher resets it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSession {
    /// Exactly two pointers went down while zoom gestures were enabled.
    pub two_tap_candidate: bool,
    /// The scale recognizer left its deadband.
    pub zoom_active: bool,
    /// The shove recognizer activated; pan and rotate yield to it.
    pub tilt_active: bool,
    /// The active zoom is a double-tap drag rather than a pinch.
    pub quick_zoom: bool,
    /// A scroll was reported; a drag end is due on release.
    pub pan_in_progress: bool,
    /// The rotate recognizer left its deadband.
    pub rotate_active: bool,
    /// Centroid of the most recent frame with two or more pointers.
    pub two_pointer_centroid: Option<Point>,
}

impl GestureSession {
    /// Returns `true` once any two-finger recognizer has moved the camera.
    #[must_use]
    pub fn any_recognizer_active(&self) -> bool {
        self.zoom_active || self.rotate_active || self.tilt_active
    }

    /// Clears every flag.
    pub fn reset(&mut self) {
        if *self != Self::default() {
            log::debug!("gesture session reset");
        }
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_every_flag() {
        let mut session = GestureSession {
            two_tap_candidate: true,
            zoom_active: true,
            tilt_active: true,
            quick_zoom: true,
            pan_in_progress: true,
            rotate_active: true,
            two_pointer_centroid: Some(Point::new(1.0, 2.0)),
        };
        assert!(session.any_recognizer_active(), "flags set above");
        session.reset();
        assert_eq!(session, GestureSession::default(), "reset restores defaults");
        assert!(!session.any_recognizer_active(), "no recognizer after reset");
    }
}
