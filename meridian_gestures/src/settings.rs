// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::host::UiPolicy;

/// Plain-data gesture settings implementing [`UiPolicy`].
///
/// Hosts that keep these options in their own settings store can embed this
/// struct and delegate their [`UiPolicy`] implementation to it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiSettings {
    /// Pinch, double tap, two-finger tap, quick zoom and wheel zoom.
    pub zoom_gestures_enabled: bool,
    /// Two-finger vertical drag.
    pub tilt_gestures_enabled: bool,
    /// On-screen zoom buttons.
    pub zoom_controls_enabled: bool,
    /// Clear the overlay selection on a tap that hits nothing.
    pub deselect_markers_on_tap: bool,
    /// Anchor used for every zoom and rotation when no override is set.
    pub focal_point: Option<Point>,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            zoom_gestures_enabled: true,
            tilt_gestures_enabled: true,
            zoom_controls_enabled: false,
            deselect_markers_on_tap: true,
            focal_point: None,
        }
    }
}

impl UiPolicy for UiSettings {
    fn is_zoom_gestures_enabled(&self) -> bool {
        self.zoom_gestures_enabled
    }

    fn is_tilt_gestures_enabled(&self) -> bool {
        self.tilt_gestures_enabled
    }

    fn is_zoom_controls_enabled(&self) -> bool {
        self.zoom_controls_enabled
    }

    fn deselect_markers_on_tap(&self) -> bool {
        self.deselect_markers_on_tap
    }

    fn focal_point(&self) -> Option<Point> {
        self.focal_point
    }
}
