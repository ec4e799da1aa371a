// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Zoom and pitch ranges enforced by [`crate::MapCamera`].
///
/// Zoom is a uniform scale factor: `1.0` shows one world unit per pixel, and
/// each whole zoom step doubles or halves it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CameraLimits {
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// Smallest pitch in degrees.
    pub min_pitch: f64,
    /// Largest pitch in degrees.
    pub max_pitch: f64,
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: (1_u32 << 22).into(),
            min_pitch: 0.0,
            max_pitch: 60.0,
        }
    }
}

impl CameraLimits {
    /// Returns a copy with each range ordered so that `min <= max`.
    #[must_use]
    pub fn normalized(self) -> Self {
        let (min_zoom, max_zoom) = ordered(self.min_zoom, self.max_zoom);
        let (min_pitch, max_pitch) = ordered(self.min_pitch, self.max_pitch);
        Self {
            min_zoom,
            max_zoom,
            min_pitch,
            max_pitch,
        }
    }

    /// Clamps a zoom factor into range.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Clamps a pitch into range.
    #[must_use]
    pub fn clamp_pitch(&self, pitch: f64) -> f64 {
        pitch.clamp(self.min_pitch, self.max_pitch)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}
