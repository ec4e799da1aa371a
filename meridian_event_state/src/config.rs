// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform input timing and distance thresholds.
//!
//! Distances are expressed in density-independent units and scaled by
//! [`DetectorConfig::density`] when compared against screen pixels.

use core::fmt;

/// Timing and slop values shared by every detector.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectorConfig {
    /// Longest press, in milliseconds, that still counts as a tap.
    pub tap_timeout_ms: u64,
    /// Window after a tap in which a second down counts as a double tap.
    pub double_tap_timeout_ms: u64,
    /// Minimum gap between first up and second down of a double tap.
    pub double_tap_min_time_ms: u64,
    /// Hold time after the tap timeout before a long press fires.
    pub long_press_timeout_ms: u64,
    /// Distance a pointer may wander before a press becomes a scroll.
    pub touch_slop: f64,
    /// Maximum distance between the two downs of a double tap.
    pub double_tap_slop: f64,
    /// Minimum two-finger span for a pinch to begin.
    pub min_span: f64,
    /// Span change needed before a pinch begins.
    pub span_slop: f64,
    /// Minimum release velocity for a fling, per second.
    pub min_fling_velocity: f64,
    /// Fling velocities are clamped to this magnitude, per second.
    pub max_fling_velocity: f64,
    /// Screen pixels per density-independent unit.
    pub density: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tap_timeout_ms: 100,
            double_tap_timeout_ms: 300,
            double_tap_min_time_ms: 40,
            long_press_timeout_ms: 500,
            touch_slop: 8.0,
            double_tap_slop: 100.0,
            min_span: 27.0,
            span_slop: 16.0,
            min_fling_velocity: 50.0,
            max_fling_velocity: 8000.0,
            density: 1.0,
        }
    }
}

impl DetectorConfig {
    /// Sets the screen density.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the tap timeout.
    #[must_use]
    pub fn with_tap_timeout_ms(mut self, ms: u64) -> Self {
        self.tap_timeout_ms = ms;
        self
    }

    /// Sets the double-tap window.
    #[must_use]
    pub fn with_double_tap_timeout_ms(mut self, ms: u64) -> Self {
        self.double_tap_timeout_ms = ms;
        self
    }

    /// Sets the long-press hold time.
    #[must_use]
    pub fn with_long_press_timeout_ms(mut self, ms: u64) -> Self {
        self.long_press_timeout_ms = ms;
        self
    }

    /// Sets the touch slop.
    #[must_use]
    pub fn with_touch_slop(mut self, slop: f64) -> Self {
        self.touch_slop = slop;
        self
    }

    /// Touch slop in screen pixels.
    #[must_use]
    pub fn touch_slop_px(&self) -> f64 {
        self.touch_slop * self.density
    }

    /// Double-tap slop in screen pixels.
    #[must_use]
    pub fn double_tap_slop_px(&self) -> f64 {
        self.double_tap_slop * self.density
    }

    /// Minimum pinch span in screen pixels.
    #[must_use]
    pub fn min_span_px(&self) -> f64 {
        self.min_span * self.density
    }

    /// Span slop in screen pixels.
    #[must_use]
    pub fn span_slop_px(&self) -> f64 {
        self.span_slop * self.density
    }

    /// Minimum fling velocity in screen pixels per second.
    #[must_use]
    pub fn min_fling_velocity_px(&self) -> f64 {
        self.min_fling_velocity * self.density
    }

    /// Maximum fling velocity in screen pixels per second.
    #[must_use]
    pub fn max_fling_velocity_px(&self) -> f64 {
        self.max_fling_velocity * self.density
    }

    /// Checks the relationships the detectors rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        if self.double_tap_min_time_ms > self.double_tap_timeout_ms {
            return Err(ConfigError::DoubleTapWindow {
                min_ms: self.double_tap_min_time_ms,
                max_ms: self.double_tap_timeout_ms,
            });
        }
        for (name, value) in [
            ("touch_slop", self.touch_slop),
            ("double_tap_slop", self.double_tap_slop),
            ("min_span", self.min_span),
            ("span_slop", self.span_slop),
            ("min_fling_velocity", self.min_fling_velocity),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.max_fling_velocity < self.min_fling_velocity {
            return Err(ConfigError::FlingRange {
                min: self.min_fling_velocity,
                max: self.max_fling_velocity,
            });
        }
        Ok(())
    }
}

/// Rejected [`DetectorConfig`] values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Density must be finite and positive.
    InvalidDensity(f64),
    /// `double_tap_min_time_ms` exceeds `double_tap_timeout_ms`.
    DoubleTapWindow {
        /// Configured minimum gap.
        min_ms: u64,
        /// Configured window.
        max_ms: u64,
    },
    /// A distance or velocity threshold is negative or NaN.
    Negative {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Maximum fling velocity is below the minimum.
    FlingRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDensity(d) => write!(f, "screen density must be positive, got {d}"),
            Self::DoubleTapWindow { min_ms, max_ms } => write!(
                f,
                "double-tap minimum gap {min_ms} ms exceeds the {max_ms} ms window"
            ),
            Self::Negative { name, value } => {
                write!(f, "`{name}` must be non-negative, got {value}")
            }
            Self::FlingRange { min, max } => {
                write!(f, "maximum fling velocity {max} is below minimum {min}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
