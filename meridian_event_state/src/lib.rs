// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Meridian Event State: pointer input model and low-level touch gesture detectors.
//!
//! This crate turns a stream of multi-pointer frames into gesture samples. It
//! knows nothing about maps or cameras; the map-facing layer lives in
//! `meridian_gestures`. Each module handles one concern:
//!
//! - [`pointer`]: Pointer frames, buttons, wheel and hover input
//! - [`key`]: Directional key and trackball input
//! - [`config`]: Platform timing and slop thresholds shared by all detectors
//! - [`drag`]: Scroll distance and release velocity tracking
//! - [`tap`]: Tap, double tap, long press, scroll and fling recognition
//! - [`scale`]: Two-finger pinch and one-finger quick scale
//! - [`rotate`]: Two-finger rotation
//! - [`shove`]: Two-finger vertical drag
//!
//! ## Design Philosophy
//!
//! Detectors are plain structs fed one [`PointerEvent`](pointer::PointerEvent)
//! at a time. They call a listener synchronously and let its return values
//! decide whether a gesture starts, so the listener owns every policy decision:
//!
//! - **Synchronous**: No threads, no callbacks stored across events
//! - **Deterministic**: Deferred callbacks are deadlines checked against event
//!   time, never wall-clock timers
//! - **Composable**: Several detectors may observe the same stream
//!
//! ## Usage
//!
//! ```rust
//! use kurbo::Point;
//! use meridian_event_state::config::DetectorConfig;
//! use meridian_event_state::listener::GestureListener;
//! use meridian_event_state::pointer::PointerEvent;
//! use meridian_event_state::rotate::{RotateDetector, RotateSample};
//!
//! #[derive(Default)]
//! struct Total(f64);
//!
//! impl GestureListener<RotateSample> for Total {
//!     fn on_begin(&mut self, _: &RotateSample) -> bool {
//!         true
//!     }
//!     fn on_update(&mut self, sample: &RotateSample) -> bool {
//!         self.0 += sample.delta_degrees;
//!         true
//!     }
//!     fn on_end(&mut self, _: &RotateSample) {}
//! }
//!
//! let mut detector = RotateDetector::new(DetectorConfig::default());
//! let mut total = Total::default();
//! let a = Point::new(0.0, 0.0);
//! detector.on_event(&PointerEvent::down(0, a), &mut total);
//! detector.on_event(&PointerEvent::pointer_down(10, 0, &[a, Point::new(100.0, 0.0)], 1), &mut total);
//! detector.on_event(&PointerEvent::moved(20, 0, &[a, Point::new(0.0, -100.0)]), &mut total);
//! assert!((total.0 - 90.0).abs() < 1e-9);
//! ```
//!
//! ## Features
//!
//! - `std` (default): Build Kurbo against the standard library
//! - `libm`: Build Kurbo with `libm` float functions for `no_std` targets
//! - `serde`: Serialize and deserialize [`DetectorConfig`](config::DetectorConfig)
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod config;
pub mod drag;
pub mod key;
pub mod listener;
pub mod pointer;
pub mod rotate;
pub mod scale;
pub mod shove;
pub mod tap;
