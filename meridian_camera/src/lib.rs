// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Meridian Camera: a headless reference camera for map views.
//!
//! This crate provides a small model of a map camera looking at a world plane
//! through a screen rectangle. It focuses on:
//! - Camera state: world center, uniform zoom, bearing and pitch.
//! - Coordinate conversion between world and view (pixel) space.
//! - Anchored zoom and rotation that keep the world point under a screen
//!   point fixed.
//! - Bookkeeping the gesture layer relies on: an in-flight transition that
//!   can be canceled and a "gesture in progress" flag.
//!
//! It does **not** render, ease animations or project geographic
//! coordinates. Hosts with their own map engine implement
//! `meridian_gestures::Transform` for it directly; hosts without one, and the
//! gesture tests, can drive a [`MapCamera`] through the `camera_adapter`
//! feature of `meridian_gestures`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use meridian_camera::MapCamera;
//!
//! let mut camera = MapCamera::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//!
//! // Zoom in about a corner; the world point under it stays put.
//! let anchor = Point::new(100.0, 100.0);
//! let before = camera.view_to_world_point(anchor);
//! camera.zoom_step(true, anchor);
//! let after = camera.view_to_world_point(anchor);
//! assert!((before - after).hypot() < 1e-9);
//! assert_eq!(camera.zoom(), 2.0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod camera;
mod limits;

pub use camera::{MapCamera, MapCameraDebugInfo, Transition};
pub use limits::CameraLimits;
