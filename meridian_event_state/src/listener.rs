// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener capability shared by the continuous two-finger detectors.

/// Receives begin/update/end samples from a continuous gesture detector.
///
/// The detector only enters its in-progress state when [`on_begin`] returns
/// `true`; a listener that declines the begin sees no updates and no end for
/// that gesture instance.
///
/// [`on_begin`]: GestureListener::on_begin
pub trait GestureListener<S> {
    /// A gesture is starting. Return `false` to ignore it.
    fn on_begin(&mut self, sample: &S) -> bool;

    /// The gesture moved. Returns whether the sample was consumed.
    fn on_update(&mut self, sample: &S) -> bool;

    /// The gesture ended or was canceled.
    fn on_end(&mut self, sample: &S);
}
