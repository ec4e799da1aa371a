// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use crate::host::LatLng;

/// Receives the map coordinate of a click or long click.
pub type MapClickCallback = Box<dyn FnMut(LatLng)>;

/// Notified when a fling or scroll moves the map.
pub type MovementCallback = Box<dyn FnMut()>;

/// Application callbacks, one replaceable slot each. An empty slot is skipped.
#[derive(Default)]
pub(crate) struct MapCallbacks {
    pub(crate) map_click: Option<MapClickCallback>,
    pub(crate) map_long_click: Option<MapClickCallback>,
    pub(crate) fling: Option<MovementCallback>,
    pub(crate) scroll: Option<MovementCallback>,
}

impl MapCallbacks {
    pub(crate) fn map_click(&mut self, at: LatLng) {
        if let Some(callback) = self.map_click.as_mut() {
            callback(at);
        }
    }

    pub(crate) fn map_long_click(&mut self, at: LatLng) {
        if let Some(callback) = self.map_long_click.as_mut() {
            callback(at);
        }
    }

    pub(crate) fn fling(&mut self) {
        if let Some(callback) = self.fling.as_mut() {
            callback();
        }
    }

    pub(crate) fn scroll(&mut self) {
        if let Some(callback) = self.scroll.as_mut() {
            callback();
        }
    }
}

impl fmt::Debug for MapCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapCallbacks")
            .field("map_click", &self.map_click.is_some())
            .field("map_long_click", &self.map_long_click.is_some())
            .field("fling", &self.fling.is_some())
            .field("scroll", &self.scroll.is_some())
            .finish()
    }
}
