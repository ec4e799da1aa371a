// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event model: one frame of multi-pointer input.
//!
//! A [`PointerEvent`] describes the whole contact set at one instant, the way
//! touch platforms deliver it: the action that produced the frame, the time of
//! the frame, the time of the first pointer down of the stream, the buttons
//! held and the position of every pointer currently in contact.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use meridian_event_state::pointer::{PointerAction, PointerEvent};
//!
//! let down = PointerEvent::down(0, Point::new(10.0, 10.0));
//! let second = PointerEvent::pointer_down(
//!     20,
//!     0,
//!     &[Point::new(10.0, 10.0), Point::new(30.0, 10.0)],
//!     1,
//! );
//! assert_eq!(second.pointer_count(), 2);
//! assert_eq!(second.centroid(), Point::new(20.0, 10.0));
//! assert!(matches!(down.action, PointerAction::Down));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// Milliseconds on the input clock.
pub type Timestamp = u64;

bitflags::bitflags! {
    /// Buttons held while a pointer event was produced.
    ///
    /// Touch contacts carry an empty set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary (usually left) mouse button.
        const PRIMARY          = 0b0000_0001;
        /// Secondary (usually right) mouse button.
        const SECONDARY        = 0b0000_0010;
        /// Tertiary (usually middle) mouse button.
        const TERTIARY         = 0b0000_0100;
        /// Back navigation button.
        const BACK             = 0b0000_1000;
        /// Forward navigation button.
        const FORWARD          = 0b0001_0000;
        /// Primary stylus barrel button.
        const STYLUS_PRIMARY   = 0b0010_0000;
        /// Secondary stylus barrel button.
        const STYLUS_SECONDARY = 0b0100_0000;
    }
}

impl PointerButtons {
    /// Returns `true` for touch contacts and for a lone primary button.
    #[must_use]
    pub fn is_primary_only(self) -> bool {
        self.is_empty() || self == Self::PRIMARY
    }
}

/// What produced a [`PointerEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The first pointer of a stream went down.
    Down,
    /// An additional pointer went down; `index` is its slot in [`PointerEvent::pointers`].
    PointerDown {
        /// Index of the new pointer.
        index: usize,
    },
    /// One or more pointers moved.
    Move,
    /// A non-final pointer went up; it is still listed at `index`.
    PointerUp {
        /// Index of the lifting pointer.
        index: usize,
    },
    /// The last pointer went up.
    Up,
    /// The stream was aborted by the platform.
    Cancel,
}

/// A single pointer in contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    /// Stable id for the lifetime of the contact.
    pub id: u32,
    /// Position in screen pixels.
    pub position: Point,
}

/// One frame of pointer input.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// What produced this frame.
    pub action: PointerAction,
    /// Time of this frame.
    pub time: Timestamp,
    /// Time of the [`PointerAction::Down`] that started the stream.
    pub down_time: Timestamp,
    /// Buttons held.
    pub buttons: PointerButtons,
    /// Every pointer in contact, including a lifting one on [`PointerAction::PointerUp`].
    pub pointers: SmallVec<[Pointer; 2]>,
}

impl PointerEvent {
    /// Builds an event from positions; pointer ids follow slot order.
    #[must_use]
    pub fn new(
        action: PointerAction,
        time: Timestamp,
        down_time: Timestamp,
        positions: &[Point],
    ) -> Self {
        let pointers = positions
            .iter()
            .zip(0_u32..)
            .map(|(&position, id)| Pointer { id, position })
            .collect();
        Self {
            action,
            time,
            down_time,
            buttons: PointerButtons::empty(),
            pointers,
        }
    }

    /// First pointer down.
    #[must_use]
    pub fn down(time: Timestamp, position: Point) -> Self {
        Self::new(PointerAction::Down, time, time, &[position])
    }

    /// Additional pointer down at slot `index`.
    #[must_use]
    pub fn pointer_down(
        time: Timestamp,
        down_time: Timestamp,
        positions: &[Point],
        index: usize,
    ) -> Self {
        Self::new(PointerAction::PointerDown { index }, time, down_time, positions)
    }

    /// Movement of the current contact set.
    #[must_use]
    pub fn moved(time: Timestamp, down_time: Timestamp, positions: &[Point]) -> Self {
        Self::new(PointerAction::Move, time, down_time, positions)
    }

    /// Non-final pointer up at slot `index`.
    #[must_use]
    pub fn pointer_up(
        time: Timestamp,
        down_time: Timestamp,
        positions: &[Point],
        index: usize,
    ) -> Self {
        Self::new(PointerAction::PointerUp { index }, time, down_time, positions)
    }

    /// Last pointer up.
    #[must_use]
    pub fn up(time: Timestamp, down_time: Timestamp, position: Point) -> Self {
        Self::new(PointerAction::Up, time, down_time, &[position])
    }

    /// Stream canceled by the platform.
    #[must_use]
    pub fn cancel(time: Timestamp, down_time: Timestamp, positions: &[Point]) -> Self {
        Self::new(PointerAction::Cancel, time, down_time, positions)
    }

    /// Replaces the button state.
    #[must_use]
    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Number of pointers listed in this frame.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Position of the pointer at `index`, if present.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Point> {
        self.pointers.get(index).map(|p| p.position)
    }

    /// Position of the first pointer, or the origin for an empty frame.
    #[must_use]
    pub fn primary_position(&self) -> Point {
        self.position(0).unwrap_or(Point::ZERO)
    }

    /// Mean position of every listed pointer.
    #[must_use]
    pub fn centroid(&self) -> Point {
        mean(self.pointers.iter().map(|p| p.position))
    }

    /// Mean position of the pointers that remain in contact after this frame.
    ///
    /// Identical to [`PointerEvent::centroid`] except on
    /// [`PointerAction::PointerUp`], where the lifting pointer is excluded.
    #[must_use]
    pub fn focus(&self) -> Point {
        let skip = self.lifting_index();
        mean(
            self.pointers
                .iter()
                .enumerate()
                .filter(|(i, _)| Some(*i) != skip)
                .map(|(_, p)| p.position),
        )
    }

    /// Index of the pointer leaving contact on [`PointerAction::PointerUp`].
    #[must_use]
    pub fn lifting_index(&self) -> Option<usize> {
        match self.action {
            PointerAction::PointerUp { index } => Some(index),
            _ => None,
        }
    }

    /// Pointers that remain in contact after this frame.
    pub fn remaining(&self) -> impl Iterator<Item = &Pointer> + '_ {
        let skip = self.lifting_index();
        self.pointers
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != skip)
            .map(|(_, p)| p)
    }

    /// Returns `true` for [`PointerAction::Up`] and [`PointerAction::Cancel`].
    #[must_use]
    pub fn ends_stream(&self) -> bool {
        matches!(self.action, PointerAction::Up | PointerAction::Cancel)
    }

    /// Returns `true` when the set of pointers in contact changes.
    #[must_use]
    pub fn changes_configuration(&self) -> bool {
        matches!(
            self.action,
            PointerAction::Down | PointerAction::PointerDown { .. } | PointerAction::PointerUp { .. }
        )
    }
}

fn mean(points: impl Iterator<Item = Point>) -> Point {
    let mut sum = Vec2::ZERO;
    let mut count = 0_u32;
    for p in points {
        sum += p.to_vec2();
        count += 1;
    }
    if count == 0 {
        return Point::ZERO;
    }
    (sum / f64::from(count)).to_point()
}

/// Mouse wheel input; one notch is `1.0`, positive away from the user.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Cursor position in screen pixels.
    pub position: Point,
    /// Vertical wheel travel in notches.
    pub vertical: f64,
}

/// Hover transitions of a non-contact pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverEvent {
    /// The pointer entered the view.
    Enter,
    /// The pointer moved over the view.
    Move,
    /// The pointer left the view.
    Exit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_only_accepts_touch_and_left_button() {
        assert!(PointerButtons::empty().is_primary_only());
        assert!(PointerButtons::PRIMARY.is_primary_only());
        assert!(!PointerButtons::SECONDARY.is_primary_only());
        assert!(!(PointerButtons::PRIMARY | PointerButtons::SECONDARY).is_primary_only());
    }

    #[test]
    fn focus_skips_lifting_pointer() {
        let e = PointerEvent::pointer_up(
            50,
            0,
            &[Point::new(0.0, 0.0), Point::new(100.0, 40.0)],
            1,
        );
        assert_eq!(e.centroid(), Point::new(50.0, 20.0));
        assert_eq!(e.focus(), Point::new(0.0, 0.0));
        assert_eq!(e.remaining().count(), 1);
    }

    #[test]
    fn empty_frame_centroid_is_origin() {
        let e = PointerEvent::cancel(10, 0, &[]);
        assert_eq!(e.centroid(), Point::ZERO);
        assert_eq!(e.primary_position(), Point::ZERO);
        assert!(e.ends_stream());
    }

    #[test]
    fn constructors_assign_sequential_ids() {
        let e = PointerEvent::moved(
            5,
            0,
            &[Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)],
        );
        let ids: SmallVec<[u32; 3]> = e.pointers.iter().map(|p| p.id).collect();
        assert_eq!(ids.as_slice(), &[0, 1, 2]);
        assert!(!e.changes_configuration());
    }
}
