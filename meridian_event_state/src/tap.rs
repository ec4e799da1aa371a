// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap, double tap, long press, scroll and fling recognition.
//!
//! [`TapDetector`] follows the platform gesture detector found on touch
//! operating systems. A press that stays inside the touch slop and is
//! released is a tap; a second press within the double-tap window and slop is
//! a double tap; a press held past the long-press delay is a long press; a
//! press that leaves the slop scrolls and, if released fast enough, flings.
//!
//! Two callbacks are deferred: the single-tap confirmation (which must wait
//! for the double-tap window to close) and the long press. Both are stored as
//! deadlines on the input clock. The detector fires a deadline before
//! processing any event stamped later than it, and [`TapDetector::poll`] fires
//! every deadline at or before `now` for hosts that wake up on a timer.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use meridian_event_state::config::DetectorConfig;
//! use meridian_event_state::pointer::PointerEvent;
//! use meridian_event_state::tap::{TapDetector, TapListener};
//!
//! #[derive(Default)]
//! struct Clicks(u32);
//!
//! impl TapListener for Clicks {
//!     fn on_single_tap_confirmed(&mut self, _: Point) -> bool {
//!         self.0 += 1;
//!         true
//!     }
//! }
//!
//! let mut detector = TapDetector::new(DetectorConfig::default());
//! let mut clicks = Clicks::default();
//! let p = Point::new(40.0, 40.0);
//! detector.on_event(&PointerEvent::down(0, p), &mut clicks);
//! detector.on_event(&PointerEvent::up(50, 0, p), &mut clicks);
//! assert_eq!(clicks.0, 0);
//!
//! // The double-tap window closes 300 ms after the down.
//! assert_eq!(detector.next_deadline(), Some(300));
//! detector.poll(300, &mut clicks);
//! assert_eq!(clicks.0, 1);
//! ```

use kurbo::{Point, Vec2};

use crate::config::DetectorConfig;
use crate::drag::{DragState, VelocityTracker};
use crate::pointer::{PointerAction, PointerEvent, Timestamp};

/// Which part of the second press of a double tap is being reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoubleTapPhase {
    /// The second press went down.
    Down,
    /// The second press moved.
    Move,
    /// The second press was released.
    Up,
}

/// Callbacks of a [`TapDetector`]. Every method defaults to a no-op.
///
/// Methods returning `bool` report whether the listener consumed the input;
/// the detector folds those into the result of [`TapDetector::on_event`].
pub trait TapListener {
    /// A press started. Return `true` to keep receiving the gesture.
    fn on_down(&mut self, _position: Point) -> bool {
        false
    }

    /// A press was released inside the touch slop.
    fn on_single_tap_up(&mut self, _position: Point) -> bool {
        false
    }

    /// A tap was not followed by a second one within the double-tap window.
    fn on_single_tap_confirmed(&mut self, _position: Point) -> bool {
        false
    }

    /// The second press of a double tap went down.
    fn on_double_tap(&mut self, _position: Point) -> bool {
        false
    }

    /// Events of the second press of a double tap, including its release.
    fn on_double_tap_event(&mut self, _phase: DoubleTapPhase, _position: Point) -> bool {
        false
    }

    /// A press was held past the long-press delay.
    fn on_long_press(&mut self, _position: Point) {}

    /// The focus moved. `distance` is last focus minus current focus.
    fn on_scroll(&mut self, _distance: Vec2) -> bool {
        false
    }

    /// A scroll ended with `velocity` (pixels per second); `origin` is where it
    /// went down.
    fn on_fling(&mut self, _velocity: Vec2, _origin: Point) -> bool {
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Contact {
    time: Timestamp,
    position: Point,
}

/// Single-pointer tap and scroll recognizer. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct TapDetector {
    config: DetectorConfig,
    long_press_enabled: bool,
    current_down: Option<Contact>,
    previous_up: Option<Contact>,
    still_down: bool,
    in_long_press: bool,
    always_in_tap_region: bool,
    always_in_bigger_tap_region: bool,
    is_double_tapping: bool,
    defer_confirm_single_tap: bool,
    tap_deadline: Option<Timestamp>,
    long_press_deadline: Option<Timestamp>,
    focus: DragState,
    velocity: VelocityTracker,
}

impl TapDetector {
    /// Creates an idle detector with long press enabled.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            long_press_enabled: true,
            current_down: None,
            previous_up: None,
            still_down: false,
            in_long_press: false,
            always_in_tap_region: false,
            always_in_bigger_tap_region: false,
            is_double_tapping: false,
            defer_confirm_single_tap: false,
            tap_deadline: None,
            long_press_deadline: None,
            focus: DragState::default(),
            velocity: VelocityTracker::new(),
        }
    }

    /// Thresholds in use.
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Enables or disables long-press detection.
    ///
    /// With long press disabled, holding a press and moving scrolls as usual.
    pub fn set_long_press_enabled(&mut self, enabled: bool) {
        self.long_press_enabled = enabled;
        if !enabled {
            self.long_press_deadline = None;
        }
    }

    /// Whether long-press detection is enabled.
    #[must_use]
    pub fn is_long_press_enabled(&self) -> bool {
        self.long_press_enabled
    }

    /// Returns `true` between the second down and the release of a double tap.
    #[must_use]
    pub fn is_double_tapping(&self) -> bool {
        self.is_double_tapping
    }

    /// Returns `true` while a long press is being held.
    #[must_use]
    pub fn is_in_long_press(&self) -> bool {
        self.in_long_press
    }

    /// Earliest pending deferred callback, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        match (self.tap_deadline, self.long_press_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fires every deferred callback due at or before `now`.
    pub fn poll<L: TapListener + ?Sized>(&mut self, now: Timestamp, listener: &mut L) {
        self.fire_due(now, true, listener);
    }

    /// Feeds one pointer frame. Returns whether the listener consumed it.
    pub fn on_event<L: TapListener + ?Sized>(
        &mut self,
        event: &PointerEvent,
        listener: &mut L,
    ) -> bool {
        self.fire_due(event.time, false, listener);

        let focus = event.focus();
        if event.changes_configuration() {
            self.velocity.clear();
        }
        self.velocity.add(event.time, focus);

        match event.action {
            PointerAction::Down => self.on_down(event, focus, listener),
            PointerAction::PointerDown { .. } => {
                self.focus.refocus(focus);
                self.cancel_taps();
                false
            }
            PointerAction::PointerUp { .. } => {
                self.focus.refocus(focus);
                false
            }
            PointerAction::Move => self.on_move(event, focus, listener),
            PointerAction::Up => self.on_up(event, listener),
            PointerAction::Cancel => {
                self.cancel();
                false
            }
        }
    }

    /// Drops all state and pending callbacks, as if the stream was canceled.
    pub fn cancel(&mut self) {
        self.tap_deadline = None;
        self.long_press_deadline = None;
        self.velocity.clear();
        self.focus.end();
        self.is_double_tapping = false;
        self.still_down = false;
        self.always_in_tap_region = false;
        self.always_in_bigger_tap_region = false;
        self.defer_confirm_single_tap = false;
        self.in_long_press = false;
    }

    fn cancel_taps(&mut self) {
        self.tap_deadline = None;
        self.long_press_deadline = None;
        self.is_double_tapping = false;
        self.always_in_tap_region = false;
        self.always_in_bigger_tap_region = false;
        self.defer_confirm_single_tap = false;
        self.in_long_press = false;
    }

    fn on_down<L: TapListener + ?Sized>(
        &mut self,
        event: &PointerEvent,
        focus: Point,
        listener: &mut L,
    ) -> bool {
        let position = event.primary_position();
        let mut handled = false;

        let had_tap_pending = self.tap_deadline.take().is_some();
        if had_tap_pending && self.is_considered_double_tap(position, event.time) {
            log::trace!("double tap at {position:?}");
            self.is_double_tapping = true;
            handled |= listener.on_double_tap(position);
            handled |= listener.on_double_tap_event(DoubleTapPhase::Down, position);
        } else {
            self.tap_deadline = Some(event.time + self.config.double_tap_timeout_ms);
        }

        self.focus.start(focus);
        self.current_down = Some(Contact {
            time: event.time,
            position,
        });
        self.always_in_tap_region = true;
        self.always_in_bigger_tap_region = true;
        self.still_down = true;
        self.in_long_press = false;
        self.defer_confirm_single_tap = false;
        if self.long_press_enabled {
            self.long_press_deadline = Some(
                event.down_time + self.config.tap_timeout_ms + self.config.long_press_timeout_ms,
            );
        }

        handled |= listener.on_down(position);
        handled
    }

    fn on_move<L: TapListener + ?Sized>(
        &mut self,
        event: &PointerEvent,
        focus: Point,
        listener: &mut L,
    ) -> bool {
        if self.in_long_press {
            return false;
        }
        let Some(distance) = self.focus.scroll_distance(focus) else {
            return false;
        };

        if self.is_double_tapping {
            return listener.on_double_tap_event(DoubleTapPhase::Move, event.primary_position());
        }

        if self.always_in_tap_region {
            let travelled = self.focus.total_offset(focus).unwrap_or(Vec2::ZERO).hypot2();
            let slop = self.config.touch_slop_px();
            let mut handled = false;
            if travelled > slop * slop {
                handled = listener.on_scroll(distance);
                self.focus.update(focus);
                self.always_in_tap_region = false;
                self.always_in_bigger_tap_region = false;
                self.tap_deadline = None;
                self.long_press_deadline = None;
            }
            return handled;
        }

        if distance.x.abs() >= 1.0 || distance.y.abs() >= 1.0 {
            let handled = listener.on_scroll(distance);
            self.focus.update(focus);
            return handled;
        }
        false
    }

    fn on_up<L: TapListener + ?Sized>(&mut self, event: &PointerEvent, listener: &mut L) -> bool {
        let position = event.primary_position();
        self.still_down = false;
        let mut handled = false;

        if self.is_double_tapping {
            handled |= listener.on_double_tap_event(DoubleTapPhase::Up, position);
        } else if self.in_long_press {
            self.tap_deadline = None;
            self.in_long_press = false;
        } else if self.always_in_tap_region {
            handled = listener.on_single_tap_up(position);
            if self.defer_confirm_single_tap {
                listener.on_single_tap_confirmed(position);
            }
        } else {
            let velocity = self.velocity.velocity(self.config.max_fling_velocity_px());
            let min = self.config.min_fling_velocity_px();
            if velocity.x.abs() > min || velocity.y.abs() > min {
                let origin = self.current_down.map_or(position, |down| down.position);
                handled = listener.on_fling(velocity, origin);
            }
        }

        self.previous_up = Some(Contact {
            time: event.time,
            position,
        });
        self.velocity.clear();
        self.focus.end();
        self.is_double_tapping = false;
        self.defer_confirm_single_tap = false;
        self.long_press_deadline = None;
        handled
    }

    fn is_considered_double_tap(&self, position: Point, time: Timestamp) -> bool {
        if !self.always_in_bigger_tap_region {
            return false;
        }
        let (Some(first_down), Some(first_up)) = (self.current_down, self.previous_up) else {
            return false;
        };
        let gap = time.saturating_sub(first_up.time);
        if gap > self.config.double_tap_timeout_ms || gap < self.config.double_tap_min_time_ms {
            return false;
        }
        let slop = self.config.double_tap_slop_px();
        (first_down.position - position).hypot2() < slop * slop
    }

    fn fire_due<L: TapListener + ?Sized>(
        &mut self,
        now: Timestamp,
        inclusive: bool,
        listener: &mut L,
    ) {
        let due = |deadline: Option<Timestamp>| {
            deadline.filter(|&d| if inclusive { d <= now } else { d < now })
        };
        loop {
            match (due(self.tap_deadline), due(self.long_press_deadline)) {
                (Some(tap), Some(long_press)) if long_press < tap => self.fire_long_press(listener),
                (Some(_), _) => self.fire_tap(listener),
                (None, Some(_)) => self.fire_long_press(listener),
                (None, None) => break,
            }
        }
    }

    fn fire_tap<L: TapListener + ?Sized>(&mut self, listener: &mut L) {
        self.tap_deadline = None;
        let Some(down) = self.current_down else {
            return;
        };
        if self.still_down {
            self.defer_confirm_single_tap = true;
        } else {
            listener.on_single_tap_confirmed(down.position);
        }
    }

    fn fire_long_press<L: TapListener + ?Sized>(&mut self, listener: &mut L) {
        self.long_press_deadline = None;
        self.tap_deadline = None;
        self.defer_confirm_single_tap = false;
        self.in_long_press = true;
        if let Some(down) = self.current_down {
            log::trace!("long press at {:?}", down.position);
            listener.on_long_press(down.position);
        }
    }
}
