// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinch and quick-scale detection.
//!
//! [`ScaleDetector`] measures the *span* of the pointers in contact: the
//! hypotenuse of twice the mean absolute deviation from the focus on each
//! axis. A pinch begins once the span is at least
//! [`min_span`](DetectorConfig::min_span) and has moved more than
//! [`span_slop`](DetectorConfig::span_slop) since the pointer configuration
//! last changed; each update then reports `current_span / previous_span`.
//!
//! With quick scale enabled, a double tap whose second press stays down and
//! drags vertically also scales. The gesture is anchored at the double-tap
//! point, the span is twice the vertical distance from it, and the factor
//! grows as the finger moves away below the anchor.
//!
//! Every pointer configuration change (down, extra pointer down, pointer up)
//! re-bases the span and ends a pinch in progress, so adding or lifting a
//! finger never produces a jump in the reported factor.

use kurbo::{Point, Vec2};

use crate::config::DetectorConfig;
use crate::listener::GestureListener;
use crate::pointer::{PointerAction, PointerEvent, Timestamp};
use crate::tap::{TapDetector, TapListener};

/// Damping applied to quick-scale span changes.
const QUICK_SCALE_FACTOR: f64 = 0.5;

/// One scale sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSample {
    /// Time of the frame.
    pub time: Timestamp,
    /// Pinch centroid, or the anchor of a quick scale.
    pub focus: Point,
    /// Scale since the previous sample; `1.0` on begin and end.
    pub factor: f64,
    /// Current span in pixels.
    pub span: f64,
    /// Whether this sample belongs to a one-finger quick scale.
    pub quick_scale: bool,
}

/// Records the second press of a double tap.
#[derive(Default)]
struct QuickScaleTrigger {
    anchor: Option<Point>,
}

impl TapListener for QuickScaleTrigger {
    fn on_double_tap(&mut self, position: Point) -> bool {
        self.anchor = Some(position);
        true
    }
}

/// Pinch and quick-scale detector. See the [module docs](self).
#[derive(Clone, Debug)]
pub struct ScaleDetector {
    config: DetectorConfig,
    quick_scale_enabled: bool,
    taps: TapDetector,
    in_progress: bool,
    anchor: Option<Point>,
    event_above_anchor: bool,
    focus: Point,
    initial_span: f64,
    current_span: f64,
    previous_span: f64,
    time: Timestamp,
}

impl ScaleDetector {
    /// Creates an idle detector with quick scale enabled.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        let mut taps = TapDetector::new(config);
        taps.set_long_press_enabled(false);
        Self {
            config,
            quick_scale_enabled: true,
            taps,
            in_progress: false,
            anchor: None,
            event_above_anchor: false,
            focus: Point::ZERO,
            initial_span: 0.0,
            current_span: 0.0,
            previous_span: 0.0,
            time: 0,
        }
    }

    /// Enables or disables double-tap-drag quick scale.
    pub fn set_quick_scale_enabled(&mut self, enabled: bool) {
        self.quick_scale_enabled = enabled;
    }

    /// Whether quick scale is enabled.
    #[must_use]
    pub fn is_quick_scale_enabled(&self) -> bool {
        self.quick_scale_enabled
    }

    /// Returns `true` between an accepted begin and the matching end.
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Returns `true` while anchored at a double-tap point.
    #[must_use]
    pub fn is_quick_scale(&self) -> bool {
        self.anchor.is_some()
    }

    /// Scale between the previous and the current sample.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        if self.anchor.is_some() {
            if self.previous_span <= 0.0 {
                return 1.0;
            }
            let scale_up = (self.event_above_anchor && self.current_span < self.previous_span)
                || (!self.event_above_anchor && self.current_span > self.previous_span);
            let diff = (1.0 - self.current_span / self.previous_span).abs() * QUICK_SCALE_FACTOR;
            return if scale_up { 1.0 + diff } else { 1.0 - diff };
        }
        if self.previous_span > 0.0 {
            self.current_span / self.previous_span
        } else {
            1.0
        }
    }

    /// Expires the quick-scale double-tap window at or before `now`.
    ///
    /// Uses the same inclusive boundary as [`TapDetector::poll`], so a host
    /// polling both detectors at one deadline sees one outcome.
    pub fn poll(&mut self, now: Timestamp) {
        if self.quick_scale_enabled {
            self.taps.poll(now, &mut QuickScaleTrigger::default());
        }
    }

    /// Feeds one pointer frame. Returns `true` if the listener consumed an update.
    pub fn on_event<L: GestureListener<ScaleSample> + ?Sized>(
        &mut self,
        event: &PointerEvent,
        listener: &mut L,
    ) -> bool {
        if self.quick_scale_enabled {
            let mut trigger = QuickScaleTrigger::default();
            self.taps.on_event(event, &mut trigger);
            if let Some(anchor) = trigger.anchor {
                log::debug!("quick scale anchored at {anchor:?}");
                self.anchor = Some(anchor);
            }
        }

        let stream_complete = event.ends_stream();
        if matches!(event.action, PointerAction::Down) || stream_complete {
            if self.in_progress {
                self.end(listener);
                self.initial_span = 0.0;
                self.anchor = None;
            } else if stream_complete {
                self.initial_span = 0.0;
                self.anchor = None;
            }
            if stream_complete {
                return false;
            }
        }

        let config_changed = event.changes_configuration();
        let (focus, span) = self.measure(event);
        self.event_above_anchor = self
            .anchor
            .is_some_and(|anchor| event.primary_position().y < anchor.y);

        let was_in_progress = self.in_progress;
        self.focus = focus;
        if self.anchor.is_none()
            && self.in_progress
            && (span < self.config.min_span_px() || config_changed)
        {
            self.end(listener);
            self.initial_span = span;
        }
        if config_changed {
            self.initial_span = span;
            self.current_span = span;
            self.previous_span = span;
        }

        let min_span = if self.anchor.is_some() {
            self.config.span_slop_px()
        } else {
            self.config.min_span_px()
        };
        if !self.in_progress
            && span >= min_span
            && (was_in_progress || (span - self.initial_span).abs() > self.config.span_slop_px())
        {
            self.current_span = span;
            self.previous_span = span;
            self.time = event.time;
            self.in_progress = listener.on_begin(&self.sample());
        }

        if matches!(event.action, PointerAction::Move) {
            self.current_span = span;
            self.time = event.time;
            let handled = self.in_progress && listener.on_update(&self.sample());
            self.previous_span = self.current_span;
            return handled;
        }
        false
    }

    fn end<L: GestureListener<ScaleSample> + ?Sized>(&mut self, listener: &mut L) {
        self.in_progress = false;
        let mut sample = self.sample();
        sample.factor = 1.0;
        listener.on_end(&sample);
    }

    fn sample(&self) -> ScaleSample {
        ScaleSample {
            time: self.time,
            focus: self.focus,
            factor: self.scale_factor(),
            span: self.current_span,
            quick_scale: self.anchor.is_some(),
        }
    }

    fn measure(&self, event: &PointerEvent) -> (Point, f64) {
        let focus = self.anchor.unwrap_or_else(|| event.focus());
        let mut deviation = Vec2::ZERO;
        let mut count = 0_u32;
        for pointer in event.remaining() {
            deviation.x += (pointer.position.x - focus.x).abs();
            deviation.y += (pointer.position.y - focus.y).abs();
            count += 1;
        }
        if count == 0 {
            return (focus, 0.0);
        }
        let span = deviation * 2.0 / f64::from(count);
        if self.anchor.is_some() {
            (focus, span.y)
        } else {
            (focus, span.hypot())
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        begins: Vec<ScaleSample>,
        updates: Vec<ScaleSample>,
        ends: u32,
        accept: bool,
    }

    impl Recorder {
        fn accepting() -> Self {
            Self {
                accept: true,
                ..Self::default()
            }
        }
    }

    impl GestureListener<ScaleSample> for Recorder {
        fn on_begin(&mut self, sample: &ScaleSample) -> bool {
            self.begins.push(*sample);
            self.accept
        }
        fn on_update(&mut self, sample: &ScaleSample) -> bool {
            self.updates.push(*sample);
            true
        }
        fn on_end(&mut self, _: &ScaleSample) {
            self.ends += 1;
        }
    }

    fn pair(half_width: f64) -> [Point; 2] {
        [Point::new(200.0 - half_width, 300.0), Point::new(200.0 + half_width, 300.0)]
    }

    #[test]
    fn pinch_reports_span_ratio() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        let mut r = Recorder::accepting();
        d.on_event(&PointerEvent::down(0, pair(50.0)[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &pair(50.0), 1), &mut r);
        assert!(r.begins.is_empty(), "no begin before the span moves");

        d.on_event(&PointerEvent::moved(10, 0, &pair(60.0)), &mut r);
        assert_eq!(r.begins.len(), 1);
        assert!(d.is_in_progress());

        d.on_event(&PointerEvent::moved(20, 0, &pair(66.0)), &mut r);
        let last = r.updates.last().unwrap();
        assert!((last.factor - 1.1).abs() < 1e-9, "factor {}", last.factor);
        assert_eq!(last.focus, Point::new(200.0, 300.0));
        assert!(!last.quick_scale);
    }

    #[test]
    fn declined_begin_yields_no_updates() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        let mut r = Recorder::default();
        d.on_event(&PointerEvent::down(0, pair(50.0)[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &pair(50.0), 1), &mut r);
        d.on_event(&PointerEvent::moved(10, 0, &pair(80.0)), &mut r);
        d.on_event(&PointerEvent::moved(20, 0, &pair(90.0)), &mut r);
        assert!(!r.begins.is_empty());
        assert!(r.updates.is_empty());
        assert!(!d.is_in_progress());
    }

    #[test]
    fn pointer_up_ends_pinch() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        let mut r = Recorder::accepting();
        d.on_event(&PointerEvent::down(0, pair(50.0)[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &pair(50.0), 1), &mut r);
        d.on_event(&PointerEvent::moved(10, 0, &pair(70.0)), &mut r);
        d.on_event(&PointerEvent::pointer_up(20, 0, &pair(70.0), 1), &mut r);
        assert_eq!(r.ends, 1);
        assert!(!d.is_in_progress());
    }

    #[test]
    fn cancel_ends_pinch() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        let mut r = Recorder::accepting();
        d.on_event(&PointerEvent::down(0, pair(50.0)[0]), &mut r);
        d.on_event(&PointerEvent::pointer_down(5, 0, &pair(50.0), 1), &mut r);
        d.on_event(&PointerEvent::moved(10, 0, &pair(70.0)), &mut r);
        d.on_event(&PointerEvent::cancel(20, 0, &pair(70.0)), &mut r);
        assert_eq!(r.ends, 1);
        assert!(!d.is_in_progress());
    }

    #[test]
    fn double_tap_drag_quick_scales_about_anchor() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        let mut r = Recorder::accepting();
        let p = Point::new(100.0, 100.0);
        d.on_event(&PointerEvent::down(0, p), &mut r);
        d.on_event(&PointerEvent::up(50, 0, p), &mut r);
        d.on_event(&PointerEvent::down(150, p), &mut r);
        assert!(d.is_quick_scale());

        // 2 * 5 px is inside the span slop.
        d.on_event(&PointerEvent::moved(160, 150, &[Point::new(100.0, 105.0)]), &mut r);
        assert!(r.begins.is_empty());

        d.on_event(&PointerEvent::moved(170, 150, &[Point::new(100.0, 110.0)]), &mut r);
        assert_eq!(r.begins.len(), 1);
        assert!(r.begins[0].quick_scale);
        assert_eq!(r.begins[0].focus, p);

        // Moving further down from the anchor grows the span: 20 -> 40.
        d.on_event(&PointerEvent::moved(180, 150, &[Point::new(100.0, 120.0)]), &mut r);
        let grow = r.updates.last().unwrap().factor;
        assert!((grow - 1.5).abs() < 1e-9, "factor {grow}");

        // Moving back up shrinks it: 40 -> 20.
        d.on_event(&PointerEvent::moved(190, 150, &[Point::new(100.0, 110.0)]), &mut r);
        let shrink = r.updates.last().unwrap().factor;
        assert!((shrink - 0.75).abs() < 1e-9, "factor {shrink}");

        d.on_event(&PointerEvent::up(200, 150, Point::new(100.0, 110.0)), &mut r);
        assert_eq!(r.ends, 1);
        assert!(!d.is_quick_scale());
    }

    #[test]
    fn poll_at_deadline_closes_quick_scale_window() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        let mut r = Recorder::accepting();
        let p = Point::new(100.0, 100.0);
        d.on_event(&PointerEvent::down(0, p), &mut r);
        d.on_event(&PointerEvent::up(50, 0, p), &mut r);
        d.poll(300);
        d.on_event(&PointerEvent::down(300, p), &mut r);
        assert!(!d.is_quick_scale());
    }

    #[test]
    fn quick_scale_can_be_disabled() {
        let mut d = ScaleDetector::new(DetectorConfig::default());
        d.set_quick_scale_enabled(false);
        let mut r = Recorder::accepting();
        let p = Point::new(100.0, 100.0);
        d.on_event(&PointerEvent::down(0, p), &mut r);
        d.on_event(&PointerEvent::up(50, 0, p), &mut r);
        d.on_event(&PointerEvent::down(150, p), &mut r);
        d.on_event(&PointerEvent::moved(170, 150, &[Point::new(100.0, 160.0)]), &mut r);
        assert!(!d.is_quick_scale());
        assert!(r.begins.is_empty());
    }
}
