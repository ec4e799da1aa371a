// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared recognizer plumbing.
//!
//! Each two-finger recognizer keeps a [`RecognizerState`]: when it began, the
//! signal accumulated since, and whether that signal has left its
//! [`Deadband`]. The recognizers implement [`Recognizer`], and [`Bound`]
//! pairs one with a [`GestureContext`] so that a detector from
//! `meridian_event_state` can drive it as a plain listener.

use meridian_event_state::listener::GestureListener;
use meridian_event_state::pointer::Timestamp;

use crate::arbitration::GestureContext;
use crate::host::MapHost;

/// Open interval of accumulated signal in which a recognizer stays idle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deadband {
    /// Lower bound, exclusive of activation.
    pub low: f64,
    /// Upper bound, exclusive of activation.
    pub high: f64,
}

impl Deadband {
    /// Band between `low` and `high`.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Band of `±half_width` around zero.
    #[must_use]
    pub const fn symmetric(half_width: f64) -> Self {
        Self {
            low: -half_width,
            high: half_width,
        }
    }

    /// Returns `true` if `value` lies strictly outside the band.
    #[must_use]
    pub fn is_escaped_by(&self, value: f64) -> bool {
        value < self.low || value > self.high
    }
}

/// How per-frame signals combine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accumulation {
    /// Product of factors; identity `1.0`.
    Multiplicative,
    /// Sum of deltas; identity `0.0`.
    Additive,
}

impl Accumulation {
    /// Value of an empty accumulation.
    #[must_use]
    pub const fn identity(self) -> f64 {
        match self {
            Self::Multiplicative => 1.0,
            Self::Additive => 0.0,
        }
    }
}

/// Per-instance state of a two-finger recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecognizerState {
    accumulation: Accumulation,
    began_at: Option<Timestamp>,
    cumulative: f64,
    active: bool,
}

impl RecognizerState {
    /// Idle state combining signals as `accumulation`.
    #[must_use]
    pub const fn new(accumulation: Accumulation) -> Self {
        Self {
            accumulation,
            began_at: None,
            cumulative: accumulation.identity(),
            active: false,
        }
    }

    /// Starts a new instance at `time`, discarding any previous one.
    pub fn begin(&mut self, time: Timestamp) {
        *self = Self::new(self.accumulation);
        self.began_at = Some(time);
    }

    /// Folds one per-frame signal into the running total and returns it.
    pub fn accumulate(&mut self, signal: f64) -> f64 {
        match self.accumulation {
            Accumulation::Multiplicative => self.cumulative *= signal,
            Accumulation::Additive => self.cumulative += signal,
        }
        self.cumulative
    }

    /// Running total since [`RecognizerState::begin`].
    #[must_use]
    pub fn cumulative(&self) -> f64 {
        self.cumulative
    }

    /// When the current instance began.
    #[must_use]
    pub fn began_at(&self) -> Option<Timestamp> {
        self.began_at
    }

    /// Milliseconds between the begin and `now`; `None` before a begin.
    #[must_use]
    pub fn elapsed(&self, now: Timestamp) -> Option<u64> {
        self.began_at.map(|began| now.saturating_sub(began))
    }

    /// Returns `true` once the instance has activated.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Latches the instance active. Returns `true` on the first call.
    pub fn activate(&mut self) -> bool {
        let newly = !self.active;
        self.active = true;
        newly
    }

    /// Returns to idle.
    pub fn reset(&mut self) {
        *self = Self::new(self.accumulation);
    }
}

/// A map gesture recognizer fed by one detector.
///
/// Mirrors [`GestureListener`] with the shared [`GestureContext`] threaded
/// through each call.
pub(crate) trait Recognizer<S> {
    /// The detector wants to start a gesture. Return `true` to accept.
    fn on_begin<H: MapHost + ?Sized>(&mut self, sample: &S, ctx: &mut GestureContext<'_, H>)
    -> bool;

    /// One frame of an accepted gesture. Return `true` if it was consumed.
    fn on_update<H: MapHost + ?Sized>(&mut self, sample: &S, ctx: &mut GestureContext<'_, H>)
    -> bool;

    /// The gesture ended.
    fn on_end<H: MapHost + ?Sized>(&mut self, sample: &S, ctx: &mut GestureContext<'_, H>);
}

/// A recognizer bound to the context of one dispatch step.
pub(crate) struct Bound<'r, 'c, R, H: ?Sized> {
    pub(crate) recognizer: &'r mut R,
    pub(crate) ctx: GestureContext<'c, H>,
}

impl<S, R, H> GestureListener<S> for Bound<'_, '_, R, H>
where
    R: Recognizer<S>,
    H: MapHost + ?Sized,
{
    fn on_begin(&mut self, sample: &S) -> bool {
        self.recognizer.on_begin(sample, &mut self.ctx)
    }

    fn on_update(&mut self, sample: &S) -> bool {
        self.recognizer.on_update(sample, &mut self.ctx)
    }

    fn on_end(&mut self, sample: &S) {
        self.recognizer.on_end(sample, &mut self.ctx);
    }
}
