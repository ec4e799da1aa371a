// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred tasks for the trackball long press.
//!
//! The host owns the clock. It implements [`Scheduler`] on top of its message
//! loop, or uses the ready-made [`TimerQueue`], and reports each firing back
//! with the [`TimerId`] it was given.

use alloc::vec::Vec;

use meridian_event_state::pointer::Timestamp;

/// Handle of one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw value, unique per [`LongPressTimer`].
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Runs deferred tasks on the input thread.
pub trait Scheduler {
    /// Fires `id` after `delay_ms`.
    fn schedule(&mut self, id: TimerId, delay_ms: u64);

    /// Drops `id` if it has not fired yet.
    fn cancel(&mut self, id: TimerId);
}

/// Owner of at most one pending long-press task.
///
/// Arming cancels the previous task before scheduling the next, so two tasks
/// are never pending at once. Firings of anything but the current task are
/// reported as stale.
#[derive(Clone, Debug, Default)]
pub struct LongPressTimer {
    next_id: u64,
    pending: Option<TimerId>,
}

impl LongPressTimer {
    /// Creates an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending task and schedules a new one after `delay_ms`.
    pub fn arm<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S, delay_ms: u64) -> TimerId {
        self.cancel(scheduler);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        scheduler.schedule(id, delay_ms);
        self.pending = Some(id);
        log::debug!("long press timer {} armed for {delay_ms} ms", id.0);
        id
    }

    /// Cancels the pending task. Returns `true` if there was one.
    pub fn cancel<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.pending.take() {
            Some(id) => {
                scheduler.cancel(id);
                log::debug!("long press timer {} canceled", id.0);
                true
            }
            None => false,
        }
    }

    /// Accepts a firing. Returns `true` if `id` is the pending task, which is
    /// then cleared.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            log::debug!("long press timer {} fired", id.0);
            true
        } else {
            log::trace!("ignoring stale timer {}", id.0);
            false
        }
    }

    /// Returns `true` while a task is scheduled and has not fired.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending task.
    #[must_use]
    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }
}

/// A [`Scheduler`] for hosts without a message loop.
///
/// Tasks are kept with their deadlines; [`TimerQueue::advance`] moves the
/// clock and returns the tasks that came due.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Timestamp,
    entries: Vec<(Timestamp, TimerId)>,
}

impl TimerQueue {
    /// Creates an empty queue at time `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            entries: Vec::new(),
        }
    }

    /// Current time of the queue.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Earliest deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.entries.iter().map(|&(deadline, _)| deadline).min()
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Moves the clock to `now` and removes every task due at or before it.
    ///
    /// Returned ids are ordered by deadline, then by scheduling order. The
    /// clock never moves backwards.
    pub fn advance(&mut self, now: Timestamp) -> Vec<TimerId> {
        self.now = self.now.max(now);
        let now = self.now;
        let mut due: Vec<(Timestamp, TimerId)> = Vec::new();
        self.entries.retain(|&entry| {
            if entry.0 <= now {
                due.push(entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, id: TimerId, delay_ms: u64) {
        self.entries.push((self.now.saturating_add(delay_ms), id));
    }

    fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|&(_, pending)| pending != id);
    }
}
