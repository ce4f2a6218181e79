//! Timer service for Vitrine.
//!
//! Provides one-shot deadline bookkeeping for controllers: auto-hide
//! delays, delayed visibility re-checks. Unlike a conventional event-loop
//! timer system, nothing here sleeps or wakes: the host passes the current
//! `Instant` into [`TimerService::fire_due`] each tick and dispatches the
//! returned ids to their owners. This keeps every timing decision
//! deterministic under test.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a scheduled timer.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should fire.
    deadline: Instant,
}

/// An entry in the timer queue (min-heap by deadline).
///
/// Entries are not removed on cancel or restart; instead each entry
/// carries the deadline it was pushed with, and stale entries are skipped
/// when popped.
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.deadline.cmp(&self.deadline)
    }
}

/// One-shot timer bookkeeping driven by an explicit clock.
///
/// A fired or cancelled [`TimerId`] is never reported by
/// [`fire_due`](Self::fire_due) again. [`restart`](Self::restart) is the
/// debounce primitive: it moves an active timer's deadline in one
/// operation, so at most one pending deadline exists per id.
#[derive(Debug, Default)]
pub struct TimerService {
    /// All active timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending fires (min-heap by deadline).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerService {
    /// Create an empty timer service.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a one-shot timer that becomes due `delay` after `now`.
    ///
    /// Returns the id to match against [`fire_due`](Self::fire_due) output
    /// and to cancel or restart the timer.
    pub fn schedule(&mut self, delay: Duration, now: Instant) -> TimerId {
        let deadline = now + delay;
        let id = self.timers.insert(TimerData { deadline });
        self.queue.push(TimerQueueEntry { id, deadline });
        tracing::trace!(target: crate::logging::targets::TIMER, ?id, ?delay, "timer scheduled");
        id
    }

    /// Cancel a pending timer.
    ///
    /// Returns an error if the timer has already fired or been cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Move an active timer's deadline to `now + delay`.
    ///
    /// This is the debounce operation: the prior deadline is abandoned and
    /// a single new one takes its place. Returns an error if the timer is
    /// not active.
    pub fn restart(&mut self, id: TimerId, delay: Duration, now: Instant) -> Result<()> {
        let timer = self
            .timers
            .get_mut(id)
            .ok_or(TimerError::InvalidTimerId)?;
        let deadline = now + delay;
        timer.deadline = deadline;
        self.queue.push(TimerQueueEntry { id, deadline });
        Ok(())
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The earliest pending deadline, if any.
    ///
    /// Hosts with their own scheduling can use this to decide when to call
    /// [`fire_due`](Self::fire_due) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|t| t.deadline).min()
    }

    /// Number of pending timers.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// Pop every timer whose deadline is at or before `now`.
    ///
    /// Returned ids are in deadline order. Each id appears at most once
    /// across the lifetime of the service; cancelled and restarted
    /// deadlines are skipped as stale.
    pub fn fire_due(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(&entry) = self.queue.peek() {
            if entry.deadline > now {
                break;
            }
            self.queue.pop();

            // Stale entries: the timer was cancelled, already fired, or
            // restarted with a different deadline.
            match self.timers.get(entry.id) {
                Some(data) if data.deadline == entry.deadline => {
                    self.timers.remove(entry.id);
                    fired.push(entry.id);
                }
                _ => continue,
            }
        }

        if !fired.is_empty() {
            tracing::trace!(target: crate::logging::targets::TIMER, count = fired.len(), "timers fired");
        }
        fired
    }
}
