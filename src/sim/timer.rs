//! Cancellable single-shot delays
//!
//! A [`DelayedTask`] holds at most one pending payload and delivers it once
//! its delay has elapsed on the session clock. Arming again replaces the
//! pending task and restarts the full delay. A cancelled payload is dropped
//! from the task and can never be delivered.

use std::time::Duration;

/// Identifies one arming of a [`DelayedTask`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// A task whose delay elapsed during [`DelayedTask::advance`]
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub handle: TaskHandle,
    pub payload: T,
    /// Time that had already passed beyond the deadline when it fired
    pub overshoot: Duration,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: TaskHandle,
    remaining: Duration,
    payload: T,
}

/// Re-armable single-shot delay driven by explicit time advances
#[derive(Debug, Clone)]
pub struct DelayedTask<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
    next_handle: u64,
    arm_count: u64,
    fire_count: u64,
}

impl<T> DelayedTask<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            next_handle: 0,
            arm_count: 0,
            fire_count: 0,
        }
    }

    /// Schedules `payload` for delivery after the full delay
    ///
    /// Any task that is already pending is discarded first.
    pub fn arm(&mut self, payload: T) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.arm_count += 1;
        self.pending = Some(Pending {
            handle,
            remaining: self.delay,
            payload,
        });
        handle
    }

    /// Drops the pending task, returning its payload
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.payload)
    }

    /// Cancels only if `handle` is still the pending task
    pub fn cancel_handle(&mut self, handle: TaskHandle) -> bool {
        if self.current_handle() == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Cancels any pending task and clears the arm/fire counters
    pub fn reset(&mut self) {
        self.pending = None;
        self.arm_count = 0;
        self.fire_count = 0;
    }

    /// Advances the task clock, delivering the payload if its deadline passed
    pub fn advance(&mut self, elapsed: Duration) -> Option<Fired<T>> {
        let pending = self.pending.as_mut()?;

        if pending.remaining > elapsed {
            pending.remaining -= elapsed;
            return None;
        }

        let overshoot = elapsed - pending.remaining;
        let pending = self.pending.take()?;
        self.fire_count += 1;

        Some(Fired {
            handle: pending.handle,
            payload: pending.payload,
            overshoot,
        })
    }

    /// Time left before the pending task fires
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.remaining)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn current_handle(&self) -> Option<TaskHandle> {
        self.pending.as_ref().map(|pending| pending.handle)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay used by future arms; a pending task keeps its deadline
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Number of times the task was armed since creation or the last reset
    pub fn arm_count(&self) -> u64 {
        self.arm_count
    }

    /// Number of payloads delivered since creation or the last reset
    pub fn fire_count(&self) -> u64 {
        self.fire_count
    }
}
