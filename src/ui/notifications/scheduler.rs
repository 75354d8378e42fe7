// SPDX-License-Identifier: MPL-2.0
//! Cancellable deferred tasks.
//!
//! Everything the notification system does "later" (start an enter
//! transition, auto-dismiss, detach after the exit transition) is queued
//! here and drained from the periodic tick. Tasks with the same deadline run
//! in the order they were scheduled. Cancelling a handle guarantees the task
//! never runs, even if its deadline has already passed.

use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Handle returned by [`Scheduler::schedule`], used to cancel the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    queue: BTreeMap<(Instant, u64), T>,
    deadlines: HashMap<u64, Instant>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `task` to run once `deadline` has passed.
    pub fn schedule(&mut self, deadline: Instant, task: T) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((deadline, seq), task);
        self.deadlines.insert(seq, deadline);
        TaskHandle(seq)
    }

    /// Cancels a pending task. Returns `false` if it already ran or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.queue.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    /// Removes and returns the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        let (&(deadline, seq), _) = self.queue.first_key_value()?;
        if deadline > now {
            return None;
        }
        self.deadlines.remove(&seq);
        self.queue.remove(&(deadline, seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn drain(scheduler: &mut Scheduler<&'static str>, now: Instant) -> Vec<&'static str> {
        std::iter::from_fn(|| scheduler.pop_due(now)).collect()
    }

    #[test]
    fn tasks_run_only_after_their_deadline() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(start + Duration::from_millis(100), "late");

        assert!(drain(&mut scheduler, start).is_empty());
        assert_eq!(drain(&mut scheduler, start + Duration::from_millis(100)), vec!["late"]);
        assert!(drain(&mut scheduler, start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn equal_deadlines_run_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        let at = Instant::now();
        scheduler.schedule(at, "first");
        scheduler.schedule(at, "second");
        scheduler.schedule(at, "third");

        assert_eq!(drain(&mut scheduler, at), vec!["first", "second", "third"]);
    }

    #[test]
    fn earlier_deadline_runs_first_regardless_of_order() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(start + Duration::from_millis(50), "b");
        scheduler.schedule(start + Duration::from_millis(10), "a");

        assert_eq!(
            drain(&mut scheduler, start + Duration::from_secs(1)),
            vec!["a", "b"]
        );
    }

    #[test]
    fn cancelled_task_never_runs() {
        let mut scheduler = Scheduler::new();
        let at = Instant::now();
        let handle = scheduler.schedule(at, "cancelled");
        scheduler.schedule(at, "kept");

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(drain(&mut scheduler, at + Duration::from_secs(1)), vec!["kept"]);
    }

    #[test]
    fn cancel_after_run_is_a_no_op() {
        let mut scheduler = Scheduler::new();
        let at = Instant::now();
        let handle = scheduler.schedule(at, "ran");
        assert_eq!(drain(&mut scheduler, at), vec!["ran"]);
        assert!(!scheduler.cancel(handle));
    }

    #[test]
    fn tasks_not_yet_due_stay_queued() {
        let mut scheduler = Scheduler::new();
        let start = Instant::now();
        scheduler.schedule(start + Duration::from_millis(30), "x");
        scheduler.schedule(start + Duration::from_millis(20), "y");
        assert!(scheduler.pop_due(start).is_none());
        assert_eq!(
            drain(&mut scheduler, start + Duration::from_millis(30)),
            vec!["y", "x"]
        );
    }
}
