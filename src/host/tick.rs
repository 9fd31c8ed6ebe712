use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::foundation::error::{SlotframeError, SlotframeResult};
use crate::host::scheduler::{HostCaps, HostScheduler, TaskFn, TaskId};

/// Deterministic in-process host scheduler driven by explicit tick advancement.
///
/// Nothing runs until [`TickScheduler::advance`] or [`TickScheduler::run_until_idle`] is called.
/// Tasks due on the same tick run in the order they were scheduled.
pub struct TickScheduler {
    caps: HostCaps,
    queue: RefCell<TickQueue>,
}

#[derive(Default)]
struct TickQueue {
    now: u64,
    next_id: u64,
    next_seq: u64,
    due: BTreeMap<(u64, u64), TaskId>,
    tasks: HashMap<TaskId, TaskSlot>,
}

struct TaskSlot {
    // taken out while the task runs
    run: Option<TaskFn>,
    period: Option<u64>,
}

impl TickQueue {
    fn push(&mut self, at: u64, id: TaskId) {
        self.due.insert((at, self.next_seq), id);
        self.next_seq += 1;
    }

    fn register(&mut self, delay: u64, period: Option<u64>, run: TaskFn) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            TaskSlot {
                run: Some(run),
                period,
            },
        );
        let at = self.now.saturating_add(delay);
        self.push(at, id);
        id
    }

    /// Pop the next live task due at or before `horizon`.
    fn pop_due(&mut self, horizon: u64) -> Option<(TaskId, u64, TaskFn)> {
        while let Some((&(at, seq), &id)) = self.due.first_key_value() {
            if at > horizon {
                return None;
            }
            self.due.remove(&(at, seq));
            let Some(slot) = self.tasks.get_mut(&id) else {
                // cancelled
                continue;
            };
            let Some(run) = slot.run.take() else {
                continue;
            };
            if slot.period.is_none() {
                self.tasks.remove(&id);
            }
            self.now = at;
            return Some((id, at, run));
        }
        None
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler {
    /// Scheduler at tick 0 offering every primitive.
    pub fn new() -> Self {
        Self::with_caps(HostCaps::ALL)
    }

    /// Scheduler advertising only `caps`; the missing primitives fail as unsupported.
    pub fn with_caps(caps: HostCaps) -> Self {
        Self {
            caps,
            queue: RefCell::new(TickQueue::default()),
        }
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.queue.borrow().now
    }

    /// Number of live tasks.
    pub fn pending(&self) -> usize {
        self.queue.borrow().tasks.len()
    }

    fn run_next(&self, horizon: u64) -> bool {
        let Some((id, at, mut run)) = self.queue.borrow_mut().pop_due(horizon) else {
            return false;
        };
        tracing::trace!(task = id.0, tick = at, "running task");
        run();

        let mut guard = self.queue.borrow_mut();
        let queue = &mut *guard;
        // periodic tasks survive unless cancelled during their run
        if let Some(slot) = queue.tasks.get_mut(&id)
            && let Some(period) = slot.period
        {
            slot.run = Some(run);
            queue.push(at.saturating_add(period), id);
        }
        true
    }

    /// Move time forward by `ticks`, running every task that comes due. Returns the number of
    /// task runs.
    pub fn advance(&self, ticks: u64) -> usize {
        let horizon = self.now().saturating_add(ticks);
        let mut runs = 0;
        while self.run_next(horizon) {
            runs += 1;
        }
        self.queue.borrow_mut().now = horizon;
        runs
    }

    /// Run tasks until none are left or `max_ticks` have passed. Returns the number of task
    /// runs; the clock stops at the last run when the queue drains early.
    pub fn run_until_idle(&self, max_ticks: u64) -> usize {
        let horizon = self.now().saturating_add(max_ticks);
        let mut runs = 0;
        while self.run_next(horizon) {
            runs += 1;
        }
        if self.pending() > 0 {
            self.queue.borrow_mut().now = horizon;
        }
        runs
    }
}

fn ensure_period(period: u64) -> SlotframeResult<()> {
    if period == 0 {
        return Err(SlotframeError::validation(
            "repeating task period must be at least one tick",
        ));
    }
    Ok(())
}

impl HostScheduler for TickScheduler {
    fn capabilities(&self) -> HostCaps {
        self.caps
    }

    fn run_later(&self, delay: u64, task: TaskFn) -> TaskId {
        self.queue.borrow_mut().register(delay, None, task)
    }

    fn run_every(&self, period: u64, task: TaskFn) -> SlotframeResult<TaskId> {
        if !self.caps.repeating {
            return Err(SlotframeError::unsupported("run_every"));
        }
        ensure_period(period)?;
        Ok(self.queue.borrow_mut().register(period, Some(period), task))
    }

    fn run_timer(&self, delay: u64, period: u64, task: TaskFn) -> SlotframeResult<TaskId> {
        if !self.caps.delayed_repeating {
            return Err(SlotframeError::unsupported("run_timer"));
        }
        ensure_period(period)?;
        Ok(self.queue.borrow_mut().register(delay, Some(period), task))
    }

    fn cancel(&self, id: TaskId) {
        // stale queue entries are skipped when popped
        self.queue.borrow_mut().tasks.remove(&id);
    }

    fn is_scheduled(&self, id: TaskId) -> bool {
        self.queue.borrow().tasks.contains_key(&id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/tick.rs"]
mod tests;
