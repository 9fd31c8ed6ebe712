use crate::foundation::error::{SlotframeError, SlotframeResult};

/// Callback run by a host scheduler when a task comes due.
pub type TaskFn = Box<dyn FnMut()>;

/// Handle to a task registered with a [`HostScheduler`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct TaskId(pub u64);

/// Recurring-task primitives a host offers beyond `run_later`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HostCaps {
    /// `run_every(period)` is available.
    pub repeating: bool,
    /// `run_timer(delay, period)` is available.
    pub delayed_repeating: bool,
}

impl HostCaps {
    /// Only one-shot tasks.
    pub const NONE: Self = Self {
        repeating: false,
        delayed_repeating: false,
    };

    /// Every primitive.
    pub const ALL: Self = Self {
        repeating: true,
        delayed_repeating: true,
    };
}

impl Default for HostCaps {
    fn default() -> Self {
        Self::NONE
    }
}

/// Tick-based, single-threaded task scheduler supplied by the host application.
///
/// Delays and periods are counted in host ticks. Tasks registered from inside a running task
/// are allowed, and cancelling a task from inside its own run stops further runs.
pub trait HostScheduler {
    /// Primitives this host implements natively.
    fn capabilities(&self) -> HostCaps {
        HostCaps::NONE
    }

    /// Run `task` once, `delay` ticks from now.
    fn run_later(&self, delay: u64, task: TaskFn) -> TaskId;

    /// Run `task` every `period` ticks, first `period` ticks from now.
    fn run_every(&self, period: u64, task: TaskFn) -> SlotframeResult<TaskId> {
        let _ = (period, task);
        Err(SlotframeError::unsupported("run_every"))
    }

    /// Run `task` `delay` ticks from now, then every `period` ticks.
    fn run_timer(&self, delay: u64, period: u64, task: TaskFn) -> SlotframeResult<TaskId> {
        let _ = (delay, period, task);
        Err(SlotframeError::unsupported("run_timer"))
    }

    /// Cancel `id`. Unknown or finished tasks are ignored.
    fn cancel(&self, id: TaskId);

    /// `true` while `id` has runs left.
    fn is_scheduled(&self, id: TaskId) -> bool;
}
