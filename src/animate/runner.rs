use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::animate::animation::Animation;
use crate::animate::native::{Binding, NativePlan, Primitive};
use crate::animate::schedule::Schedule;
use crate::foundation::error::{SlotframeError, SlotframeResult};
use crate::host::scheduler::{HostScheduler, TaskId};

/// Lifecycle of an [`AnimationRunner`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    /// Never played, or reset since.
    NotStarted,
    /// A host task will apply more frames.
    Running,
    /// Frames remain but nothing is scheduled.
    Paused,
    /// The animation has no frames left.
    Finished,
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
        })
    }
}

/// Runner configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RunnerOpts {
    /// Map recognized schedule shapes onto one host task instead of one task per frame.
    pub native_schedules: bool,
}

impl Default for RunnerOpts {
    fn default() -> Self {
        Self {
            native_schedules: true,
        }
    }
}

type Container<I> = Box<dyn FnMut(usize, I)>;

struct RunnerCore<S, I> {
    animation: Animation<S, I>,
    container: Container<I>,
    task: Option<TaskId>,
    started: bool,
    frames_applied: u64,
}

impl<S, I> RunnerCore<S, I> {
    fn cancel_task(&mut self, host: &dyn HostScheduler) {
        if let Some(id) = self.task.take() {
            host.cancel(id);
        }
    }
}

/// Plays an [`Animation`] into a container on a host scheduler.
///
/// The runner owns the animation and the container callback. Host tasks only hold weak
/// references to the runner, so dropping it (which also cancels its task) turns anything still
/// queued into a no-op. The container must not call back into its own runner.
pub struct AnimationRunner<S, I> {
    host: Rc<dyn HostScheduler>,
    core: Rc<RefCell<RunnerCore<S, I>>>,
    opts: RunnerOpts,
}

impl<S: 'static, I: 'static> AnimationRunner<S, I> {
    /// Runner with default options.
    pub fn new(
        host: Rc<dyn HostScheduler>,
        animation: Animation<S, I>,
        container: impl FnMut(usize, I) + 'static,
    ) -> Self {
        Self::with_opts(host, animation, container, RunnerOpts::default())
    }

    /// Runner with explicit options.
    pub fn with_opts(
        host: Rc<dyn HostScheduler>,
        animation: Animation<S, I>,
        container: impl FnMut(usize, I) + 'static,
        opts: RunnerOpts,
    ) -> Self {
        Self {
            host,
            core: Rc::new(RefCell::new(RunnerCore {
                animation,
                container: Box::new(container),
                task: None,
                started: false,
                frames_applied: 0,
            })),
            opts,
        }
    }

    /// Current state, derived from the animation and the pending host task.
    pub fn status(&self) -> AnimationState {
        let core = self.core.borrow();
        if !core.animation.has_next_frame() {
            AnimationState::Finished
        } else if core.task.is_some_and(|id| self.host.is_scheduled(id)) {
            AnimationState::Running
        } else if core.started {
            AnimationState::Paused
        } else {
            AnimationState::NotStarted
        }
    }

    /// Frames applied since the runner was created.
    pub fn frames_applied(&self) -> u64 {
        self.core.borrow().frames_applied
    }

    /// Options this runner was built with.
    pub fn opts(&self) -> &RunnerOpts {
        &self.opts
    }

    /// Start or resume playback, drawing frame delays from `schedule`.
    ///
    /// Zero delays apply their frame before this returns. Returns the state after scheduling;
    /// playing a finished animation does nothing. An endless zero-delay schedule over an
    /// endless animation never returns.
    ///
    /// # Errors
    ///
    /// [`SlotframeError::State`] while already running. Errors from the host when it fails to
    /// register a primitive it advertised.
    #[tracing::instrument(skip(self, schedule))]
    pub fn play(&mut self, schedule: Schedule) -> SlotframeResult<AnimationState> {
        match self.status() {
            AnimationState::Running => {
                return Err(SlotframeError::state("animation already running"));
            }
            AnimationState::Finished => {
                tracing::debug!("animation finished, nothing to play");
                return Ok(AnimationState::Finished);
            }
            AnimationState::NotStarted | AnimationState::Paused => {}
        }
        {
            let mut core = self.core.borrow_mut();
            core.started = true;
            core.task = None;
        }

        let plan = if self.opts.native_schedules {
            NativePlan::recognize(&schedule)
        } else {
            None
        };
        match plan.and_then(|plan| plan.bind(self.host.capabilities())) {
            Some(binding) => {
                tracing::debug!(?plan, ?binding, "running schedule on a native host task");
                run_native(&self.core, &self.host, binding)?;
            }
            None => {
                tracing::debug!(?plan, "running schedule step by step");
                drive(&self.core, &self.host, schedule);
            }
        }
        Ok(self.status())
    }

    /// Cancel the pending task, keeping the animation position. Leaves the runner paused
    /// unless it has finished.
    #[tracing::instrument(skip(self))]
    pub fn stop(&mut self) {
        let mut core = self.core.borrow_mut();
        core.cancel_task(&*self.host);
        if core.animation.has_next_frame() {
            core.started = true;
        }
    }

    /// Cancel the pending task and rewind the animation.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        let mut core = self.core.borrow_mut();
        core.cancel_task(&*self.host);
        core.animation.reset();
        core.started = false;
    }
}

impl<S, I> Drop for AnimationRunner<S, I> {
    fn drop(&mut self) {
        // borrowed only while a frame is being applied
        if let Ok(mut core) = self.core.try_borrow_mut() {
            core.cancel_task(&*self.host);
        }
    }
}

impl<S, I> fmt::Debug for AnimationRunner<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRunner")
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

/// Apply the next frame. Returns `false` once the animation is exhausted, after releasing the
/// host task.
fn show_frame<S: 'static, I: 'static>(
    core: &RefCell<RunnerCore<S, I>>,
    host: &dyn HostScheduler,
) -> bool {
    let mut core = core.borrow_mut();
    if core.animation.has_next_frame() {
        let frame = core.animation.next_frame();
        frame.apply(&mut core.container);
        core.frames_applied += 1;
        tracing::trace!(frames_applied = core.frames_applied, "frame applied");
    }
    if core.animation.has_next_frame() {
        return true;
    }
    tracing::debug!("animation finished");
    core.cancel_task(host);
    false
}

fn run_native<S: 'static, I: 'static>(
    core: &Rc<RefCell<RunnerCore<S, I>>>,
    host: &Rc<dyn HostScheduler>,
    binding: Binding,
) -> SlotframeResult<()> {
    if binding.immediate && !show_frame(core, &**host) {
        return Ok(());
    }
    let Some(primitive) = binding.primitive else {
        return Ok(());
    };

    let weak_core = Rc::downgrade(core);
    let weak_host = Rc::downgrade(host);
    let mut remaining = primitive.runs();
    let task = Box::new(move || {
        let (Some(core), Some(host)) = (weak_core.upgrade(), weak_host.upgrade()) else {
            return;
        };
        let more = show_frame(&core, &*host);
        if let Some(left) = remaining.as_mut() {
            *left = left.saturating_sub(1);
            if *left == 0 && more {
                tracing::trace!("schedule exhausted");
                core.borrow_mut().cancel_task(&*host);
            }
        }
    });

    let id = match primitive {
        Primitive::Later { delay } => host.run_later(delay, task),
        Primitive::Every { period, .. } => host.run_every(period, task)?,
        Primitive::Timer { delay, period, .. } => host.run_timer(delay, period, task)?,
    };
    core.borrow_mut().task = Some(id);
    Ok(())
}

/// Step-by-step loop: one `run_later` per non-zero delay.
fn drive<S: 'static, I: 'static>(
    core: &Rc<RefCell<RunnerCore<S, I>>>,
    host: &Rc<dyn HostScheduler>,
    mut schedule: Schedule,
) {
    loop {
        let Some(delay) = schedule.next() else {
            tracing::trace!("schedule exhausted");
            core.borrow_mut().task = None;
            return;
        };
        if delay == 0 {
            if !show_frame(core, &**host) {
                return;
            }
            continue;
        }

        let weak_core: Weak<RefCell<RunnerCore<S, I>>> = Rc::downgrade(core);
        let weak_host: Weak<dyn HostScheduler> = Rc::downgrade(host);
        let mut pending = Some(schedule);
        let id = host.run_later(
            delay,
            Box::new(move || {
                let (Some(core), Some(host), Some(schedule)) =
                    (weak_core.upgrade(), weak_host.upgrade(), pending.take())
                else {
                    return;
                };
                core.borrow_mut().task = None;
                if show_frame(&core, &*host) {
                    drive(&core, &host, schedule);
                }
            }),
        );
        core.borrow_mut().task = Some(id);
        return;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/runner.rs"]
mod tests;
