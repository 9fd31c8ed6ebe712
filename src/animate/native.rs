use crate::animate::schedule::{Node, Schedule};
use crate::host::scheduler::HostCaps;

/// A schedule shape that a single host task can express.
///
/// Recognition is purely structural; shapes it does not know run on the step-by-step loop,
/// which yields the same frame timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NativePlan {
    /// One frame after `delay` ticks.
    Once {
        /// Ticks until the frame.
        delay: u64,
    },
    /// First frame after `delay` ticks, then one every `period` ticks.
    Timer {
        /// Ticks until the first frame.
        delay: u64,
        /// Ticks between later frames.
        period: u64,
        /// Total number of frames, unbounded when `None`.
        max_runs: Option<u64>,
    },
}

/// Host call chosen for a [`NativePlan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Primitive {
    /// `run_later(delay)`.
    Later { delay: u64 },
    /// `run_every(period)`, cancelled after `runs` runs.
    Every { period: u64, runs: Option<u64> },
    /// `run_timer(delay, period)`, cancelled after `runs` runs.
    Timer {
        delay: u64,
        period: u64,
        runs: Option<u64>,
    },
}

impl Primitive {
    /// Number of runs before the task cancels itself.
    pub fn runs(&self) -> Option<u64> {
        match self {
            Self::Later { .. } => Some(1),
            Self::Every { runs, .. } | Self::Timer { runs, .. } => *runs,
        }
    }
}

/// How a plan executes on a given host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Binding {
    /// Apply one frame synchronously before registering anything.
    pub immediate: bool,
    /// Task to register afterwards, if frames remain.
    pub primitive: Option<Primitive>,
}

impl NativePlan {
    /// Match `schedule` against the shapes a single host task can run.
    pub fn recognize(schedule: &Schedule) -> Option<Self> {
        recognize_node(schedule.node())
    }

    /// Frames this plan produces, unbounded when `None`.
    pub fn max_runs(&self) -> Option<u64> {
        match self {
            Self::Once { .. } => Some(1),
            Self::Timer { max_runs, .. } => *max_runs,
        }
    }

    /// Pick the host call for this plan, or `None` when `caps` cannot express it.
    ///
    /// A zero first delay becomes an immediate frame, the same way the step-by-step loop
    /// applies zero delays synchronously. Zero periods never bind.
    pub fn bind(&self, caps: HostCaps) -> Option<Binding> {
        match *self {
            Self::Once { delay: 0 } => Some(Binding {
                immediate: true,
                primitive: None,
            }),
            Self::Once { delay } => Some(Binding {
                immediate: false,
                primitive: Some(Primitive::Later { delay }),
            }),
            Self::Timer { period: 0, .. } => None,
            Self::Timer {
                delay,
                period,
                max_runs,
            } => {
                let (immediate, first, runs) = if delay == 0 {
                    (true, period, max_runs.map(|n| n.saturating_sub(1)))
                } else {
                    (false, delay, max_runs)
                };
                let primitive = match runs {
                    Some(0) => None,
                    Some(1) => Some(Primitive::Later { delay: first }),
                    _ if first == period && caps.repeating => {
                        Some(Primitive::Every { period, runs })
                    }
                    _ if caps.delayed_repeating => Some(Primitive::Timer {
                        delay: first,
                        period,
                        runs,
                    }),
                    _ => return None,
                };
                Some(Binding {
                    immediate,
                    primitive,
                })
            }
        }
    }
}

fn recognize_node(node: &Node) -> Option<NativePlan> {
    match node {
        Node::Once { delay, done: false } => Some(NativePlan::Once { delay: *delay }),
        Node::FixedRate { period } => Some(NativePlan::Timer {
            delay: *period,
            period: *period,
            max_runs: None,
        }),
        Node::Concat(first, then) => match (&**first, &**then) {
            (Node::Once { delay, done: false }, Node::FixedRate { period }) => {
                Some(NativePlan::Timer {
                    delay: *delay,
                    period: *period,
                    max_runs: None,
                })
            }
            _ => None,
        },
        Node::StepLimited {
            inner,
            limit,
            passed,
        } => {
            let remaining = limit.saturating_sub(*passed);
            cap_runs(recognize_node(inner)?, remaining)
        }
        Node::TimeLimited {
            inner,
            limit,
            elapsed,
        } => {
            let budget = limit.checked_sub(*elapsed)?;
            match recognize_node(inner)? {
                NativePlan::Once { delay } => {
                    (delay <= budget).then_some(NativePlan::Once { delay })
                }
                NativePlan::Timer { delay, .. } if delay > budget => None,
                plan @ NativePlan::Timer { period: 0, .. } => Some(plan),
                plan @ NativePlan::Timer { delay, period, .. } => {
                    cap_runs(plan, 1 + (budget - delay) / period)
                }
            }
        }
        Node::Once { done: true, .. } | Node::Delays { .. } | Node::Repeat(_) => None,
    }
}

/// Tighten `plan` to at most `runs` frames; `None` when no frame is left.
fn cap_runs(plan: NativePlan, runs: u64) -> Option<NativePlan> {
    if runs == 0 {
        return None;
    }
    match plan {
        NativePlan::Once { .. } => Some(plan),
        NativePlan::Timer {
            delay,
            period,
            max_runs,
        } => Some(NativePlan::Timer {
            delay,
            period,
            max_runs: Some(max_runs.map_or(runs, |n| n.min(runs))),
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/native.rs"]
mod tests;
