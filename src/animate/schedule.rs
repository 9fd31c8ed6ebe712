use std::sync::Arc;

/// Lazy sequence of inter-frame delays, in host ticks.
///
/// `next()` yields the delay until the next frame, or `None` once the schedule is exhausted.
/// Cloning copies the cursor position; it does not rewind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    node: Node,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Node {
    Once {
        delay: u64,
        done: bool,
    },
    FixedRate {
        period: u64,
    },
    Delays {
        delays: Arc<[u64]>,
        index: usize,
    },
    StepLimited {
        inner: Box<Node>,
        limit: u64,
        passed: u64,
    },
    TimeLimited {
        inner: Box<Node>,
        limit: u64,
        elapsed: u64,
    },
    Concat(Box<Node>, Box<Node>),
    Repeat(Box<Node>),
}

impl Schedule {
    /// Schedule over fixed delays. A single delay is the same as [`Schedule::once`].
    pub fn of(delays: impl IntoIterator<Item = u64>) -> Self {
        let delays: Arc<[u64]> = delays.into_iter().collect();
        if let [delay] = *delays {
            return Self::once(delay);
        }
        Self::from_node(Node::Delays { delays, index: 0 })
    }

    /// One frame after `delay` ticks.
    pub fn once(delay: u64) -> Self {
        Self::from_node(Node::Once { delay, done: false })
    }

    /// One frame, immediately.
    pub fn now() -> Self {
        Self::once(0)
    }

    /// A frame every `period` ticks, forever.
    pub fn fixed_rate(period: u64) -> Self {
        Self::from_node(Node::FixedRate { period })
    }

    fn from_node(node: Node) -> Self {
        Self { node }
    }

    pub(crate) fn node(&self) -> &Node {
        &self.node
    }

    /// Delay until the next frame.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<u64> {
        self.node.next()
    }

    /// Rewind to the first delay.
    pub fn reset(&mut self) {
        self.node.reset();
    }

    /// `true` when the schedule never runs out.
    pub fn is_infinite(&self) -> bool {
        self.node.is_infinite()
    }

    /// Stop after `steps` delays since the last reset.
    pub fn limit_steps(self, steps: u64) -> Self {
        if let Node::Delays { delays, .. } = &self.node
            && steps >= delays.len() as u64
        {
            return self;
        }
        match self.node {
            Node::StepLimited {
                inner,
                limit,
                passed,
            } => Self::from_node(Node::StepLimited {
                inner,
                limit: steps.min(limit),
                passed,
            }),
            Node::FixedRate { period } if steps == 1 => Self::once(period),
            Node::Once { .. } if steps >= 1 => self,
            Node::Delays { delays, index: 0 } => {
                // steps < len here, so the cast is lossless
                let kept = &delays[..steps as usize];
                Self::from_node(Node::Delays {
                    delays: kept.into(),
                    index: 0,
                })
            }
            node => Self::from_node(Node::StepLimited {
                inner: Box::new(node),
                limit: steps,
                passed: 0,
            }),
        }
    }

    /// Stop before the step whose cumulative delay since the last reset exceeds `ticks`.
    ///
    /// ```
    /// use slotframe::Schedule;
    ///
    /// let mut s = Schedule::of([1, 2, 3]).limit_time(5);
    /// assert_eq!(s.next(), Some(1));
    /// assert_eq!(s.next(), Some(2));
    /// assert_eq!(s.next(), None);
    /// ```
    pub fn limit_time(self, ticks: u64) -> Self {
        match self.node {
            Node::TimeLimited {
                inner,
                limit,
                elapsed,
            } => Self::from_node(Node::TimeLimited {
                inner,
                limit: ticks.min(limit),
                elapsed,
            }),
            node => Self::from_node(Node::TimeLimited {
                inner: Box::new(node),
                limit: ticks,
                elapsed: 0,
            }),
        }
    }

    /// Continue with `then` once `self` is exhausted. Infinite schedules absorb it.
    pub fn append(self, then: Schedule) -> Self {
        if self.is_infinite() {
            return self;
        }
        match (self.node, then.node) {
            (
                Node::Delays { delays: a, index },
                Node::Delays {
                    delays: b,
                    index: 0,
                },
            ) => {
                let delays: Arc<[u64]> = a.iter().chain(b.iter()).copied().collect();
                Self::from_node(Node::Delays { delays, index })
            }
            (a, b) => Self::from_node(Node::Concat(Box::new(a), Box::new(b))),
        }
    }

    /// Start over whenever the schedule runs out.
    ///
    /// `once(d).repeat()` is `fixed_rate(d)`. Repeating an infinite or empty schedule returns it
    /// unchanged.
    pub fn repeat(self) -> Self {
        if self.is_infinite() {
            return self;
        }
        match self.node {
            Node::Once { delay, .. } => Self::fixed_rate(delay),
            node => {
                let mut probe = node.clone();
                probe.reset();
                if probe.next().is_none() {
                    return Self::from_node(node);
                }
                Self::from_node(Node::Repeat(Box::new(node)))
            }
        }
    }
}

impl Node {
    fn next(&mut self) -> Option<u64> {
        match self {
            Self::Once { delay, done } => {
                if *done {
                    return None;
                }
                *done = true;
                Some(*delay)
            }
            Self::FixedRate { period } => Some(*period),
            Self::Delays { delays, index } => {
                let delay = delays.get(*index).copied()?;
                *index += 1;
                Some(delay)
            }
            Self::StepLimited {
                inner,
                limit,
                passed,
            } => {
                if *passed >= *limit {
                    return None;
                }
                *passed += 1;
                inner.next()
            }
            Self::TimeLimited {
                inner,
                limit,
                elapsed,
            } => {
                if *elapsed > *limit {
                    return None;
                }
                let delay = inner.next()?;
                *elapsed = elapsed.saturating_add(delay);
                (*elapsed <= *limit).then_some(delay)
            }
            Self::Concat(a, b) => a.next().or_else(|| b.next()),
            Self::Repeat(inner) => inner.next().or_else(|| {
                inner.reset();
                inner.next()
            }),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Once { done, .. } => *done = false,
            Self::FixedRate { .. } => {}
            Self::Delays { index, .. } => *index = 0,
            Self::StepLimited { inner, passed, .. } => {
                inner.reset();
                *passed = 0;
            }
            Self::TimeLimited { inner, elapsed, .. } => {
                inner.reset();
                *elapsed = 0;
            }
            Self::Concat(a, b) => {
                a.reset();
                b.reset();
            }
            Self::Repeat(inner) => inner.reset(),
        }
    }

    fn is_infinite(&self) -> bool {
        match self {
            Self::FixedRate { .. } | Self::Repeat(_) => true,
            Self::Once { .. }
            | Self::Delays { .. }
            | Self::StepLimited { .. }
            | Self::TimeLimited { .. } => false,
            Self::Concat(a, b) => a.is_infinite() || b.is_infinite(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/schedule.rs"]
mod tests;
