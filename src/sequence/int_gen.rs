use std::fmt;
use std::sync::Arc;

use crate::foundation::error::{SlotframeError, SlotframeResult};

/// Pure `i32 -> i32` function shared between generator copies.
pub type IntFn = Arc<dyn Fn(i32) -> i32 + Send + Sync>;

/// Lazy, resettable sequence of `i32` values.
///
/// A generator is an owned cursor over shared immutable data: cloning one yields an independent
/// cursor at the same position, and `reset()` followed by a full drain always reproduces the
/// original sequence.
#[derive(Clone)]
pub struct IntGenerator {
    node: Node,
}

#[derive(Clone)]
enum Node {
    Array { ints: Arc<[i32]>, index: usize },
    Constant(i32),
    Iterate { seed: i32, step: IntFn, state: i32 },
    // state is i64 so that `state += step` past `end` cannot overflow
    Range { start: i32, end: i32, step: i32, state: i64 },
    Concat(Box<Node>, Box<Node>),
    Cycle(Box<Node>),
    Limit { inner: Box<Node>, limit: usize, count: usize },
    Map { inner: Box<Node>, f: IntFn },
}

impl IntGenerator {
    /// Generator over a fixed list of values.
    pub fn of(ints: impl IntoIterator<Item = i32>) -> Self {
        Self::from_node(Node::Array {
            ints: ints.into_iter().collect(),
            index: 0,
        })
    }

    /// Infinite generator that always yields `constant`.
    pub fn repeat(constant: i32) -> Self {
        Self::from_node(Node::Constant(constant))
    }

    /// Infinite generator `seed, f(seed), f(f(seed)), ...`.
    pub fn iterate(seed: i32, f: impl Fn(i32) -> i32 + Send + Sync + 'static) -> Self {
        Self::from_node(Node::Iterate {
            seed,
            step: Arc::new(f),
            state: seed,
        })
    }

    /// Generator over `start..end_exclusive` in increments of `step`.
    pub fn range(start: i32, end_exclusive: i32, step: i32) -> SlotframeResult<Self> {
        if start >= end_exclusive {
            return Err(SlotframeError::validation(format!(
                "range start ({start}) must be lower than end ({end_exclusive})"
            )));
        }
        if step <= 0 {
            return Err(SlotframeError::validation(format!(
                "range step must be positive, got {step}"
            )));
        }
        Ok(Self::from_node(Node::Range {
            start,
            end: end_exclusive,
            step,
            state: i64::from(start),
        }))
    }

    fn from_node(node: Node) -> Self {
        Self { node }
    }

    /// `true` while another value can be drawn.
    pub fn has_next(&self) -> bool {
        self.node.has_next()
    }

    /// Draw the next value.
    ///
    /// # Panics
    ///
    /// Panics when the generator is exhausted; check [`IntGenerator::has_next`] first.
    pub fn next_int(&mut self) -> i32 {
        assert!(self.has_next(), "IntGenerator::next_int called on exhausted generator");
        self.node.next_int()
    }

    /// Rewind to the initial state. Idempotent.
    pub fn reset(&mut self) {
        self.node.reset();
    }

    /// Structural infiniteness: `true` when draining would never terminate.
    pub fn is_infinite(&self) -> bool {
        self.node.is_infinite()
    }

    /// Yield all values of `self`, then all values of `next`.
    pub fn concat(self, next: IntGenerator) -> Self {
        match (self.node, next.node) {
            // infinite heads never reach the tail
            (node @ (Node::Constant(_) | Node::Iterate { .. } | Node::Cycle(_)), _) => {
                Self::from_node(node)
            }
            (Node::Array { ints: a, index }, Node::Array { ints: b, index: 0 }) => {
                let ints: Arc<[i32]> = a.iter().chain(b.iter()).copied().collect();
                Self::from_node(Node::Array { ints, index })
            }
            (a, b) => Self::from_node(Node::Concat(Box::new(a), Box::new(b))),
        }
    }

    /// Restart from the beginning whenever the source runs out.
    pub fn cycled(self) -> Self {
        if self.is_infinite() {
            return self;
        }
        let mut probe = self.node.clone();
        probe.reset();
        if !probe.has_next() {
            // nothing to cycle over
            return self;
        }
        Self::from_node(Node::Cycle(Box::new(self.node)))
    }

    /// Cap the number of values drawn since the last reset.
    pub fn limit(self, limit: usize) -> Self {
        match self.node {
            Node::Limit {
                inner,
                limit: current,
                count,
            } => Self::from_node(Node::Limit {
                inner,
                limit: limit.min(current),
                count,
            }),
            Node::Array { ints, index: 0 } if limit < ints.len() => {
                Self::from_node(Node::Array {
                    ints: ints[..limit].into(),
                    index: 0,
                })
            }
            Node::Array { ints, index } if limit >= ints.len() => {
                Self::from_node(Node::Array { ints, index })
            }
            node => Self::from_node(Node::Limit {
                inner: Box::new(node),
                limit,
                count: 0,
            }),
        }
    }

    /// Lazily transform every produced value.
    pub fn map(self, f: impl Fn(i32) -> i32 + Send + Sync + 'static) -> Self {
        Self::from_node(self.node.map(Arc::new(f)))
    }
}

impl Node {
    fn has_next(&self) -> bool {
        match self {
            Self::Array { ints, index } => *index < ints.len(),
            Self::Constant(_) | Self::Iterate { .. } | Self::Cycle(_) => true,
            Self::Range { end, state, .. } => *state < i64::from(*end),
            Self::Concat(a, b) => a.has_next() || b.has_next(),
            Self::Limit {
                inner,
                limit,
                count,
            } => count < limit && inner.has_next(),
            Self::Map { inner, .. } => inner.has_next(),
        }
    }

    fn next_int(&mut self) -> i32 {
        match self {
            Self::Array { ints, index } => {
                let value = ints[*index];
                *index += 1;
                value
            }
            Self::Constant(value) => *value,
            Self::Iterate { step, state, .. } => {
                let value = *state;
                *state = step(value);
                value
            }
            Self::Range { step, state, .. } => {
                // has_next guarantees state < end, so it fits in i32
                let value = *state as i32;
                *state += i64::from(*step);
                value
            }
            Self::Concat(a, b) => {
                if a.has_next() {
                    a.next_int()
                } else {
                    b.next_int()
                }
            }
            Self::Cycle(inner) => {
                if !inner.has_next() {
                    inner.reset();
                }
                let value = inner.next_int();
                if !inner.has_next() {
                    inner.reset();
                }
                value
            }
            Self::Limit { inner, count, .. } => {
                *count += 1;
                inner.next_int()
            }
            Self::Map { inner, f } => f(inner.next_int()),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Array { index, .. } => *index = 0,
            Self::Constant(_) => {}
            Self::Iterate { seed, state, .. } => *state = *seed,
            Self::Range { start, state, .. } => *state = i64::from(*start),
            Self::Concat(a, b) => {
                a.reset();
                b.reset();
            }
            Self::Cycle(inner) | Self::Map { inner, .. } => inner.reset(),
            Self::Limit { inner, count, .. } => {
                inner.reset();
                *count = 0;
            }
        }
    }

    fn is_infinite(&self) -> bool {
        match self {
            Self::Constant(_) | Self::Iterate { .. } | Self::Cycle(_) => true,
            Self::Array { .. } | Self::Range { .. } | Self::Limit { .. } => false,
            Self::Concat(a, b) => a.is_infinite() || b.is_infinite(),
            Self::Map { inner, .. } => inner.is_infinite(),
        }
    }

    fn map(self, f: IntFn) -> Node {
        match self {
            Self::Constant(value) => Self::Constant(f(value)),
            Self::Map { inner, f: first } => Self::Map {
                inner,
                f: Arc::new(move |v| f(first(v))),
            },
            Self::Limit {
                inner,
                limit,
                count,
            } => Self::Limit {
                inner: Box::new(inner.map(f)),
                limit,
                count,
            },
            Self::Concat(a, b) => Self::Concat(Box::new(a.map(f.clone())), Box::new(b.map(f))),
            Self::Cycle(inner) => Self::Cycle(Box::new(inner.map(f))),
            node @ (Self::Array { .. } | Self::Iterate { .. } | Self::Range { .. }) => Self::Map {
                inner: Box::new(node),
                f,
            },
        }
    }
}

impl Iterator for IntGenerator {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.has_next().then(|| self.node.next_int())
    }
}

impl fmt::Debug for IntGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array { ints, index } => f
                .debug_struct("Array")
                .field("ints", ints)
                .field("index", index)
                .finish(),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Iterate { seed, state, .. } => f
                .debug_struct("Iterate")
                .field("seed", seed)
                .field("state", state)
                .finish_non_exhaustive(),
            Self::Range {
                start,
                end,
                step,
                state,
            } => f
                .debug_struct("Range")
                .field("start", start)
                .field("end", end)
                .field("step", step)
                .field("state", state)
                .finish(),
            Self::Concat(a, b) => f.debug_tuple("Concat").field(a).field(b).finish(),
            Self::Cycle(inner) => f.debug_tuple("Cycle").field(inner).finish(),
            Self::Limit {
                inner,
                limit,
                count,
            } => f
                .debug_struct("Limit")
                .field("inner", inner)
                .field("limit", limit)
                .field("count", count)
                .finish(),
            Self::Map { inner, .. } => f
                .debug_struct("Map")
                .field("inner", inner)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/int_gen.rs"]
mod tests;
