use std::fmt;
use std::sync::Arc;

use crate::animate::frame::Frame;
use crate::foundation::error::{SlotframeError, SlotframeResult};

/// Successor function of an infinite animation.
pub type FrameStep<S, I> = Arc<dyn Fn(&Frame<S, I>) -> Frame<S, I> + Send + Sync>;

/// Lazy sequence of frames with a resettable cursor.
///
/// Cloning yields an independent cursor at the same position; frames and successor functions
/// are shared.
pub struct Animation<S, I> {
    node: Node<S, I>,
}

enum Node<S, I> {
    Frames {
        frames: Arc<[Frame<S, I>]>,
        index: usize,
    },
    Infinite {
        seed: Frame<S, I>,
        step: FrameStep<S, I>,
        current: Frame<S, I>,
    },
    Concat(Box<Node<S, I>>, Box<Node<S, I>>),
    Continuous(Box<Node<S, I>>),
    Limit {
        inner: Box<Node<S, I>>,
        limit: usize,
        count: usize,
    },
}

impl<S, I> Clone for Node<S, I> {
    fn clone(&self) -> Self {
        match self {
            Self::Frames { frames, index } => Self::Frames {
                frames: frames.clone(),
                index: *index,
            },
            Self::Infinite {
                seed,
                step,
                current,
            } => Self::Infinite {
                seed: seed.clone(),
                step: step.clone(),
                current: current.clone(),
            },
            Self::Concat(a, b) => Self::Concat(a.clone(), b.clone()),
            Self::Continuous(inner) => Self::Continuous(inner.clone()),
            Self::Limit {
                inner,
                limit,
                count,
            } => Self::Limit {
                inner: inner.clone(),
                limit: *limit,
                count: *count,
            },
        }
    }
}

impl<S, I> Clone for Animation<S, I> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
        }
    }
}

impl<S: 'static, I: 'static> Animation<S, I> {
    /// Finite, restartable animation over `frames`. Fails on an empty list.
    pub fn of_frames(frames: impl IntoIterator<Item = Frame<S, I>>) -> SlotframeResult<Self> {
        let frames: Arc<[Frame<S, I>]> = frames.into_iter().collect();
        if frames.is_empty() {
            return Err(SlotframeError::validation(
                "an animation needs at least one frame",
            ));
        }
        Ok(Self::from_node(Node::Frames { frames, index: 0 }))
    }

    /// Endless animation `seed, step(seed), step(step(seed)), ...`.
    pub fn infinite(
        seed: Frame<S, I>,
        step: impl Fn(&Frame<S, I>) -> Frame<S, I> + Send + Sync + 'static,
    ) -> Self {
        Self::from_node(Node::Infinite {
            current: seed.clone(),
            seed,
            step: Arc::new(step),
        })
    }

    fn from_node(node: Node<S, I>) -> Self {
        Self { node }
    }

    /// `true` while another frame can be drawn.
    pub fn has_next_frame(&self) -> bool {
        self.node.has_next()
    }

    /// Draw the next frame.
    ///
    /// # Panics
    ///
    /// Panics when the animation is exhausted.
    pub fn next_frame(&mut self) -> Frame<S, I> {
        assert!(
            self.has_next_frame(),
            "Animation::next_frame called on exhausted animation"
        );
        self.node.next_frame()
    }

    /// Rewind to the first frame.
    pub fn reset(&mut self) {
        self.node.reset();
    }

    /// `true` when the animation never runs out of frames.
    pub fn is_infinite(&self) -> bool {
        self.node.is_infinite()
    }

    /// Play `self` to the end, then `next`.
    pub fn and_then(self, next: Animation<S, I>) -> Self {
        match (self.node, next.node) {
            (node @ (Node::Infinite { .. } | Node::Continuous(_)), _) => Self::from_node(node),
            (
                Node::Frames { frames: a, index },
                Node::Frames {
                    frames: b,
                    index: 0,
                },
            ) => {
                let frames: Arc<[Frame<S, I>]> = a.iter().chain(b.iter()).cloned().collect();
                Self::from_node(Node::Frames { frames, index })
            }
            (a, b) => Self::from_node(Node::Concat(Box::new(a), Box::new(b))),
        }
    }

    /// Restart from the first frame whenever the animation runs out.
    pub fn continuously(self) -> Self {
        if self.is_infinite() {
            return self;
        }
        let mut probe = self.node.clone();
        probe.reset();
        if !probe.has_next() {
            return self;
        }
        Self::from_node(Node::Continuous(Box::new(self.node)))
    }

    /// Cap the number of frames drawn since the last reset.
    pub fn limit(self, frames: usize) -> Self {
        match self.node {
            Node::Limit {
                inner,
                limit,
                count,
            } => Self::from_node(Node::Limit {
                inner,
                limit: frames.min(limit),
                count,
            }),
            node => Self::from_node(Node::Limit {
                inner: Box::new(node),
                limit: frames,
                count: 0,
            }),
        }
    }
}

impl<S: 'static, I: 'static> Node<S, I> {
    fn has_next(&self) -> bool {
        match self {
            Self::Frames { frames, index } => *index < frames.len(),
            Self::Infinite { .. } | Self::Continuous(_) => true,
            Self::Concat(a, b) => a.has_next() || b.has_next(),
            Self::Limit {
                inner,
                limit,
                count,
            } => count < limit && inner.has_next(),
        }
    }

    fn next_frame(&mut self) -> Frame<S, I> {
        match self {
            Self::Frames { frames, index } => {
                let frame = frames[*index].clone();
                *index += 1;
                frame
            }
            Self::Infinite { step, current, .. } => {
                let next = step(&*current);
                std::mem::replace(current, next)
            }
            Self::Concat(a, b) => {
                if a.has_next() {
                    a.next_frame()
                } else {
                    b.next_frame()
                }
            }
            Self::Continuous(inner) => {
                if !inner.has_next() {
                    inner.reset();
                }
                inner.next_frame()
            }
            Self::Limit { inner, count, .. } => {
                *count += 1;
                inner.next_frame()
            }
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Frames { index, .. } => *index = 0,
            Self::Infinite { seed, current, .. } => *current = seed.clone(),
            Self::Concat(a, b) => {
                a.reset();
                b.reset();
            }
            Self::Continuous(inner) => inner.reset(),
            Self::Limit { inner, count, .. } => {
                inner.reset();
                *count = 0;
            }
        }
    }

    fn is_infinite(&self) -> bool {
        match self {
            Self::Infinite { .. } | Self::Continuous(_) => true,
            Self::Frames { .. } | Self::Limit { .. } => false,
            Self::Concat(a, b) => a.is_infinite() || b.is_infinite(),
        }
    }
}

impl<S, I> fmt::Debug for Animation<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl<S, I> fmt::Debug for Node<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frames { frames, index } => f
                .debug_struct("Frames")
                .field("len", &frames.len())
                .field("index", index)
                .finish(),
            Self::Infinite { .. } => f.debug_struct("Infinite").finish_non_exhaustive(),
            Self::Concat(a, b) => f.debug_tuple("Concat").field(a).field(b).finish(),
            Self::Continuous(inner) => f.debug_tuple("Continuous").field(inner).finish(),
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
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/animation.rs"]
mod tests;
