//! Slotframe animates content on fixed-size grids of addressable slots.
//!
//! The engine is declarative: what to draw and when to draw it are both lazy, resettable
//! values built from small combinators.
//!
//! # Pieces
//!
//! - [`IntGenerator`]: lazy integer sequences, used to pick the slots a frame touches.
//! - [`Pattern`] and [`Mask`]: slot index to symbol, then symbol to [`SlotUpdate`].
//!   [`BorderPattern`], [`CheckerboardPattern`], [`RowStrip`], [`ColumnStrip`] and [`Shape`]
//!   are ready-made patterns.
//! - [`Frame`]: one batch of slot updates.
//! - [`Animation`]: a sequence of frames.
//! - [`Schedule`]: the delays between frames, in host ticks.
//! - [`AnimationRunner`]: plays an animation against a schedule on a [`HostScheduler`].
//!
//! # Scheduling
//!
//! Before playing, the runner checks whether the schedule has a shape one host task can express
//! (see [`NativePlan`]): a one-shot, a fixed rate, a one-shot followed by a fixed rate, or any of
//! those under step or time limits. Those shapes run as a single `run_later`, `run_every` or
//! `run_timer` task. Every other schedule runs step by step with one `run_later` per frame.
//! Both paths apply frames on the same ticks.
//!
//! [`TickScheduler`] is a deterministic host for tests and simulations.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animate;
mod foundation;
mod host;
mod mask;
mod sequence;

pub use animate::animation::{Animation, FrameStep};
pub use animate::frame::Frame;
pub use animate::native::{Binding, NativePlan, Primitive};
pub use animate::runner::{AnimationRunner, AnimationState, RunnerOpts};
pub use animate::schedule::Schedule;
pub use animate::schedule_def::ScheduleDef;
pub use foundation::error::{SlotframeError, SlotframeResult};
pub use foundation::slot::SlotUpdate;
pub use host::scheduler::{HostCaps, HostScheduler, TaskFn, TaskId};
pub use host::tick::TickScheduler;
pub use mask::item_mask::Mask;
pub use mask::pattern::Pattern;
pub use mask::patterns::{
    Border, BorderPattern, CheckerboardPattern, ColumnStrip, GRID_COLUMNS, RowStrip, Tile,
};
pub use mask::shape::{ContainerType, Shape, SlotKind};
pub use sequence::int_gen::{IntFn, IntGenerator};
