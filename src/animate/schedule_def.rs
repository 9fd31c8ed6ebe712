use std::path::Path;

use anyhow::Context as _;

use crate::animate::schedule::Schedule;
use crate::foundation::error::{SlotframeError, SlotframeResult};

/// Serializable description of a [`Schedule`] tree.
///
/// ```
/// use slotframe::ScheduleDef;
///
/// let def = ScheduleDef::from_json(
///     r#"{"kind": "append", "first": {"kind": "now"}, "then": {"kind": "fixed_rate", "period": 5}}"#,
/// )
/// .unwrap();
/// let mut schedule = def.build();
/// assert_eq!(schedule.next(), Some(0));
/// assert_eq!(schedule.next(), Some(5));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum ScheduleDef {
    Once {
        delay: u64,
    },
    Now,
    FixedRate {
        period: u64,
    },
    Delays {
        delays: Vec<u64>,
    },
    LimitSteps {
        steps: u64,
        inner: Box<ScheduleDef>,
    },
    LimitTime {
        ticks: u64,
        inner: Box<ScheduleDef>,
    },
    Append {
        first: Box<ScheduleDef>,
        then: Box<ScheduleDef>,
    },
    Repeat {
        inner: Box<ScheduleDef>,
    },
}

impl ScheduleDef {
    /// Parse a JSON definition.
    pub fn from_json(text: &str) -> SlotframeResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a JSON definition file.
    ///
    /// # Errors
    ///
    /// [`SlotframeError::Other`] when the file cannot be read, [`SlotframeError::Serde`] when
    /// it is not a valid definition.
    pub fn from_path(path: &Path) -> SlotframeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read schedule '{}'", path.display()))?;
        serde_json::from_str(&text)
            .map_err(|err| SlotframeError::serde(format!("schedule '{}': {err}", path.display())))
    }

    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SlotframeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fresh schedule at its first delay.
    pub fn build(&self) -> Schedule {
        match self {
            Self::Once { delay } => Schedule::once(*delay),
            Self::Now => Schedule::now(),
            Self::FixedRate { period } => Schedule::fixed_rate(*period),
            Self::Delays { delays } => Schedule::of(delays.iter().copied()),
            Self::LimitSteps { steps, inner } => inner.build().limit_steps(*steps),
            Self::LimitTime { ticks, inner } => inner.build().limit_time(*ticks),
            Self::Append { first, then } => first.build().append(then.build()),
            Self::Repeat { inner } => inner.build().repeat(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animate/schedule_def.rs"]
mod tests;
