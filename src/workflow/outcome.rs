//! Per-step outcome tagging
//!
//! Required steps turn failures into [`StepOutcome::Fatal`]; best-effort
//! steps turn them into [`StepOutcome::Degraded`] with a fallback value.

use crate::error::{Error, Result};
use crate::workflow::Console;
use tracing::warn;

/// Result of one workflow step
#[derive(Debug)]
pub enum StepOutcome<T> {
    /// Step succeeded
    Ok(T),
    /// Step failed but the workflow continues with `value`
    Degraded {
        /// Fallback value
        value: T,
        /// Why the step degraded
        reason: String,
    },
    /// Step failed and the workflow must stop
    Fatal(Error),
}

impl<T> StepOutcome<T> {
    /// Tag the result of a step the workflow cannot do without
    pub fn required(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Fatal(e),
        }
    }

    /// Tag the result of a step whose failure falls back to `fallback`
    pub fn best_effort_or(result: Result<T>, fallback: T) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Degraded {
                value: fallback,
                reason: e.to_string(),
            },
        }
    }

    /// Tag the result of a step whose failure falls back to `T::default()`
    pub fn best_effort(result: Result<T>) -> Self
    where
        T: Default,
    {
        Self::best_effort_or(result, T::default())
    }

    /// Transform the carried value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StepOutcome<U> {
        match self {
            Self::Ok(value) => StepOutcome::Ok(f(value)),
            Self::Degraded { value, reason } => StepOutcome::Degraded {
                value: f(value),
                reason,
            },
            Self::Fatal(e) => StepOutcome::Fatal(e),
        }
    }

    /// Whether the step fell back to a default
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Collapse into a `Result`, dropping the degradation reason
    pub fn into_result(self) -> Result<T> {
        match self {
            Self::Ok(value) | Self::Degraded { value, .. } => Ok(value),
            Self::Fatal(e) => Err(e),
        }
    }

    /// Collapse into a `Result`, warning on the console when degraded
    pub fn settle(self, console: &dyn Console, step: &str) -> Result<T> {
        if let Self::Degraded { reason, .. } = &self {
            warn!(step, %reason, "step degraded");
            console.warn(&format!("Could not fetch {step}, continuing without: {reason}"));
        }
        self.into_result()
    }

    /// Collapse a best-effort step into its value, warning on the console
    /// when it degraded
    ///
    /// A `Fatal` outcome is reported the same way and yields `T::default()`.
    pub fn settle_best_effort(self, console: &dyn Console, step: &str) -> T
    where
        T: Default,
    {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { value, reason } => {
                warn!(step, %reason, "step degraded");
                console.warn(&format!("Could not fetch {step}, continuing without: {reason}"));
                value
            }
            Self::Fatal(e) => {
                warn!(step, error = %e, "step failed");
                console.warn(&format!("Could not fetch {step}, continuing without: {e}"));
                T::default()
            }
        }
    }
}
