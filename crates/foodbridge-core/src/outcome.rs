//! Results that carry non-fatal side-effect warnings.
//!
//! A lifecycle operation commits its primary state change first. Secondary
//! effects (in-app notification records, outbound mail) may then fail
//! without undoing that change; such failures travel alongside the value as
//! [`SideEffectWarning`]s instead of as an `Err`.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// A secondary effect that failed after the primary write committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffectWarning {
    /// Which effect failed, e.g. `"notification:donation_accepted"` or `"mail:donation_accepted"`.
    pub effect: String,
    /// The error kind of the failure.
    pub kind: ErrorKind,
    /// Human-readable failure message.
    pub message: String,
}

impl SideEffectWarning {
    /// Build a warning from the error returned by a side effect.
    pub fn from_error(effect: impl Into<String>, err: &AppError) -> Self {
        Self {
            effect: effect.into(),
            kind: err.kind,
            message: err.message.clone(),
        }
    }
}

/// A successful value plus any side-effect warnings collected on the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome<T> {
    /// The primary result.
    pub value: T,
    /// Secondary failures; empty when every side effect succeeded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SideEffectWarning>,
}

impl<T> Outcome<T> {
    /// Wrap a value with no warnings.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wrap a value with previously collected warnings.
    pub fn with_warnings(value: T, warnings: Vec<SideEffectWarning>) -> Self {
        Self { value, warnings }
    }

    /// Whether every side effect succeeded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Map the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Split into value and warnings.
    pub fn into_parts(self) -> (T, Vec<SideEffectWarning>) {
        (self.value, self.warnings)
    }
}
