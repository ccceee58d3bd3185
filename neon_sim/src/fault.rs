//! Arithmetic fault demonstration.
//!
//! `10 / 0` is evaluated with checked division; the fault is reported with a
//! kind-specific message and the cleanup line is printed on every path.

use scopeguard::guard;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;
use tracing::debug;

pub const CLEANUP_MESSAGE: &str = "🔄 Cleanup completed";

/// Integer arithmetic faults.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FaultError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    Overflow,
}

/// What the demonstration observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FaultOutcome {
    /// Division succeeded
    Completed(i64),
    /// Caught by the division-by-zero branch
    MathError(String),
    /// Caught by the fallback branch
    Unexpected(String),
}

/// Checked `a / b`.
pub fn divide(a: i64, b: i64) -> Result<i64, FaultError> {
    if b == 0 {
        return Err(FaultError::DivisionByZero);
    }
    a.checked_div(b).ok_or(FaultError::Overflow)
}

/// Divides `a` by `b`, reports the outcome on `out` and always ends with
/// [`CLEANUP_MESSAGE`].
pub fn guarded_divide<W: Write>(out: &mut W, a: i64, b: i64) -> io::Result<FaultOutcome> {
    let mut out = guard(out, |out| {
        let _ = writeln!(out, "{CLEANUP_MESSAGE}");
    });

    let outcome = match divide(a, b) {
        Ok(result) => {
            debug!(a, b, result, "division completed");
            FaultOutcome::Completed(result)
        }
        Err(e @ FaultError::DivisionByZero) => {
            writeln!(out, "⚠️ Mathematical error: {e}")?;
            FaultOutcome::MathError(e.to_string())
        }
        Err(e) => {
            writeln!(out, "❌ Unexpected error: {e}")?;
            FaultOutcome::Unexpected(e.to_string())
        }
    };

    Ok(outcome)
}

/// The fixed `10 / 0` demonstration.
pub fn run_fault_demo<W: Write>(out: &mut W) -> io::Result<FaultOutcome> {
    guarded_divide(out, 10, 0)
}
