use crate::recorder::SessionState;
use thiserror::Error;

/// Reasons a single cost expression cannot be normalized into a [`crate::Cost`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    #[error("unknown cost unit '{0}'")]
    UnknownUnit(String),
    #[error("'{0}' is not a non-negative number")]
    InvalidNumber(String),
}

/// A cost expression that failed to parse, keeping the offending input so
/// batch parsing can report which entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid cost expression '{expression}': {reason}")]
pub struct InvalidCostExpression {
    expression: String,
    reason: CostError,
}

impl InvalidCostExpression {
    pub fn new(expression: impl Into<String>, reason: CostError) -> Self {
        Self {
            expression: expression.into(),
            reason,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn reason(&self) -> &CostError {
        &self.reason
    }
}

/// Contract violations on the recording state machine. These indicate a bug
/// in the driving loop and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("'{operation}' is not valid while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
}
