use thiserror::Error;

use crate::domain::{InterestPhase, SaveKind, View};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunnelError {
    #[error("invalid transition: `{trigger}` is not allowed from {from}")]
    InvalidTransition { from: View, trigger: &'static str },
    #[error("invalid interest form transition: `{trigger}` is not allowed from {from}")]
    InvalidInterestTransition {
        from: InterestPhase,
        trigger: &'static str,
    },
    #[error("unknown cohort `{0}`")]
    InvalidCohort(String),
    #[error("unknown {field} option `{value}`")]
    InvalidOption { field: &'static str, value: String },
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("{0} submission was not saved")]
    SaveRejected(SaveKind),
}

impl FunnelError {
    pub fn invalid_transition(from: View, trigger: &'static str) -> Self {
        Self::InvalidTransition { from, trigger }
    }
}
