//! Build errors for state machine and transition rule builders.

use crate::engine::RegistrationError;
use thiserror::Error;

/// Errors that can occur when building state machines and transition rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Transition type not specified. Call .on(transition_type)")]
    MissingTransitionType,

    #[error("Destination state not specified. Call .to(state)")]
    MissingDestination,

    #[error(transparent)]
    InvalidRule(#[from] RegistrationError),
}
