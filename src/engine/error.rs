//! Errors surfaced by registration and by running transitions.

use crate::core::{BoxError, State, TransitionType};
use crate::engine::rule::RuleRef;
use crate::validation::RuleViolation;
use thiserror::Error;

/// Errors that can occur while running a transition against an entity.
///
/// Every variant names the transition type that was invoked and the state the
/// entity was in when it was invoked.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("no transition rule for '{transition_type}' matches state '{state}'")]
    NoMatchingTransition {
        transition_type: TransitionType,
        state: State,
    },

    #[error("transition action of rule {rule} for '{transition_type}' from state '{state}' failed: {source}")]
    TransitionActionFailed {
        transition_type: TransitionType,
        state: State,
        rule: RuleRef,
        #[source]
        source: BoxError,
    },

    #[error("failed to set state '{destination}' by rule {rule} for '{transition_type}' from state '{state}': {source}")]
    StateAssignmentFailed {
        transition_type: TransitionType,
        state: State,
        destination: State,
        rule: RuleRef,
        #[source]
        source: BoxError,
    },

    #[error("post-transition action of rule {rule} for '{transition_type}' from state '{state}' failed: {source}")]
    PostTransitionActionFailed {
        transition_type: TransitionType,
        state: State,
        destination: State,
        rule: RuleRef,
        #[source]
        source: BoxError,
    },
}

impl RunError {
    /// The transition type that was invoked.
    pub fn transition_type(&self) -> &TransitionType {
        match self {
            RunError::NoMatchingTransition {
                transition_type, ..
            }
            | RunError::TransitionActionFailed {
                transition_type, ..
            }
            | RunError::StateAssignmentFailed {
                transition_type, ..
            }
            | RunError::PostTransitionActionFailed {
                transition_type, ..
            } => transition_type,
        }
    }

    /// The entity state observed when the transition was invoked.
    pub fn state(&self) -> &State {
        match self {
            RunError::NoMatchingTransition { state, .. }
            | RunError::TransitionActionFailed { state, .. }
            | RunError::StateAssignmentFailed { state, .. }
            | RunError::PostTransitionActionFailed { state, .. } => state,
        }
    }

    /// The rule that fired, absent when no rule matched.
    pub fn rule(&self) -> Option<&RuleRef> {
        match self {
            RunError::NoMatchingTransition { .. } => None,
            RunError::TransitionActionFailed { rule, .. }
            | RunError::StateAssignmentFailed { rule, .. }
            | RunError::PostTransitionActionFailed { rule, .. } => Some(rule),
        }
    }

    /// Returns whether no applicable rule was found.
    pub fn is_no_match(&self) -> bool {
        matches!(self, RunError::NoMatchingTransition { .. })
    }

    /// Returns whether the entity's state was changed before the error occurred.
    pub fn state_committed(&self) -> bool {
        matches!(self, RunError::PostTransitionActionFailed { .. })
    }

    /// Returns a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            RunError::NoMatchingTransition { .. } => "NO_MATCHING_TRANSITION",
            RunError::TransitionActionFailed { .. } => "TRANSITION_ACTION_FAILED",
            RunError::StateAssignmentFailed { .. } => "STATE_ASSIGNMENT_FAILED",
            RunError::PostTransitionActionFailed { .. } => "POST_TRANSITION_ACTION_FAILED",
        }
    }
}

/// Errors that can occur when registering a transition rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("invalid transition rule for '{transition_type}': {}", join_violations(.violations))]
    InvalidRule {
        transition_type: TransitionType,
        violations: Vec<RuleViolation>,
    },
}

fn join_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
