//! Violations found while validating a transition rule at registration.

use crate::core::State;
use thiserror::Error;

/// A single problem with a transition rule.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("rule has no source states")]
    NoSourceStates,

    #[error("rule targets the reserved empty state")]
    EmptyDestination,

    #[error("reserved empty state is listed alongside {others} other source state(s)")]
    InitialMixedWithStates { others: usize },

    #[error("state '{state}' is reserved for the empty state in exported documents")]
    ReservedLabel { state: State },
}
