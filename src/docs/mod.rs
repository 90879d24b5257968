//! Human-readable documentation of states, transition types and rules.
//!
//! Documentation is collected during setup alongside rule registration and is
//! only consulted when exporting. It never influences matching.

use crate::core::{State, TransitionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;
pub mod export;

pub use error::ExportError;
pub use export::{DescriptionExport, ExportDocument, RuleEdge, RuleExport, StateNode};

/// Name and description attached to a state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDoc {
    /// A human readable name for the state
    pub name: String,

    /// A more verbose description of the state
    pub description: String,
}

impl StateDoc {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Name and description attached to a transition type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTypeDoc {
    /// A human readable name for the transition type
    pub name: String,

    /// A more verbose description of the transition type
    pub description: String,
}

impl TransitionTypeDoc {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Documentation registered for a state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Documentation {
    states: BTreeMap<State, StateDoc>,
    transition_types: BTreeMap<TransitionType, TransitionTypeDoc>,
}

impl Documentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach documentation to a state, replacing any earlier entry.
    pub fn describe_state(&mut self, state: State, doc: StateDoc) {
        self.states.insert(state, doc);
    }

    /// Attach documentation to a transition type, replacing any earlier entry.
    pub fn describe_transition_type(
        &mut self,
        transition_type: TransitionType,
        doc: TransitionTypeDoc,
    ) {
        self.transition_types.insert(transition_type, doc);
    }

    pub fn state(&self, state: &str) -> Option<&StateDoc> {
        self.states.get(state)
    }

    pub fn transition_type(&self, transition_type: &str) -> Option<&TransitionTypeDoc> {
        self.transition_types.get(transition_type)
    }

    /// Documented states in ascending order.
    pub fn states(&self) -> impl Iterator<Item = (&State, &StateDoc)> {
        self.states.iter()
    }

    /// Documented transition types in ascending order.
    pub fn transition_types(&self) -> impl Iterator<Item = (&TransitionType, &TransitionTypeDoc)> {
        self.transition_types.iter()
    }
}
