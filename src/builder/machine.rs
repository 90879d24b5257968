//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionRuleBuilder;
use crate::core::{State, TransitionType};
use crate::docs::{StateDoc, TransitionTypeDoc};
use crate::engine::{StateMachine, TransitionRule};

/// Builder for constructing state machines with a fluent API.
///
/// Everything registered through the builder happens in the setup phase; the
/// built machine is ready to be shared and run.
pub struct StateMachineBuilder<E: ?Sized, A: ?Sized = ()> {
    machine: StateMachine<E, A>,
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> StateMachineBuilder<E, A> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            machine: StateMachine::new(),
        }
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(self, builder: TransitionRuleBuilder<E, A>) -> Result<Self, BuildError> {
        let rule = builder.build()?;
        self.add_rule(rule)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: TransitionRule<E, A>) -> Result<Self, BuildError> {
        self.machine.add_transition(rule)?;
        Ok(self)
    }

    /// Add multiple rules at once, in order.
    pub fn rules(
        mut self,
        rules: impl IntoIterator<Item = TransitionRule<E, A>>,
    ) -> Result<Self, BuildError> {
        for rule in rules {
            self.machine.add_transition(rule)?;
        }
        Ok(self)
    }

    /// Document a state.
    pub fn describe_state(mut self, state: impl Into<State>, doc: StateDoc) -> Self {
        self.machine.describe_state(state, doc);
        self
    }

    /// Document a transition type.
    pub fn describe_transition_type(
        mut self,
        transition_type: impl Into<TransitionType>,
        doc: TransitionTypeDoc,
    ) -> Self {
        self.machine.describe_transition_type(transition_type, doc);
        self
    }

    /// Finish setup.
    pub fn build(self) -> StateMachine<E, A> {
        self.machine
    }
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> Default for StateMachineBuilder<E, A> {
    fn default() -> Self {
        Self::new()
    }
}
