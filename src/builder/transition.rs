//! Builder for constructing transition rules.

use crate::builder::error::BuildError;
use crate::core::{BoxError, Condition, State, TransitionType};
use crate::engine::{Action, RegistrationError, RuleDoc, TransitionRule};
use crate::validation::validate_rule;
use stillwater::validation::Validation;

/// Builder for constructing transition rules with a fluent API.
pub struct TransitionRuleBuilder<E: ?Sized, A: ?Sized = ()> {
    transition_type: Option<TransitionType>,
    sources: Vec<State>,
    destination: Option<State>,
    condition: Option<Condition<E, A>>,
    transition: Option<Action<E, A>>,
    post_transition: Option<Action<E, A>>,
    documentation: RuleDoc,
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> TransitionRuleBuilder<E, A> {
    /// Create a new transition rule builder.
    pub fn new() -> Self {
        Self {
            transition_type: None,
            sources: Vec::new(),
            destination: None,
            condition: None,
            transition: None,
            post_transition: None,
            documentation: RuleDoc::default(),
        }
    }

    /// Set the transition type this rule serves (required).
    pub fn on(mut self, transition_type: impl Into<TransitionType>) -> Self {
        self.transition_type = Some(transition_type.into());
        self
    }

    /// Add a source state. At least one is required.
    pub fn from(mut self, state: impl Into<State>) -> Self {
        self.sources.push(state.into());
        self
    }

    /// Add several source states.
    pub fn from_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.sources.extend(states.into_iter().map(Into::into));
        self
    }

    /// Fire only from the reserved empty state.
    pub fn from_initial(self) -> Self {
        self.from(State::INITIAL)
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: impl Into<State>) -> Self {
        self.destination = Some(state.into());
        self
    }

    /// Add a condition (optional).
    pub fn condition(mut self, condition: Condition<E, A>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Add a condition using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E, &A) -> bool + Send + Sync + 'static,
    {
        self.condition = Some(Condition::new(predicate));
        self
    }

    /// Set the transition action (optional). Failing it vetoes the state change.
    pub fn transition<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut E, &A) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.transition = Some(Action::new(action));
        self
    }

    /// Set the post-transition action (optional). Runs after the state change.
    pub fn post_transition<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut E, &A) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.post_transition = Some(Action::new(action));
        self
    }

    /// Attach a name and description (optional).
    pub fn documented(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.documentation = RuleDoc::new(name, description);
        self
    }

    /// Build the rule.
    /// Returns an error if required fields are missing or the rule is malformed.
    pub fn build(self) -> Result<TransitionRule<E, A>, BuildError> {
        let transition_type = self.transition_type.ok_or(BuildError::MissingTransitionType)?;
        let destination_state = self.destination.ok_or(BuildError::MissingDestination)?;

        let rule = TransitionRule {
            transition_type,
            source_states: self.sources,
            destination_state,
            condition: self.condition,
            transition: self.transition,
            post_transition: self.post_transition,
            documentation: self.documentation,
        };

        if let Validation::Failure(errors) = validate_rule(&rule) {
            return Err(RegistrationError::InvalidRule {
                transition_type: rule.transition_type,
                violations: errors.iter().cloned().collect(),
            }
            .into());
        }

        Ok(rule)
    }
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> Default for TransitionRuleBuilder<E, A> {
    fn default() -> Self {
        Self::new()
    }
}
