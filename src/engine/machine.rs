//! State machine that selects and executes transition rules.

use crate::core::{State, Stateful, TransitionType};
use crate::docs::{Documentation, ExportDocument, ExportError, StateDoc, TransitionTypeDoc};
use crate::engine::error::{RegistrationError, RunError};
use crate::engine::rule::{RuleRef, TransitionRule};
use crate::engine::store::RuleStore;
use crate::validation::validate_rule;
use stillwater::validation::Validation;

/// Rule-driven state machine over caller-owned entities of type `E`, invoked
/// with transition arguments of type `A`.
///
/// The machine holds only its rule table and documentation. Rules and
/// documentation are registered during setup; afterwards the machine is
/// read-only and can be shared across threads to run transitions against
/// distinct entities.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{BoxError, State, Stateful};
/// use turnstile::engine::{StateMachine, TransitionRule};
///
/// struct Host {
///     state: State,
/// }
///
/// impl Stateful for Host {
///     fn state(&self) -> State {
///         self.state.clone()
///     }
///
///     fn set_state(&mut self, state: State) -> Result<(), BoxError> {
///         self.state = state;
///         Ok(())
///     }
/// }
///
/// let mut machine: StateMachine<Host> = StateMachine::new();
/// machine
///     .add_transition(TransitionRule::new("Register", [State::INITIAL], State::new("Discovering")))
///     .unwrap();
///
/// let mut host = Host { state: State::INITIAL };
/// machine.run("Register", &mut host, &()).unwrap();
/// assert_eq!(host.state, "Discovering");
///
/// let err = machine.run("Register", &mut host, &()).unwrap_err();
/// assert!(err.is_no_match());
/// ```
pub struct StateMachine<E: ?Sized, A: ?Sized = ()> {
    rules: RuleStore<E, A>,
    docs: Documentation,
}

impl<E: ?Sized, A: ?Sized> StateMachine<E, A> {
    /// Create a state machine with no rules.
    pub fn new() -> Self {
        Self {
            rules: RuleStore::new(),
            docs: Documentation::new(),
        }
    }

    /// Register a transition rule after the rules already registered for its
    /// transition type.
    ///
    /// Returns an error listing every problem if the rule has no source states,
    /// targets the reserved empty state, or mixes the reserved empty state with
    /// real states.
    pub fn add_transition(&mut self, rule: TransitionRule<E, A>) -> Result<(), RegistrationError> {
        if let Validation::Failure(errors) = validate_rule(&rule) {
            return Err(RegistrationError::InvalidRule {
                transition_type: rule.transition_type.clone(),
                violations: errors.iter().cloned().collect(),
            });
        }

        tracing::debug!(
            transition_type = %rule.transition_type,
            destination = %rule.destination_state,
            position = self.rules.candidates(rule.transition_type.as_str()).len(),
            "registered transition rule"
        );
        self.rules.insert(rule);
        Ok(())
    }

    /// Attach documentation to a state.
    pub fn describe_state(&mut self, state: impl Into<State>, doc: StateDoc) {
        self.docs.describe_state(state.into(), doc);
    }

    /// Attach documentation to a transition type.
    pub fn describe_transition_type(
        &mut self,
        transition_type: impl Into<TransitionType>,
        doc: TransitionTypeDoc,
    ) {
        self.docs.describe_transition_type(transition_type.into(), doc);
    }

    pub fn rules(&self) -> &RuleStore<E, A> {
        &self.rules
    }

    pub fn documentation(&self) -> &Documentation {
        &self.docs
    }

    /// Describe every registered rule, state and transition type.
    pub fn export(&self) -> ExportDocument {
        ExportDocument::build(&self.rules, &self.docs)
    }

    /// [`export`](Self::export) rendered as pretty-printed JSON.
    pub fn as_json(&self) -> Result<String, ExportError> {
        self.export().to_json()
    }
}

impl<E: Stateful + ?Sized, A: ?Sized> StateMachine<E, A> {
    /// Find the first rule for `transition_type` whose source states contain
    /// the entity's state and whose condition holds (pure).
    ///
    /// Returns the rule together with its position among the rules of its
    /// transition type.
    pub fn find_rule(
        &self,
        transition_type: &str,
        entity: &E,
        args: &A,
    ) -> Option<(usize, &TransitionRule<E, A>)> {
        let current = entity.state();
        self.select(transition_type, &current, entity, args)
    }

    /// Whether `run` would find a rule for `transition_type` (pure).
    /// Actions may still fail when the transition is run.
    pub fn can_run(&self, transition_type: &str, entity: &E, args: &A) -> bool {
        self.find_rule(transition_type, entity, args).is_some()
    }

    /// Run `transition_type` against `entity`.
    ///
    /// Selects the first matching rule in registration order, then:
    /// 1. runs its transition action; on failure the entity keeps its state;
    /// 2. sets the entity to the rule's destination state;
    /// 3. runs its post-transition action. A failure here is reported, but the
    ///    state change from step 2 stays in place.
    pub fn run(
        &self,
        transition_type: impl AsRef<str>,
        entity: &mut E,
        args: &A,
    ) -> Result<(), RunError> {
        let transition_type = transition_type.as_ref();
        let state = entity.state();

        let Some((index, rule)) = self.select(transition_type, &state, entity, args) else {
            tracing::debug!(
                transition_type,
                state = %state,
                "no matching transition rule"
            );
            return Err(RunError::NoMatchingTransition {
                transition_type: TransitionType::new(transition_type),
                state,
            });
        };

        tracing::debug!(
            transition_type,
            from = %state,
            to = %rule.destination_state,
            rule = index,
            "transition rule selected"
        );

        if let Some(action) = &rule.transition {
            if let Err(source) = action.call(entity, args) {
                return Err(RunError::TransitionActionFailed {
                    transition_type: rule.transition_type.clone(),
                    state,
                    rule: RuleRef::of(index, rule),
                    source,
                });
            }
        }

        if let Err(source) = entity.set_state(rule.destination_state.clone()) {
            return Err(RunError::StateAssignmentFailed {
                transition_type: rule.transition_type.clone(),
                destination: rule.destination_state.clone(),
                state,
                rule: RuleRef::of(index, rule),
                source,
            });
        }

        if let Some(action) = &rule.post_transition {
            if let Err(source) = action.call(entity, args) {
                tracing::warn!(
                    transition_type,
                    from = %state,
                    to = %rule.destination_state,
                    error = %source,
                    "post-transition action failed after state change"
                );
                return Err(RunError::PostTransitionActionFailed {
                    transition_type: rule.transition_type.clone(),
                    destination: rule.destination_state.clone(),
                    state,
                    rule: RuleRef::of(index, rule),
                    source,
                });
            }
        }

        Ok(())
    }

    fn select(
        &self,
        transition_type: &str,
        current: &State,
        entity: &E,
        args: &A,
    ) -> Option<(usize, &TransitionRule<E, A>)> {
        self.rules
            .candidates(transition_type)
            .iter()
            .enumerate()
            .find(|(index, rule)| {
                let matched = rule.matches(current, entity, args);
                if !matched {
                    tracing::trace!(transition_type, rule = *index, "transition rule skipped");
                }
                matched
            })
    }
}

impl<E: ?Sized, A: ?Sized> Default for StateMachine<E, A> {
    fn default() -> Self {
        Self::new()
    }
}
