//! Registration-time checks for transition rules using Validation.

use crate::core::INITIAL_EXPORT_TOKEN;
use crate::engine::TransitionRule;
use crate::validation::violations::RuleViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Run every check against `rule`, accumulating ALL violations.
/// Returns Validation::Success(()) if the rule is well formed.
pub fn validate_rule<E: ?Sized, A: ?Sized>(
    rule: &TransitionRule<E, A>,
) -> Validation<(), NonEmptyVec<RuleViolation>> {
    let checks = vec![
        check_has_sources(rule),
        check_destination(rule),
        check_initial_alone(rule),
        check_reserved_label(rule),
    ];

    Validation::all_vec(checks).map(|_| ())
}

fn check_has_sources<E: ?Sized, A: ?Sized>(
    rule: &TransitionRule<E, A>,
) -> Validation<(), NonEmptyVec<RuleViolation>> {
    if rule.source_states.is_empty() {
        Validation::fail(RuleViolation::NoSourceStates)
    } else {
        Validation::success(())
    }
}

fn check_destination<E: ?Sized, A: ?Sized>(
    rule: &TransitionRule<E, A>,
) -> Validation<(), NonEmptyVec<RuleViolation>> {
    if rule.destination_state.is_initial() {
        Validation::fail(RuleViolation::EmptyDestination)
    } else {
        Validation::success(())
    }
}

// An initial source mixed with real states would never match the initial state.
fn check_initial_alone<E: ?Sized, A: ?Sized>(
    rule: &TransitionRule<E, A>,
) -> Validation<(), NonEmptyVec<RuleViolation>> {
    let others = rule
        .source_states
        .iter()
        .filter(|s| !s.is_initial())
        .count();
    if others > 0 && others < rule.source_states.len() {
        Validation::fail(RuleViolation::InitialMixedWithStates { others })
    } else {
        Validation::success(())
    }
}

// A real state named like the export token would be indistinguishable from
// the empty state in exported documents.
fn check_reserved_label<E: ?Sized, A: ?Sized>(
    rule: &TransitionRule<E, A>,
) -> Validation<(), NonEmptyVec<RuleViolation>> {
    let reserved = rule
        .source_states
        .iter()
        .chain(std::iter::once(&rule.destination_state))
        .find(|s| s.as_str() == INITIAL_EXPORT_TOKEN);
    match reserved {
        Some(state) => Validation::fail(RuleViolation::ReservedLabel {
            state: state.clone(),
        }),
        None => Validation::success(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    struct Host;

    fn rule(sources: Vec<State>, destination: State) -> TransitionRule<Host> {
        TransitionRule::new("Register", sources, destination)
    }

    #[test]
    fn well_formed_rule_passes() {
        let result = validate_rule(&rule(vec![State::INITIAL], State::new("Discovering")));
        assert!(result.is_success());

        let result = validate_rule(&rule(
            vec![State::new("Discovering"), State::new("Known")],
            State::new("Known"),
        ));
        assert!(result.is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let result = validate_rule(&rule(vec![], State::INITIAL));

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RuleViolation::NoSourceStates)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RuleViolation::EmptyDestination)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn initial_state_must_stand_alone() {
        let result = validate_rule(&rule(
            vec![State::INITIAL, State::new("Known"), State::new("Insufficient")],
            State::new("Known"),
        ));

        match result {
            Validation::Failure(errors) => {
                let expected = RuleViolation::InitialMixedWithStates { others: 2 };
                assert_eq!(errors.len(), 1);
                assert!(errors.iter().any(|e| *e == expected));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn export_token_is_not_a_usable_state() {
        let as_source = validate_rule(&rule(vec![State::new("initial")], State::new("Known")));
        let as_destination = validate_rule(&rule(vec![State::INITIAL], State::new("initial")));

        let expected = RuleViolation::ReservedLabel {
            state: State::new("initial"),
        };
        for result in [as_source, as_destination] {
            match result {
                Validation::Failure(errors) => {
                    assert_eq!(errors.len(), 1);
                    assert!(errors.iter().any(|e| *e == expected));
                }
                Validation::Success(_) => panic!("Expected failure, got success"),
            }
        }
    }

    #[test]
    fn repeated_initial_state_is_still_initial_only() {
        let result = validate_rule(&rule(
            vec![State::INITIAL, State::INITIAL],
            State::new("Discovering"),
        ));
        assert!(result.is_success());
    }
}
