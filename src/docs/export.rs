//! Structured export of a rule set for documentation and diagram tooling.
//!
//! The exported document is deterministic: rules are grouped by ascending
//! transition type and keep registration order inside a type, and all maps
//! are ordered. Exporting an unchanged rule set always yields identical JSON.

use crate::core::{State, INITIAL_EXPORT_TOKEN};
use crate::docs::{Documentation, ExportError, StateDoc};
use crate::engine::RuleStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const INITIAL_NAME: &str = "Initial";
const INITIAL_DESCRIPTION: &str = concat!(
    "The initial state of the state machine. This is a synthetic state that is not part of ",
    "the state machine itself. It appears in documentation when a transition rule's only ",
    "source state is the empty state",
);

/// Name and description of a state or transition type in an exported document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionExport {
    pub name: String,
    pub description: String,
}

/// One registered rule as exported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleExport {
    pub transition_type: String,
    pub source_states: Vec<String>,
    pub destination_state: String,
    pub name: String,
    pub description: String,
}

/// Graph node: one per documented state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNode {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Graph edge: one per (source state, destination state) pair of a rule,
/// labeled with the transition type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEdge {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Machine-readable description of a state machine's states and rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "transition_rules_nodes")]
    pub nodes: Vec<StateNode>,
    #[serde(rename = "transition_rules_edges")]
    pub edges: Vec<RuleEdge>,
    #[serde(rename = "transition_rules")]
    pub rules: Vec<RuleExport>,
    pub states: BTreeMap<String, DescriptionExport>,
    pub transition_types: BTreeMap<String, DescriptionExport>,
}

impl ExportDocument {
    /// Build the document from registered rules and documentation.
    pub fn build<E: ?Sized, A: ?Sized>(rules: &RuleStore<E, A>, docs: &Documentation) -> Self {
        let mut document = ExportDocument::default();
        let mut has_initial_rule = false;

        for (transition_type, partition) in rules.sorted() {
            for rule in partition {
                has_initial_rule |= rule.is_initial_rule();
                let source_states = rule.export_sources();
                let destination_state = rule.destination_state.export_label().to_string();

                for source in &source_states {
                    document.edges.push(RuleEdge {
                        from: source.clone(),
                        to: destination_state.clone(),
                        description: rule.documentation.description.clone(),
                        name: transition_type.to_string(),
                    });
                }

                document.rules.push(RuleExport {
                    transition_type: transition_type.to_string(),
                    source_states,
                    destination_state,
                    name: rule.documentation.name.clone(),
                    description: rule.documentation.description.clone(),
                });
            }
        }

        for (state, doc) in docs.states() {
            let label = state.export_label().to_string();
            document.states.insert(label, describe_state(doc));
        }

        // The initial pseudo-state only exists in exported documents.
        if has_initial_rule && !document.states.contains_key(INITIAL_EXPORT_TOKEN) {
            document.states.insert(
                INITIAL_EXPORT_TOKEN.to_string(),
                DescriptionExport {
                    name: INITIAL_NAME.to_string(),
                    description: INITIAL_DESCRIPTION.to_string(),
                },
            );
        }

        document.nodes = document
            .states
            .iter()
            .map(|(id, doc)| StateNode {
                id: id.clone(),
                name: doc.name.clone(),
                description: doc.description.clone(),
            })
            .collect();

        for (transition_type, doc) in docs.transition_types() {
            document.transition_types.insert(
                transition_type.to_string(),
                DescriptionExport {
                    name: doc.name.clone(),
                    description: doc.description.clone(),
                },
            );
        }

        document
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously exported document.
    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rules exported for `transition_type`, in export order.
    pub fn rules_for<'a>(
        &'a self,
        transition_type: &'a str,
    ) -> impl Iterator<Item = &'a RuleExport> {
        self.rules
            .iter()
            .filter(move |r| r.transition_type == transition_type)
    }

    /// Whether `state` appears as a source or destination of any rule.
    pub fn references_state(&self, state: &State) -> bool {
        let label = state.export_label();
        self.rules.iter().any(|r| {
            r.destination_state == label || r.source_states.iter().any(|s| s == label)
        })
    }
}

fn describe_state(doc: &StateDoc) -> DescriptionExport {
    DescriptionExport {
        name: doc.name.clone(),
        description: doc.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionType;
    use crate::docs::TransitionTypeDoc;
    use crate::engine::{RuleDoc, TransitionRule};

    struct Host;

    fn rule(
        tt: &'static str,
        sources: Vec<State>,
        destination: &'static str,
        description: &str,
    ) -> TransitionRule<Host> {
        let mut rule = TransitionRule::new(tt, sources, State::from_static(destination));
        rule.documentation = RuleDoc::new(format!("{tt} to {destination}"), description);
        rule
    }

    fn sample() -> (RuleStore<Host>, Documentation) {
        let mut rules = RuleStore::new();
        rules.insert(rule(
            "SetHwInfo",
            vec![State::new("Discovering"), State::new("Known")],
            "Known",
            "Hardware is sufficient",
        ));
        rules.insert(rule(
            "Register",
            vec![State::INITIAL],
            "Discovering",
            "First registration",
        ));
        rules.insert(rule(
            "Register",
            vec![State::new("Discovering")],
            "Discovering",
            "Re-registration",
        ));

        let mut docs = Documentation::new();
        docs.describe_state(
            State::new("Known"),
            StateDoc::new("Known", "Host is usable"),
        );
        docs.describe_state(
            State::new("Discovering"),
            StateDoc::new("Discovering", "Waiting for inventory"),
        );
        docs.describe_transition_type(
            TransitionType::new("Register"),
            TransitionTypeDoc::new("Register", "Host agent registers"),
        );
        (rules, docs)
    }

    #[test]
    fn rules_are_grouped_by_sorted_transition_type() {
        let (rules, docs) = sample();
        let document = ExportDocument::build(&rules, &docs);

        let order: Vec<(&str, &str)> = document
            .rules
            .iter()
            .map(|r| (r.transition_type.as_str(), r.description.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Register", "First registration"),
                ("Register", "Re-registration"),
                ("SetHwInfo", "Hardware is sufficient"),
            ]
        );
        assert_eq!(document.rules_for("Register").count(), 2);
    }

    #[test]
    fn empty_source_renders_as_initial() {
        let (rules, docs) = sample();
        let document = ExportDocument::build(&rules, &docs);

        assert_eq!(document.rules[0].source_states, vec!["initial"]);
        assert_eq!(document.edges[0].from, "initial");
        assert_eq!(document.edges[0].to, "Discovering");
        assert_eq!(document.edges[0].name, "Register");
        assert!(document.references_state(&State::INITIAL));
    }

    #[test]
    fn initial_state_is_synthesized_only_when_used() {
        let (rules, docs) = sample();
        let document = ExportDocument::build(&rules, &docs);
        assert_eq!(document.states["initial"].name, "Initial");

        let mut without_initial = RuleStore::new();
        without_initial.insert(rule("Cancel", vec![State::new("Known")], "Cancelled", ""));
        let document = ExportDocument::build(&without_initial, &docs);
        assert!(!document.states.contains_key("initial"));
    }

    #[test]
    fn caller_description_of_initial_state_is_kept() {
        let (rules, mut docs) = sample();
        docs.describe_state(State::INITIAL, StateDoc::new("Fresh", "Never registered"));
        let document = ExportDocument::build(&rules, &docs);

        let initial = &document.states["initial"];
        assert_eq!(initial.name, "Fresh");
        assert_eq!(initial.description, "Never registered");

        let nodes: Vec<&StateNode> = document.nodes.iter().filter(|n| n.id == "initial").collect();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "Fresh");
        assert_eq!(nodes[0].description, "Never registered");
    }

    #[test]
    fn one_edge_per_source_state() {
        let (rules, docs) = sample();
        let document = ExportDocument::build(&rules, &docs);

        let edges: Vec<(&str, &str)> = document
            .edges
            .iter()
            .filter(|e| e.name == "SetHwInfo")
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(edges, vec![("Discovering", "Known"), ("Known", "Known")]);
    }

    #[test]
    fn nodes_follow_documented_states() {
        let (rules, docs) = sample();
        let document = ExportDocument::build(&rules, &docs);

        let ids: Vec<&str> = document.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["Discovering", "Known", "initial"]);
        assert_eq!(document.nodes[1].description, "Host is usable");
    }

    #[test]
    fn json_uses_documented_field_names() {
        let (rules, docs) = sample();
        let json = ExportDocument::build(&rules, &docs).to_json().unwrap();

        for key in [
            "\"transition_rules_nodes\"",
            "\"transition_rules_edges\"",
            "\"transition_rules\"",
            "\"states\"",
            "\"transition_types\"",
            "\"destination_state\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
        assert!(json.starts_with("{\n  \""));
    }

    #[test]
    fn empty_edge_fields_are_omitted() {
        let mut rules = RuleStore::new();
        rules.insert(TransitionRule::<Host>::new(
            "Cancel",
            [State::new("Known")],
            State::new("Cancelled"),
        ));
        let json = ExportDocument::build(&rules, &Documentation::new())
            .to_json()
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let edge = &value["transition_rules_edges"][0];
        assert_eq!(edge["from"], "Known");
        assert!(edge.get("description").is_none());
        assert_eq!(value["transition_rules"][0]["description"], "");
    }

    #[test]
    fn export_is_byte_identical_across_builds() {
        let (rules, docs) = sample();
        let first = ExportDocument::build(&rules, &docs).to_json().unwrap();
        let second = ExportDocument::build(&rules, &docs).to_json().unwrap();
        assert_eq!(first, second);

        let parsed = ExportDocument::from_json(&first).unwrap();
        assert_eq!(parsed.to_json().unwrap(), first);
    }
}
