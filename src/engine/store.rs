//! Rule storage partitioned by transition type.

use crate::core::TransitionType;
use crate::engine::rule::TransitionRule;
use std::collections::HashMap;

/// Ordered collection of transition rules grouped by transition type.
///
/// Within a partition rules keep registration order, which is also their
/// matching priority. Rules are never deduplicated or removed.
pub struct RuleStore<E: ?Sized, A: ?Sized = ()> {
    rules: HashMap<TransitionType, Vec<TransitionRule<E, A>>>,
    len: usize,
}

impl<E: ?Sized, A: ?Sized> RuleStore<E, A> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            len: 0,
        }
    }

    /// Append a rule to its transition type's partition.
    pub fn insert(&mut self, rule: TransitionRule<E, A>) {
        self.rules
            .entry(rule.transition_type.clone())
            .or_default()
            .push(rule);
        self.len += 1;
    }

    /// Rules registered for `transition_type`, in priority order.
    /// Empty if the type was never registered.
    pub fn candidates(&self, transition_type: &str) -> &[TransitionRule<E, A>] {
        self.rules
            .get(transition_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Partitions ordered by ascending transition-type identifier.
    pub fn sorted(&self) -> Vec<(&TransitionType, &[TransitionRule<E, A>])> {
        let mut partitions: Vec<_> = self
            .rules
            .iter()
            .map(|(tt, rules)| (tt, rules.as_slice()))
            .collect();
        partitions.sort_by(|a, b| a.0.cmp(b.0));
        partitions
    }

    /// Registered transition types in ascending order.
    pub fn transition_types(&self) -> Vec<&TransitionType> {
        self.sorted().into_iter().map(|(tt, _)| tt).collect()
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<E: ?Sized, A: ?Sized> Default for RuleStore<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized, A: ?Sized> Clone for RuleStore<E, A> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            len: self.len,
        }
    }
}
