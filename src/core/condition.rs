//! Condition predicates and their logical combinators.
//!
//! A condition is a pure function of the entity and the transition arguments.
//! It has no error channel: predicates that could fail must guard against it
//! themselves.

use std::fmt;
use std::sync::Arc;

type Predicate<E, A> = dyn Fn(&E, &A) -> bool + Send + Sync;

/// Pure predicate deciding whether a transition rule may fire.
///
/// Conditions are cheap to clone, so one predicate can be shared by several
/// rules, and combinators produce new conditions that can be nested freely.
///
/// # Example
///
/// ```rust
/// use turnstile::core::{and, not, Condition};
///
/// struct Host {
///     cores: u32,
///     memory_gib: u32,
/// }
///
/// let enough_cores = Condition::new(|h: &Host, _: &()| h.cores >= 4);
/// let enough_memory = Condition::new(|h: &Host, _: &()| h.memory_gib >= 16);
/// let sufficient = and([enough_cores, enough_memory]);
/// let insufficient = not(sufficient.clone());
///
/// let host = Host { cores: 8, memory_gib: 8 };
/// assert!(!sufficient.check(&host, &()));
/// assert!(insufficient.check(&host, &()));
/// ```
pub struct Condition<E: ?Sized, A: ?Sized = ()> {
    predicate: Arc<Predicate<E, A>>,
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> Condition<E, A> {
    /// Create a condition from a pure predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &A) -> bool + Send + Sync + 'static,
    {
        Condition {
            predicate: Arc::new(predicate),
        }
    }

    /// Condition that is true iff both `self` and `other` are true.
    /// `other` is not evaluated when `self` is false.
    pub fn and(self, other: Condition<E, A>) -> Self {
        and([self, other])
    }

    /// Condition that is true iff `self` or `other` is true.
    /// `other` is not evaluated when `self` is true.
    pub fn or(self, other: Condition<E, A>) -> Self {
        or([self, other])
    }
}

impl<E: ?Sized, A: ?Sized> Condition<E, A> {
    /// Evaluate the condition.
    pub fn check(&self, entity: &E, args: &A) -> bool {
        (self.predicate)(entity, args)
    }
}

impl<E: ?Sized, A: ?Sized> Clone for Condition<E, A> {
    fn clone(&self) -> Self {
        Condition {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E: ?Sized, A: ?Sized> fmt::Debug for Condition<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Condition(..)")
    }
}

impl<E: ?Sized + 'static, A: ?Sized + 'static> std::ops::Not for Condition<E, A> {
    type Output = Condition<E, A>;

    fn not(self) -> Self::Output {
        not(self)
    }
}

/// True iff `condition` is false.
pub fn not<E, A>(condition: Condition<E, A>) -> Condition<E, A>
where
    E: ?Sized + 'static,
    A: ?Sized + 'static,
{
    Condition::new(move |entity: &E, args: &A| !condition.check(entity, args))
}

/// True iff every operand is true. Stops at the first false operand.
/// With no operands the result is true.
pub fn and<E, A, I>(conditions: I) -> Condition<E, A>
where
    E: ?Sized + 'static,
    A: ?Sized + 'static,
    I: IntoIterator<Item = Condition<E, A>>,
{
    let operands: Vec<Condition<E, A>> = conditions.into_iter().collect();
    Condition::new(move |entity: &E, args: &A| {
        operands.iter().all(|c| c.check(entity, args))
    })
}

/// True iff any operand is true. Stops at the first true operand.
/// With no operands the result is false.
pub fn or<E, A, I>(conditions: I) -> Condition<E, A>
where
    E: ?Sized + 'static,
    A: ?Sized + 'static,
    I: IntoIterator<Item = Condition<E, A>>,
{
    let operands: Vec<Condition<E, A>> = conditions.into_iter().collect();
    Condition::new(move |entity: &E, args: &A| {
        operands.iter().any(|c| c.check(entity, args))
    })
}
