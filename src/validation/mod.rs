//! Registration-time validation of transition rules.
//!
//! Rules are checked with Stillwater's `Validation` so that a malformed rule
//! reports every problem at once instead of one per registration attempt.
//! Rules are only checked individually: conflicting, duplicated or unreachable
//! rules are legal.

pub mod rules;
pub mod violations;

pub use rules::validate_rule;
pub use violations::RuleViolation;
