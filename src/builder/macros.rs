//! Macros for declaring state and transition-type labels.

/// Declare `const` [`State`](crate::core::State) labels.
///
/// # Example
///
/// ```
/// use turnstile::states;
///
/// states! {
///     pub DISCOVERING = "Discovering",
///     pub KNOWN = "Known",
///     INSUFFICIENT = "Insufficient",
/// }
///
/// assert_eq!(KNOWN, "Known");
/// assert_eq!(INSUFFICIENT.as_str(), "Insufficient");
/// ```
#[macro_export]
macro_rules! states {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis $name:ident = $label:literal
        ),* $(,)?
    ) => {
        $(
            $(#[$meta])*
            $vis const $name: $crate::core::State = $crate::core::State::from_static($label);
        )*
    };
}

/// Declare `const` [`TransitionType`](crate::core::TransitionType) labels.
///
/// # Example
///
/// ```
/// use turnstile::transition_types;
///
/// transition_types! {
///     pub REGISTER = "Register",
///     pub SET_HW_INFO = "SetHwInfo",
/// }
///
/// assert_eq!(SET_HW_INFO, "SetHwInfo");
/// ```
#[macro_export]
macro_rules! transition_types {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis $name:ident = $label:literal
        ),* $(,)?
    ) => {
        $(
            $(#[$meta])*
            $vis const $name: $crate::core::TransitionType =
                $crate::core::TransitionType::from_static($label);
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{State, TransitionType};

    states! {
        /// Host is waiting for its inventory
        DISCOVERING = "Discovering",
        pub(crate) KNOWN = "Known",
    }

    transition_types! {
        REGISTER = "Register",
    }

    #[test]
    fn states_macro_declares_constants() {
        assert_eq!(DISCOVERING, State::new("Discovering"));
        assert_eq!(KNOWN, "Known");
        assert!(!KNOWN.is_initial());
    }

    #[test]
    fn transition_types_macro_declares_constants() {
        assert_eq!(REGISTER, TransitionType::new("Register"));
    }

    #[test]
    fn macros_work_in_function_scope() {
        states! {
            ONLY = "Only",
        }

        assert_eq!(ONLY.as_str(), "Only");
    }
}
