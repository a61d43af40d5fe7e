//! Property-based tests for the email gate
//!
//! Tests invariants:
//! - A confirmed email always matches `local@domain.tld`
//! - Input without `@` never confirms
//! - Surrounding whitespace is trimmed before validation
//! - A rejected re-submission keeps the earlier session

use proptest::prelude::*;

use crate::core::components::email_gate::is_valid_email;
use crate::core::components::{EmailGate, GateError};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_valid_email() -> impl Strategy<Value = String> {
    "[a-z0-9._%+-]{1,12}@[a-z0-9-]{1,10}\\.[a-z]{2,6}"
}

/// Anything lacking an `@` is rejected.
fn arb_missing_at() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9. _-]{0,24}"
}

fn arb_padding() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_valid_email_confirms(email in arb_valid_email()) {
        let mut gate = EmailGate::new();
        prop_assert_eq!(gate.submit(&email), Ok(email.as_str()));
        prop_assert!(gate.is_confirmed());
        prop_assert!(gate.error().is_none());
    }

    #[test]
    fn prop_missing_at_never_confirms(input in arb_missing_at()) {
        let mut gate = EmailGate::new();
        prop_assert_eq!(gate.submit(&input), Err(GateError::InvalidEmail));
        prop_assert!(!gate.is_confirmed());
        prop_assert!(gate.email().is_none());
    }

    #[test]
    fn prop_confirmed_email_matches_pattern(input in "[a-z@. ]{0,20}") {
        let mut gate = EmailGate::new();
        if gate.submit(&input).is_ok() {
            let email = gate.email().unwrap_or_default();
            prop_assert!(is_valid_email(email));
            prop_assert_eq!(email.matches('@').count(), 1);
            prop_assert!(!email.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn prop_padding_is_trimmed(
        email in arb_valid_email(),
        before in arb_padding(),
        after in arb_padding(),
    ) {
        let mut gate = EmailGate::new();
        let padded = format!("{before}{email}{after}");
        prop_assert_eq!(gate.submit(&padded), Ok(email.as_str()));
    }

    #[test]
    fn prop_rejected_resubmission_keeps_session(
        email in arb_valid_email(),
        junk in arb_missing_at(),
    ) {
        let mut gate = EmailGate::new();
        prop_assert!(gate.submit(&email).is_ok());
        prop_assert!(gate.submit(&junk).is_err());
        prop_assert_eq!(gate.email(), Some(email.as_str()));
        prop_assert_eq!(gate.error(), Some(&GateError::InvalidEmail));
    }
}
