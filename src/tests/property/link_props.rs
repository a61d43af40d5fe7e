//! Property-based tests for document link resolution
//!
//! Tests invariants:
//! - Prefix and relative location are joined by exactly one `/`
//! - Absolute locations pass through a prefixed resolver
//! - The verbatim resolver returns its input

use proptest::prelude::*;

use crate::core::links::LinkResolver;

fn arb_prefix() -> impl Strategy<Value = String> {
    "https://[a-z]{3,10}\\.example\\.com/[a-z]{1,8}/{0,3}"
}

fn arb_relative() -> impl Strategy<Value = String> {
    "/{0,3}[a-z]{1,8}(/[a-z0-9]{1,8}){0,2}\\.pdf"
}

proptest! {
    #[test]
    fn prop_prefixed_join_single_separator(prefix in arb_prefix(), location in arb_relative()) {
        let resolved = LinkResolver::prefixed(prefix.clone()).resolve_url(&location);
        let after_scheme = &resolved["https://".len()..];

        prop_assert!(!after_scheme.contains("//"), "double slash in {}", resolved);
        prop_assert!(resolved.starts_with(prefix.trim_end_matches('/')));
        prop_assert!(resolved.ends_with(location.trim_start_matches('/')));
    }

    #[test]
    fn prop_absolute_locations_untouched(prefix in arb_prefix(), path in "[a-z]{1,8}\\.pdf") {
        let location = format!("https://cdn.example.org/{path}");
        prop_assert_eq!(LinkResolver::prefixed(prefix).resolve_url(&location), location);
    }

    #[test]
    fn prop_verbatim_identity(location in "\\PC{0,40}") {
        prop_assert_eq!(LinkResolver::verbatim().resolve_url(&location), location);
    }
}
