//! Property-based tests for request generations
//!
//! Tests invariants:
//! - Of any run of superseding requests only the newest finishes
//! - A finished ticket cannot finish twice
//! - Stale listing responses leave the lister untouched

use proptest::prelude::*;

use crate::core::api::DocumentSummary;
use crate::core::components::DocumentLister;
use crate::core::request::RequestTracker;

fn arb_documents() -> impl Strategy<Value = Vec<DocumentSummary>> {
    prop::collection::vec(
        ("[a-z]{1,8}\\.pdf", "[a-z/]{1,16}")
            .prop_map(|(name, url)| DocumentSummary { name, url }),
        1..5,
    )
}

proptest! {
    #[test]
    fn prop_only_latest_ticket_finishes(count in 1usize..12, pick in any::<prop::sample::Index>()) {
        let mut tracker = RequestTracker::new();
        let tickets: Vec<_> = (0..count).map(|_| tracker.begin()).collect();
        let latest = *tickets.last().unwrap();

        let candidate = *pick.get(&tickets);
        let finished = tracker.finish(candidate);
        prop_assert_eq!(finished, candidate == latest);
        prop_assert_eq!(tracker.is_pending(), candidate != latest);
    }

    #[test]
    fn prop_ticket_finishes_once(count in 1usize..6) {
        let mut tracker = RequestTracker::new();
        let mut ticket = tracker.begin();
        for _ in 1..count {
            ticket = tracker.begin();
        }
        prop_assert!(tracker.finish(ticket));
        prop_assert!(!tracker.finish(ticket));
        prop_assert!(!tracker.is_pending());
    }

    #[test]
    fn prop_generations_increase(count in 2usize..20) {
        let mut tracker = RequestTracker::new();
        let tickets: Vec<_> = (0..count).map(|_| tracker.begin()).collect();
        prop_assert!(tickets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_stale_listing_is_dropped(stale in arb_documents(), fresh in arb_documents()) {
        let mut lister = DocumentLister::new();
        let first = lister.fetch("a@b.com");
        let second = lister.fetch("a@b.com");

        prop_assert!(lister.apply(first.ticket(), Ok(stale)).is_none());
        prop_assert!(lister.documents().is_empty());
        prop_assert!(lister.is_loading());

        lister.apply(second.ticket(), Ok(fresh.clone()));
        prop_assert_eq!(lister.documents(), fresh.as_slice());
        prop_assert!(!lister.is_loading());
    }
}
