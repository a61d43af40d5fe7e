//! Property-based tests for DocDesk
//!
//! These use the proptest framework to check invariants that should hold
//! for all inputs, rather than for specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `email_props`: email gate
//!   - Confirmed email always matches the address pattern
//!   - Invalid input never confirms a fresh gate
//!   - Surrounding whitespace is ignored
//!
//! - `request_props`: request generations
//!   - Only the newest ticket finishes
//!   - Stale outcomes never touch component state
//!
//! - `link_props`: document link resolution
//!   - Prefixed joins have exactly one separator
//!   - Verbatim links are unchanged

mod email_props;
mod link_props;
mod request_props;
