//! Board module tests.
//!
//! - `threats.rs` - pattern enumeration against the geometric predicate
//! - `add_remove.rs` - add/remove correctness and threat bookkeeping
//! - `proptest.rs` - property-based tests
