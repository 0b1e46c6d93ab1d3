//! Storage format tests
//!
//! End-to-end Markdown → storage conversions and invariants of the rewrite chain.

mod convert;
mod properties;
