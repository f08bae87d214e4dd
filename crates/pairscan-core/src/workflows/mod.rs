//! # Workflows Module
//!
//! End-to-end procedures over the engine, the entry points for users of the library.
//!
//! - **Scan Workflow** ([`scan`]) - Build an index of residue pairs over a set of
//!   structures, then find every index pair that matches a pair of a query structure.
//! - **Alignment Check Workflow** ([`check`]) - Classify every pair of aligned positions
//!   under the criteria, both exactly and through representatives, and tally the reasons
//!   pairs fail.

pub mod check;
pub mod scan;
