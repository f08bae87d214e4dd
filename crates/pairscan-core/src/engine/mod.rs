//! # Engine Module
//!
//! The keying and indexing machinery that lets a structure comparison skip the exhaustive
//! all-pairs test.
//!
//! ## Overview
//!
//! A residue pair is described by a view vector, a relative frame and four backbone
//! dihedrals. The engine quantizes those features into composite cell keys, files pairs
//! into stores by key, and for a query pair lists every cell that could hold a pair within
//! the match criteria. Candidates from those cells are then confirmed with the full,
//! ordered criteria checks.
//!
//! ## Architecture
//!
//! - **Keyers** ([`keyer`]) - Per-dimension parts and their tuple composition
//! - **Stores** ([`store`]) - Hash and sorted-vector cell stores, and filling them from structures
//! - **Criteria** ([`criteria`]) - Thresholds, their text form, and the ordered classification of pairs
//! - **Striding** ([`stride`]) - Representative residue selection
//! - **Configuration** ([`config`]) - Cell widths, store choices and scan settings
//! - **Progress Monitoring** ([`progress`]) - Events for long-running builds and scans
//! - **Error Handling** ([`error`]) - Keyer and scan error types

pub mod config;
pub mod criteria;
pub mod error;
pub mod keyer;
pub mod progress;
pub mod store;
pub mod stride;
