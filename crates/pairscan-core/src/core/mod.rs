//! # Core Module
//!
//! Stateless building blocks of the scanner.
//!
//! - **Geometry** ([`geometry`]) - circular angle arithmetic, residue frames and backbone helpers
//! - **Residue models** ([`models`]) - already-parsed residues, structures and residue pairs
//! - **Input files** ([`io`]) - TOML structure files and plain-text alignments
//!
//! Nothing here knows about keys, cells or criteria; those live in [`crate::engine`].

pub mod geometry;
pub mod io;
pub mod models;
