//! # pairscan Core Library
//!
//! Fast comparison of protein structures through spatially keyed residue pairs.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless models of residues and residue pairs, the
//!   angle and frame geometry they are built from, and readers for structure and
//!   alignment files.
//!
//! - **[`engine`]: The Logic Core.** Keyer parts and composite keyers, the hash and
//!   sorted-vector index stores, match criteria with their ordered classification, and
//!   representative striding.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on the engine: scanning a
//!   query structure against an index of structures, and checking how an alignment fares
//!   under the criteria.

pub mod core;
pub mod engine;
pub mod workflows;
