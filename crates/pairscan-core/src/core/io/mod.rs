//! Readers for the plain-text inputs of a scan: structures and reference alignments.

pub mod alignment_file;
pub mod structure_file;
pub mod traits;
