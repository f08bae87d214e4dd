use super::config::ConfigError;
use thiserror::Error;

/// Failures raised by keyer parts and composite keyers.
///
/// All of these are configuration or precondition violations: the same call with the same
/// input fails identically, so none is retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KeyerError {
    #[error("Invalid cell width {width} for {part}: {reason}")]
    InvalidCellWidth {
        part: &'static str,
        width: f64,
        reason: &'static str,
    },

    #[error("Angle {degrees}° is outside the half-open range [0°, 360°)")]
    AngleOutOfRange { degrees: f64 },

    #[error("Search radius {radius} for {part} is outside the permitted range {range}")]
    SearchRadiusOutOfRange {
        part: &'static str,
        radius: f64,
        range: &'static str,
    },

    #[error("Value {value} for {part} is not a finite number")]
    NonFiniteValue { part: &'static str, value: f64 },

    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Keyer error: {source}")]
    Keyer {
        #[from]
        source: KeyerError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Residue index {index} is out of range for structure '{structure}' with {len} residues")]
    ResidueIndexOutOfRange {
        structure: String,
        index: usize,
        len: usize,
    },

    #[error("Cannot scan: {0}")]
    EmptyInput(&'static str),

    #[error("Dense index was built for criteria {built} but scanned with {requested}")]
    DenseCriteriaMismatch { built: String, requested: String },
}
