use super::{DirectionCriterion, QuadCriteria, QuadCriteriaBuilder};
use crate::core::geometry::angle::Angle;
use crate::engine::config::ConfigError;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CriteriaParseError {
    #[error("Part '{0}' of the criteria string is not of the form name=value")]
    MalformedPart(String),

    #[error("Unknown criteria field '{0}'")]
    UnknownField(String),

    #[error("Criteria field '{name}' has non-numeric value '{value}'")]
    InvalidNumber { name: String, value: String },

    #[error("Criteria string is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Index distance cutoff {0} must be a non-positive whole number")]
    InvalidIndexDistance(f64),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

const FIELDS: [&str; 6] = ["dist", "dirn", "index_dist", "frame_ang", "phi_ang", "psi_ang"];

/// Parses criteria written as comma-separated cutoffs, e.g.
/// `dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5`.
///
/// - whitespace is ignored and the `_co` suffix is optional
/// - `dist` is the maximum squared view distance
/// - a nonzero `dirn` requires matching directions
/// - `index_dist` is the negated minimum index distance
/// - angles are in degrees
/// - every field is required
pub fn parse_quad_criteria(text: &str) -> Result<QuadCriteria, CriteriaParseError> {
    let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    let mut values: HashMap<&str, f64> = HashMap::new();
    for part in stripped.split(',') {
        let (raw_name, raw_value) = part
            .split_once('=')
            .filter(|(_, value)| !value.contains('='))
            .ok_or_else(|| CriteriaParseError::MalformedPart(part.to_string()))?;
        let name = raw_name.strip_suffix("_co").unwrap_or(raw_name);
        let field = FIELDS
            .iter()
            .find(|&&f| f == name)
            .copied()
            .ok_or_else(|| CriteriaParseError::UnknownField(name.to_string()))?;
        let value = raw_value
            .parse::<f64>()
            .map_err(|_| CriteriaParseError::InvalidNumber {
                name: name.to_string(),
                value: raw_value.to_string(),
            })?;
        values.insert(field, value);
    }

    let get = |field: &'static str| {
        values
            .get(field)
            .copied()
            .ok_or(CriteriaParseError::MissingField(field))
    };
    let dist = get("dist")?;
    let dirn = get("dirn")?;
    let index_dist = get("index_dist")?;
    let frame_ang = get("frame_ang")?;
    let phi_ang = get("phi_ang")?;
    let psi_ang = get("psi_ang")?;

    let minimum_index_distance = -index_dist;
    if minimum_index_distance < 0.0 || minimum_index_distance.fract() != 0.0 {
        return Err(CriteriaParseError::InvalidIndexDistance(index_dist));
    }

    let direction = if dirn != 0.0 {
        DirectionCriterion::MustMatch
    } else {
        DirectionCriterion::NeedNotMatch
    };

    Ok(QuadCriteriaBuilder::new()
        .index_direction_criterion(direction)
        .minimum_index_distance(minimum_index_distance as usize)
        .maximum_squared_distance(dist)
        .maximum_frame_angle_difference(Angle::from_degrees(frame_ang))
        .maximum_phi_angle_difference(Angle::from_degrees(phi_ang))
        .maximum_psi_angle_difference(Angle::from_degrees(psi_ang))
        .build()?)
}

/// A survey grid of criteria around the default, from tight to permissive.
pub fn standard_quad_criteria() -> Result<Vec<QuadCriteria>, CriteriaParseError> {
    STANDARD_QUAD_CRITERIA
        .iter()
        .map(|text| parse_quad_criteria(text))
        .collect()
}

pub const STANDARD_QUAD_CRITERIA: &[&str] = &[
    "dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=12,dirn_co=0,index_dist_co=-16,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=12,dirn_co=0,index_dist_co=-21,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=12,dirn_co=0,index_dist_co=-31,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-16,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-21,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-26,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=16,dirn_co=0,index_dist_co=-31,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=20,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=20,dirn_co=0,index_dist_co=-16,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=20,dirn_co=0,index_dist_co=-16,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=45",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=24,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=24,dirn_co=0,index_dist_co=-16,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-16,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-16,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=24,dirn_co=0,index_dist_co=-21,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=45",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=28,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=28,dirn_co=0,index_dist_co=-16,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-16,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=28,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=28,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=45,psi_ang_co=22.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=32,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=32,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=45,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=112.5",
    "dist_co=36,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=135",
    "dist_co=36,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=36,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=36,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=22.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=112.5",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=135",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-11,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=112.5,phi_ang_co=180,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=112.5,phi_ang_co=90,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=135,phi_ang_co=180,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=157.5,phi_ang_co=180,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=180,phi_ang_co=180,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=112.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=135",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=157.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=67.5,phi_ang_co=67.5,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=112.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=135",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=157.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=90,phi_ang_co=67.5,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-1,frame_ang_co=90,phi_ang_co=90,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=67.5,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=112.5",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=135",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=157.5",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=180",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=45",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=45,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=112.5",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=135",
    "dist_co=40,dirn_co=0,index_dist_co=-6,frame_ang_co=67.5,phi_ang_co=90,psi_ang_co=67.5",
    "dist_co=8,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=8,dirn_co=0,index_dist_co=-16,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
    "dist_co=8,dirn_co=0,index_dist_co=-31,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
];

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn parses_full_criteria_string_with_spaces() {
        let criteria = parse_quad_criteria(
            "dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5, phi_ang_co=45,psi_ang_co=67.5",
        )
        .unwrap();
        assert!(!criteria.requires_matching_directions());
        assert_eq!(criteria.minimum_index_distance(), 11);
        assert!(f64_approx_equal(criteria.maximum_squared_distance(), 12.0));
        assert!(f64_approx_equal(criteria.maximum_frame_angle_difference().degrees(), 22.5));
        assert!(f64_approx_equal(criteria.maximum_phi_angle_difference().degrees(), 45.0));
        assert!(f64_approx_equal(criteria.maximum_psi_angle_difference().degrees(), 67.5));
    }

    #[test]
    fn co_suffix_is_optional_and_nonzero_dirn_requires_matching() {
        let criteria = parse_quad_criteria(
            "dist=40,dirn=1,index_dist=-11,frame_ang=35,phi_ang=67.5,psi_ang=67.5",
        )
        .unwrap();
        assert!(criteria.requires_matching_directions());
        assert_eq!(
            criteria.minimum_index_distance(),
            QuadCriteria::default().minimum_index_distance()
        );
    }

    #[test]
    fn part_without_two_halves_is_rejected() {
        let result = parse_quad_criteria("dist_co=12,dirn_co,index_dist_co=-11");
        assert_eq!(
            result,
            Err(CriteriaParseError::MalformedPart("dirn_co".to_string()))
        );
        let result = parse_quad_criteria("dist_co=12=3");
        assert!(matches!(result, Err(CriteriaParseError::MalformedPart(_))));
    }

    #[test]
    fn missing_field_is_named() {
        let result = parse_quad_criteria(
            "dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5",
        );
        assert_eq!(result, Err(CriteriaParseError::MissingField("psi_ang")));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = parse_quad_criteria("omega_co=3");
        assert_eq!(
            result,
            Err(CriteriaParseError::UnknownField("omega".to_string()))
        );
    }

    #[test]
    fn positive_index_distance_cutoff_is_rejected() {
        let result = parse_quad_criteria(
            "dist_co=12,dirn_co=0,index_dist_co=11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5",
        );
        assert_eq!(result, Err(CriteriaParseError::InvalidIndexDistance(11.0)));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let result = parse_quad_criteria("dist_co=twelve");
        assert!(matches!(
            result,
            Err(CriteriaParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn out_of_range_angle_surfaces_config_error() {
        let result = parse_quad_criteria(
            "dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=200,phi_ang_co=22.5,psi_ang_co=22.5",
        );
        assert!(matches!(result, Err(CriteriaParseError::Invalid(_))));
    }

    #[test]
    fn every_standard_criteria_string_parses() {
        let all = standard_quad_criteria().unwrap();
        assert_eq!(all.len(), STANDARD_QUAD_CRITERIA.len());
        assert!(all.iter().all(|c| !c.requires_matching_directions()));
        assert!(all.iter().any(|c| c.minimum_index_distance() == 1));
    }
}
