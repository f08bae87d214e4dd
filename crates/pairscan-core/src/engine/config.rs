use super::criteria::QuadCriteria;
use super::error::KeyerError;
use super::keyer::parts::{IndexDirnKeyerPart, PhiPsiAngle, PhiPsiAngleKeyerPart, Skip, ViewAxis, ViewAxisKeyerPart};
use super::keyer::{DirectedKeyer, ResPairKeyer, StandardKeyer, Validation};
use super::stride::ScanStride;
use crate::core::geometry::angle::Angle;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which index store back end holds a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Hash,
    SortedVec,
}

/// How many cells each entry is written to when a store is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreDensity {
    /// One cell per entry, the one addressed by its own key. Queries scan close keys.
    #[default]
    Sparse,
    /// Every cell that a query within the criteria could address. Queries need one lookup.
    Dense,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Hash => write!(f, "hash"),
            StoreKind::SortedVec => write!(f, "sorted-vec"),
        }
    }
}

impl fmt::Display for StoreDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreDensity::Sparse => write!(f, "sparse"),
            StoreDensity::Dense => write!(f, "dense"),
        }
    }
}

/// Cell widths of the standard keyer dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyerConfig {
    pub view_cell_width: f64,
    pub angle_cell_width: Angle,
    pub validation: Validation,
}

impl KeyerConfig {
    pub const DEFAULT_VIEW_CELL_WIDTH: f64 = 4.0;
    pub const DEFAULT_ANGLE_CELL_WIDTH_DEGREES: f64 = 45.0;

    fn geometric_parts(
        &self,
    ) -> Result<
        (
            ViewAxisKeyerPart,
            ViewAxisKeyerPart,
            ViewAxisKeyerPart,
            PhiPsiAngleKeyerPart,
            PhiPsiAngleKeyerPart,
            PhiPsiAngleKeyerPart,
            PhiPsiAngleKeyerPart,
        ),
        KeyerError,
    > {
        Ok((
            ViewAxisKeyerPart::new(ViewAxis::X, self.view_cell_width)?,
            ViewAxisKeyerPart::new(ViewAxis::Y, self.view_cell_width)?,
            ViewAxisKeyerPart::new(ViewAxis::Z, self.view_cell_width)?,
            PhiPsiAngleKeyerPart::new(PhiPsiAngle::FromPhi, self.angle_cell_width)?,
            PhiPsiAngleKeyerPart::new(PhiPsiAngle::FromPsi, self.angle_cell_width)?,
            PhiPsiAngleKeyerPart::new(PhiPsiAngle::ToPhi, self.angle_cell_width)?,
            PhiPsiAngleKeyerPart::new(PhiPsiAngle::ToPsi, self.angle_cell_width)?,
        ))
    }

    /// Keys on the view vector and the four dihedrals; the direction slot is skipped.
    pub fn standard_keyer(&self) -> Result<StandardKeyer, KeyerError> {
        let (x, y, z, from_phi, from_psi, to_phi, to_psi) = self.geometric_parts()?;
        Ok(ResPairKeyer::new((
            x,
            y,
            z,
            from_phi,
            from_psi,
            to_phi,
            to_psi,
            Skip::new(IndexDirnKeyerPart),
        ))
        .with_validation(self.validation))
    }

    /// As [`KeyerConfig::standard_keyer`] but also keys on pair direction, which only finds
    /// every match when the criteria require matching directions.
    pub fn directed_keyer(&self) -> Result<DirectedKeyer, KeyerError> {
        let (x, y, z, from_phi, from_psi, to_phi, to_psi) = self.geometric_parts()?;
        Ok(ResPairKeyer::new((
            x,
            y,
            z,
            from_phi,
            from_psi,
            to_phi,
            to_psi,
            IndexDirnKeyerPart,
        ))
        .with_validation(self.validation))
    }
}

impl Default for KeyerConfig {
    fn default() -> Self {
        Self {
            view_cell_width: Self::DEFAULT_VIEW_CELL_WIDTH,
            angle_cell_width: Angle::from_degrees(Self::DEFAULT_ANGLE_CELL_WIDTH_DEGREES),
            validation: Validation::Checked,
        }
    }
}

/// Everything needed to build an index and run a scan against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub criteria: QuadCriteria,
    pub keyer: KeyerConfig,
    pub stride: ScanStride,
    pub index_store: StoreKind,
    pub query_store: StoreKind,
    pub index_density: StoreDensity,
}

#[derive(Default)]
pub struct ScanConfigBuilder {
    criteria: Option<QuadCriteria>,
    view_cell_width: Option<f64>,
    angle_cell_width: Option<Angle>,
    validation: Option<Validation>,
    stride: Option<ScanStride>,
    index_store: Option<StoreKind>,
    query_store: Option<StoreKind>,
    index_density: Option<StoreDensity>,
}

impl ScanConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criteria(mut self, criteria: QuadCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }
    pub fn view_cell_width(mut self, width: f64) -> Self {
        self.view_cell_width = Some(width);
        self
    }
    pub fn angle_cell_width(mut self, width: Angle) -> Self {
        self.angle_cell_width = Some(width);
        self
    }
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = Some(validation);
        self
    }
    pub fn stride(mut self, stride: ScanStride) -> Self {
        self.stride = Some(stride);
        self
    }
    pub fn index_store(mut self, kind: StoreKind) -> Self {
        self.index_store = Some(kind);
        self
    }
    pub fn query_store(mut self, kind: StoreKind) -> Self {
        self.query_store = Some(kind);
        self
    }
    pub fn index_density(mut self, density: StoreDensity) -> Self {
        self.index_density = Some(density);
        self
    }

    /// Criteria are required; every other setting falls back to its default.
    ///
    /// Cell widths and the search radii the criteria imply are validated here by building the
    /// keyer that [`crate::workflows::scan::run`] will use, so a bad setting is reported before
    /// any structure is read.
    pub fn build(self) -> Result<ScanConfig, ConfigError> {
        let defaults = KeyerConfig::default();
        let keyer = KeyerConfig {
            view_cell_width: self.view_cell_width.unwrap_or(defaults.view_cell_width),
            angle_cell_width: self.angle_cell_width.unwrap_or(defaults.angle_cell_width),
            validation: self.validation.unwrap_or(defaults.validation),
        };
        let standard = keyer
            .standard_keyer()
            .map_err(|e| ConfigError::InvalidParameter {
                name: "keyer",
                reason: e.to_string(),
            })?;
        let criteria = self
            .criteria
            .ok_or(ConfigError::MissingParameter("criteria"))?;

        let radii = if criteria.requires_matching_directions() {
            keyer
                .directed_keyer()
                .and_then(|directed| directed.check_criteria(&criteria))
        } else {
            standard.check_criteria(&criteria)
        };
        radii.map_err(|e| ConfigError::InvalidParameter {
            name: "criteria",
            reason: e.to_string(),
        })?;

        Ok(ScanConfig {
            criteria,
            keyer,
            stride: self.stride.unwrap_or_default(),
            index_store: self.index_store.unwrap_or(StoreKind::Hash),
            query_store: self.query_store.unwrap_or(StoreKind::SortedVec),
            index_density: self.index_density.unwrap_or_default(),
        })
    }
}
