use crate::cli::{CriteriaSource, DensityArg, StoreKindArg, ValidationArg};
use crate::error::{CliError, Result};
use pairscan::core::geometry::angle::Angle;
use pairscan::engine::config::ScanConfigBuilder;
use pairscan::engine::criteria::parse::parse_quad_criteria;
use pairscan::engine::criteria::{DirectionCriterion, QuadCriteria, QuadCriteriaBuilder};
use pairscan::engine::stride::{RepStrider, ScanStride};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
enum PartialDirection {
    MustMatch,
    NeedNotMatch,
}

impl From<PartialDirection> for DirectionCriterion {
    fn from(p: PartialDirection) -> Self {
        match p {
            PartialDirection::MustMatch => DirectionCriterion::MustMatch,
            PartialDirection::NeedNotMatch => DirectionCriterion::NeedNotMatch,
        }
    }
}

/// `[criteria]`: either a criteria string, individual thresholds, or a string refined by
/// thresholds. Angles are in degrees.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCriteriaConfig {
    string: Option<String>,
    direction: Option<PartialDirection>,
    #[serde(rename = "minimum-index-distance")]
    minimum_index_distance: Option<usize>,
    #[serde(rename = "maximum-squared-distance")]
    maximum_squared_distance: Option<f64>,
    #[serde(rename = "maximum-frame-angle")]
    maximum_frame_angle: Option<f64>,
    #[serde(rename = "maximum-phi-angle")]
    maximum_phi_angle: Option<f64>,
    #[serde(rename = "maximum-psi-angle")]
    maximum_psi_angle: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialKeyerConfig {
    #[serde(rename = "view-cell-width")]
    view_cell_width: Option<f64>,
    #[serde(rename = "angle-cell-width")]
    angle_cell_width: Option<f64>,
    validation: Option<ValidationArg>,
}

/// `[stride]`: `all` sets every side; the per-side keys override it.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStrideConfig {
    all: Option<usize>,
    #[serde(rename = "query-from")]
    query_from: Option<usize>,
    #[serde(rename = "query-to")]
    query_to: Option<usize>,
    #[serde(rename = "index-from")]
    index_from: Option<usize>,
    #[serde(rename = "index-to")]
    index_to: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStoreConfig {
    index: Option<StoreKindArg>,
    query: Option<StoreKindArg>,
    density: Option<DensityArg>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialScanConfig {
    criteria: Option<PartialCriteriaConfig>,
    keyer: Option<PartialKeyerConfig>,
    stride: Option<PartialStrideConfig>,
    store: Option<PartialStoreConfig>,
}

impl PartialScanConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the config file named by `source`, or starts from defaults when there is none.
    pub fn load(source: &CriteriaSource) -> Result<Self> {
        match &source.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Criteria from the command line win over the file; the file wins over the defaults.
    pub fn resolve_criteria(&self, source: &CriteriaSource) -> Result<QuadCriteria> {
        if let Some(text) = &source.criteria {
            debug!("Using criteria from the command line.");
            return Ok(parse_quad_criteria(text)?);
        }
        let Some(partial) = &self.criteria else {
            return Ok(QuadCriteria::default());
        };

        let base = match &partial.string {
            Some(text) => parse_quad_criteria(text)?,
            None => QuadCriteria::default(),
        };
        let mut builder = QuadCriteriaBuilder::from_criteria(&base);
        if let Some(direction) = partial.direction {
            builder = builder.index_direction_criterion(direction.into());
        }
        if let Some(distance) = partial.minimum_index_distance {
            builder = builder.minimum_index_distance(distance);
        }
        if let Some(distance) = partial.maximum_squared_distance {
            builder = builder.maximum_squared_distance(distance);
        }
        if let Some(degrees) = partial.maximum_frame_angle {
            builder = builder.maximum_frame_angle_difference(Angle::from_degrees(degrees));
        }
        if let Some(degrees) = partial.maximum_phi_angle {
            builder = builder.maximum_phi_angle_difference(Angle::from_degrees(degrees));
        }
        if let Some(degrees) = partial.maximum_psi_angle {
            builder = builder.maximum_psi_angle_difference(Angle::from_degrees(degrees));
        }
        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn resolve_stride(&self, source: &CriteriaSource) -> ScanStride {
        let file = self.stride.as_ref();
        let all = source
            .stride
            .or_else(|| file.and_then(|s| s.all))
            .unwrap_or(0);
        let side = |pick: fn(&PartialStrideConfig) -> Option<usize>| {
            // A stride given on the command line applies to every side.
            let stride = match source.stride {
                Some(stride) => stride,
                None => file.and_then(pick).unwrap_or(all),
            };
            RepStrider::new(stride)
        };
        ScanStride::new(
            side(|s| s.query_from),
            side(|s| s.query_to),
            side(|s| s.index_from),
            side(|s| s.index_to),
        )
    }

    /// Everything but the store overrides of the `scan` command.
    pub fn into_builder(self, source: &CriteriaSource) -> Result<ScanConfigBuilder> {
        let criteria = self.resolve_criteria(source)?;
        let stride = self.resolve_stride(source);

        let mut builder = ScanConfigBuilder::new().criteria(criteria).stride(stride);
        if let Some(keyer) = self.keyer {
            if let Some(width) = keyer.view_cell_width {
                builder = builder.view_cell_width(width);
            }
            if let Some(degrees) = keyer.angle_cell_width {
                builder = builder.angle_cell_width(Angle::from_degrees(degrees));
            }
            if let Some(validation) = keyer.validation {
                builder = builder.validation(validation.into());
            }
        }
        if let Some(store) = self.store {
            if let Some(kind) = store.index {
                builder = builder.index_store(kind.into());
            }
            if let Some(kind) = store.query {
                builder = builder.query_store(kind.into());
            }
            if let Some(density) = store.density {
                builder = builder.index_density(density.into());
            }
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairscan::engine::config::{StoreDensity, StoreKind};
    use pairscan::engine::keyer::Validation;
    use std::fs;
    use tempfile::tempdir;

    fn source(config: Option<&Path>) -> CriteriaSource {
        CriteriaSource {
            config: config.map(Path::to_path_buf),
            ..Default::default()
        }
    }

    fn load_str(content: &str) -> (PartialScanConfig, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairscan.toml");
        fs::write(&path, content).unwrap();
        (PartialScanConfig::from_file(&path).unwrap(), dir)
    }

    #[test]
    fn missing_config_uses_defaults() {
        let partial = PartialScanConfig::load(&CriteriaSource::default()).unwrap();
        let config = partial.into_builder(&CriteriaSource::default()).unwrap().build().unwrap();
        assert_eq!(config.criteria, QuadCriteria::default());
        assert_eq!(config.stride, ScanStride::default());
        assert_eq!(config.index_store, StoreKind::Hash);
    }

    #[test]
    fn file_sections_are_applied() {
        let (partial, _dir) = load_str(
            r#"
            [criteria]
            string = "dist_co=12,dirn_co=0,index_dist_co=-11,frame_ang_co=22.5,phi_ang_co=22.5,psi_ang_co=22.5"
            maximum-phi-angle = 30.0

            [keyer]
            view-cell-width = 3.0
            angle-cell-width = 30.0
            validation = "unchecked"

            [stride]
            all = 1
            index-to = 2

            [store]
            index = "sorted-vec"
            density = "dense"
            "#,
        );
        let config = partial.into_builder(&CriteriaSource::default()).unwrap().build().unwrap();

        assert_eq!(config.criteria.maximum_squared_distance(), 12.0);
        assert!(!config.criteria.requires_matching_directions());
        assert_eq!(config.criteria.maximum_phi_angle_difference(), Angle::from_degrees(30.0));
        assert_eq!(config.criteria.maximum_psi_angle_difference(), Angle::from_degrees(22.5));
        assert_eq!(config.keyer.view_cell_width, 3.0);
        assert_eq!(config.keyer.validation, Validation::Unchecked);
        assert_eq!(config.stride.query_from().stride(), 1);
        assert_eq!(config.stride.index_to().stride(), 2);
        assert_eq!(config.index_store, StoreKind::SortedVec);
        assert_eq!(config.query_store, StoreKind::SortedVec);
        assert_eq!(config.index_density, StoreDensity::Dense);
    }

    #[test]
    fn command_line_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairscan.toml");
        fs::write(&path, "[criteria]\nminimum-index-distance = 4\n\n[stride]\nquery-from = 3\n").unwrap();

        let mut source = source(Some(&path));
        source.criteria = Some(
            "dist_co=20,dirn_co=1,index_dist_co=-8,frame_ang_co=30,phi_ang_co=45,psi_ang_co=45".to_string(),
        );
        source.stride = Some(1);

        let partial = PartialScanConfig::load(&source).unwrap();
        let config = partial.into_builder(&source).unwrap().build().unwrap();
        assert_eq!(config.criteria.minimum_index_distance(), 8);
        assert_eq!(config.stride, ScanStride::uniform(RepStrider::new(1)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[keyer]\ncell-width = 2.0\n").unwrap();
        assert!(matches!(
            PartialScanConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn invalid_threshold_is_a_config_error() {
        let (partial, _dir) = load_str("[criteria]\nmaximum-frame-angle = 200.0\n");
        assert!(matches!(
            partial.resolve_criteria(&CriteriaSource::default()),
            Err(CliError::Config(_))
        ));
    }
}
