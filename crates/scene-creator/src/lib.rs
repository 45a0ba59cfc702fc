//! Scene Creator
//!
//! Validates raw constellation and ground station parameter lists, builds the
//! constellations and stations they describe, and serializes the resulting
//! scene for downstream renderers.
//!
//! # Scene numbering
//!
//! Satellites are numbered across the whole scene: each constellation starts
//! where the previous one stopped, so `Sat 1..8` followed by `Sat 9..20`.
//!
//! # Rejection
//!
//! Validation reports every broken rule at once as a list of [`Violation`]s.
//! Nothing is built unless the full parameter set passes.

use constellations::{ConstellationError, Satellite, StreetsOfCoverage, WalkerConstellation};
use ground_stations::{GroundStation, StationError, StationViolation};
use serde_json::Value;
use thiserror::Error;

pub mod factory;
pub mod loader;
pub mod params;
pub mod serialize;

pub use factory::{constellation_creator, create_scene};

/// Upper bound on satellites across every constellation in one scene
pub const MAX_SCENE_SATELLITES: u32 = 1_000_000;
pub use params::{ConstellationParams, SceneRequest};
pub use serialize::{render, scene_to_dict, scene_to_xml, OutputFormat};

/// A single rule broken by a constellation or ground station parameter set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("Constellation count must be a positive integer: {0}")]
    ConstellationCount(f64),
    #[error("{field} has {actual} entries for {expected} constellations")]
    LengthMismatch {
        field: &'static str,
        expected: f64,
        actual: usize,
    },
    #[error("Constellation {index}: satellite count must be a positive integer: {value}")]
    SatelliteCount { index: usize, value: f64 },
    #[error("Constellation {index}: {value} satellites exceeds the limit of {limit}")]
    SatelliteCountTooLarge { index: usize, value: f64, limit: u32 },
    #[error("Scene holds {total} satellites, limit is {limit}")]
    SceneTooLarge { total: f64, limit: u32 },
    #[error("Constellation {index}: plane count must be a positive integer: {value}")]
    PlaneCount { index: usize, value: f64 },
    #[error("Constellation {index}: {satellites} satellites do not divide into {planes} planes")]
    Divisibility {
        index: usize,
        satellites: f64,
        planes: f64,
    },
    #[error("Constellation {index}: phasing {phasing} outside [0, {planes})")]
    PhasingOutOfRange {
        index: usize,
        phasing: f64,
        planes: f64,
    },
    #[error("Constellation {index}: phasing must be integral: {phasing}")]
    PhasingNotIntegral { index: usize, phasing: f64 },
    #[error("Constellation {index}: inclination outside [-90, 90]: {value}")]
    InclinationOutOfRange { index: usize, value: f64 },
    #[error("Constellation {index}: altitude must be non-negative: {value}")]
    NegativeAltitude { index: usize, value: f64 },
    #[error("Constellation {index}: eccentricity outside [0, 1): {value}")]
    EccentricityOutOfRange { index: usize, value: f64 },
    #[error("Constellation {index}: beam width outside [0, 180]: {value}")]
    BeamWidthOutOfRange { index: usize, value: f64 },
    #[error("Ground stations: {0}")]
    GroundStation(#[from] StationViolation),
}

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Invalid parameters: {}", summarize(.0))]
    InvalidParameters(Vec<Violation>),
    #[error("Constellation geometry error: {0}")]
    Constellation(#[from] ConstellationError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StationError> for SceneError {
    fn from(err: StationError) -> Self {
        match err {
            StationError::InvalidParameters(violations) => SceneError::InvalidParameters(
                violations.into_iter().map(Violation::from).collect(),
            ),
        }
    }
}

impl SceneError {
    /// Broken rules, empty for errors that aren't parameter rejections
    pub fn violations(&self) -> &[Violation] {
        match self {
            SceneError::InvalidParameters(v) => v,
            _ => &[],
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// One item of a scene, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEntity {
    Walker(WalkerConstellation),
    Streets(StreetsOfCoverage),
    GroundStation(GroundStation),
}

impl SceneEntity {
    pub fn name(&self) -> &str {
        match self {
            SceneEntity::Walker(w) => &w.spec().name,
            SceneEntity::Streets(s) => &s.spec().name,
            SceneEntity::GroundStation(gs) => gs.name(),
        }
    }

    /// Satellites carried by this entity; empty for ground stations
    pub fn satellites(&self) -> &[Satellite] {
        match self {
            SceneEntity::Walker(w) => w.satellites(),
            SceneEntity::Streets(s) => s.satellites(),
            SceneEntity::GroundStation(_) => &[],
        }
    }

    pub fn as_dict(&self) -> Value {
        match self {
            SceneEntity::Walker(w) => w.as_dict(),
            SceneEntity::Streets(s) => s.as_dict(),
            SceneEntity::GroundStation(gs) => gs.as_dict(),
        }
    }

    pub fn as_xml(&self) -> String {
        match self {
            SceneEntity::Walker(w) => w.as_xml(),
            SceneEntity::Streets(s) => s.as_xml(),
            SceneEntity::GroundStation(gs) => gs.as_xml(),
        }
    }
}

pub type Scene = Vec<SceneEntity>;
