//! Raw scene parameters
//!
//! These mirror the parameter lists scene authors write by hand. Counts are
//! floats so that `2.5` planes is reported as a violation instead of being
//! silently truncated.

use constellations::{Body, StreetsSpec, DEFAULT_SAT_NAME};
use ground_stations::GroundStationParams;
use serde::{Deserialize, Serialize};

/// Parallel per-constellation lists, one entry per Walker constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationParams {
    pub num_constellations: f64,
    pub satellite_nums: Vec<f64>,
    pub satellite_planes: Vec<f64>,
    pub plane_phasing: Vec<f64>,
    /// Degrees
    pub inclination: Vec<f64>,
    /// km
    pub altitude: Vec<f64>,
    pub eccentricity: Vec<f64>,
    /// Degrees
    pub beam_width: Vec<f64>,
    #[serde(default = "default_sat_name")]
    pub sat_name: String,
    #[serde(default)]
    pub focus: Body,
}

fn default_sat_name() -> String {
    DEFAULT_SAT_NAME.to_string()
}

/// Everything needed for one scene.
///
/// Streets-of-Coverage constellations are optional and numbered after the
/// Walker constellations; their own `starting_number` is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRequest {
    pub constellations: ConstellationParams,
    #[serde(default)]
    pub streets: Vec<StreetsSpec>,
    pub ground_stations: GroundStationParams,
}
