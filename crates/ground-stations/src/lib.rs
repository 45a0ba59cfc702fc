//! Ground Stations Library
//!
//! Ground station arrays for constellation scenes. Stations are built from
//! parallel latitude / longitude / elevation lists after the whole parameter
//! set has been checked.

use orbital_geometry::{polar_to_cartesian, xml_escape, Body, Vector3};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// Default ground station name prefix
pub const DEFAULT_STATION_NAME: &str = "GS";

/// A single rule broken by a ground station parameter set.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StationViolation {
    #[error("Ground station count must be a positive integer: {0}")]
    StationCount(f64),
    #[error("Ground station count {expected} does not match {actual} latitudes")]
    LatitudeCount { expected: f64, actual: usize },
    #[error("{field} has {actual} entries, expected {expected} to match latitudes")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{actual} beam widths given for {expected} stations")]
    BeamCountMismatch { expected: usize, actual: usize },
    #[error("Single-entry beam width list; pass a shared scalar instead")]
    SingletonBeamList,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StationError {
    #[error("Invalid ground station parameters ({} violations)", .0.len())]
    InvalidParameters(Vec<StationViolation>),
}

pub type Result<T> = std::result::Result<T, StationError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
}

impl GeoLocation {
    /// Body-centred cartesian position in km on a spherical `focus`.
    pub fn position_km(&self, focus: Body) -> Vector3<f64> {
        let r = focus.radius_km() + self.elevation_m / 1000.0;
        polar_to_cartesian(
            r,
            (90.0 - self.latitude).to_radians(),
            self.longitude.to_radians(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStation {
    pub name: String,
    pub location: GeoLocation,
    pub beam_width_deg: f64,
}

impl GroundStation {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, elevation_m: f64, beam_width_deg: f64) -> Self {
        Self {
            name: name.into(),
            location: GeoLocation {
                latitude,
                longitude,
                elevation_m,
            },
            beam_width_deg,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Station name to parameter map, tagged `"Type": "station"`.
    pub fn as_dict(&self) -> Value {
        let mut station = Map::new();
        station.insert(
            self.name.clone(),
            json!({
                "latitude": self.location.latitude,
                "longitude": self.location.longitude,
                "elevation": self.location.elevation_m,
                "beam": self.beam_width_deg,
                "type": "station",
            }),
        );
        station.insert("Type".to_string(), Value::from("station"));
        Value::Object(station)
    }

    /// Legacy Pigi entity fragment.
    pub fn as_xml(&self) -> String {
        let mut xml = format!(
            "\t\t<Entity Type=\"GroundStation\" Name=\"{}\">\n\t\t\t<PropertySection Name=\"UserProperties\">\n",
            xml_escape(&self.name)
        );
        for (key, value) in [
            ("latitude", self.location.latitude),
            ("longitude", self.location.longitude),
            ("elevation", self.location.elevation_m),
            ("beam", self.beam_width_deg),
        ] {
            xml.push_str(&format!(
                "\t\t\t\t<FloatPropertyValue name=\"{}\" value=\"{}\"/>\n",
                key, value
            ));
        }
        xml.push_str("\t\t\t</PropertySection>\n\t\t</Entity>\n");
        xml
    }
}

/// Beam widths for an array: one value shared by every station, or one per station.
///
/// A bare number and a list stay distinct on the wire, so `60` and `[60]`
/// deserialize to different variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BeamWidths {
    Shared(f64),
    PerStation(Vec<f64>),
}

impl BeamWidths {
    fn for_station(&self, idx: usize) -> f64 {
        match self {
            BeamWidths::Shared(beam) => *beam,
            BeamWidths::PerStation(beams) => beams[idx],
        }
    }
}

/// Raw ground station array parameters.
///
/// The count is kept as a float so that non-integral input can be rejected
/// rather than truncated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStationParams {
    pub num_ground_stations: f64,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    pub elevations: Vec<f64>,
    pub beam_widths: BeamWidths,
    #[serde(default = "default_station_name")]
    pub name: String,
}

fn default_station_name() -> String {
    DEFAULT_STATION_NAME.to_string()
}

impl GroundStationParams {
    /// Every rule this parameter set breaks, in check order.
    pub fn violations(&self) -> Vec<StationViolation> {
        let mut violations = Vec::new();
        let count = self.num_ground_stations;
        let stations = self.latitudes.len();

        if !(count >= 1.0) || count.fract() != 0.0 {
            violations.push(StationViolation::StationCount(count));
        }
        if count != stations as f64 {
            violations.push(StationViolation::LatitudeCount {
                expected: count,
                actual: stations,
            });
        }
        for (field, values) in [("longitudes", &self.longitudes), ("elevations", &self.elevations)] {
            if values.len() != stations {
                violations.push(StationViolation::ShapeMismatch {
                    field,
                    expected: stations,
                    actual: values.len(),
                });
            }
        }
        if let BeamWidths::PerStation(beams) = &self.beam_widths {
            if beams.len() == 1 {
                violations.push(StationViolation::SingletonBeamList);
            } else if beams.len() != stations {
                violations.push(StationViolation::BeamCountMismatch {
                    expected: stations,
                    actual: beams.len(),
                });
            }
        }

        violations
    }
}

/// Build one station per latitude, named `{name}{index}`.
///
/// Nothing is built unless the whole parameter set is valid.
pub fn ground_array_creator(params: &GroundStationParams) -> Result<Vec<GroundStation>> {
    let violations = params.violations();
    if !violations.is_empty() {
        warn!("Rejected ground station array: {} violations", violations.len());
        return Err(StationError::InvalidParameters(violations));
    }

    let stations: Vec<GroundStation> = params
        .latitudes
        .iter()
        .zip(&params.longitudes)
        .zip(&params.elevations)
        .enumerate()
        .map(|(idx, ((&lat, &lon), &elev))| {
            GroundStation::new(
                format!("{}{}", params.name, idx),
                lat,
                lon,
                elev,
                params.beam_widths.for_station(idx),
            )
        })
        .collect();

    debug!("Built {} ground stations", stations.len());
    Ok(stations)
}
