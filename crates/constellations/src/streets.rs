//! Streets-of-Coverage constellation
//!
//! Polar orbits sized so that the coverage circles of neighbouring satellites
//! in a plane overlap enough to leave a continuous ground "street" of the
//! requested width beneath the orbit.
//!
//! Coverage geometry is computed in radians throughout. Satellites receive
//! their true anomalies in degrees like every other element.

use crate::satellite::{satellites_dict, write_satellite_lines};
use crate::{default_sat_name, ConstellationError, Result, Satellite, MAX_SATELLITES_PER_CONSTELLATION};
use orbital_geometry::Body;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::f64::consts::TAU;
use std::fmt;
use tracing::debug;

/// Polar orbit
pub const STREETS_INCLINATION_DEG: f64 = 90.0;

/// Upper bound on satellites in one street
pub const MAX_SATELLITES_PER_STREET: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetsSpec {
    pub street_width_km: f64,
    pub altitude_km: f64,
    pub beam_width_deg: f64,
    /// One RAAN per street
    pub raan_deg: Vec<f64>,
    #[serde(default = "default_sat_name")]
    pub name: String,
    #[serde(default)]
    pub focus: Body,
    #[serde(default)]
    pub starting_number: u32,
}

impl StreetsSpec {
    pub fn new(street_width_km: f64, altitude_km: f64, beam_width_deg: f64, raan_deg: Vec<f64>) -> Self {
        Self {
            street_width_km,
            altitude_km,
            beam_width_deg,
            raan_deg,
            name: default_sat_name(),
            focus: Body::default(),
            starting_number: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_focus(mut self, focus: Body) -> Self {
        self.focus = focus;
        self
    }

    pub fn starting_at(mut self, starting_number: u32) -> Self {
        self.starting_number = starting_number;
        self
    }

    /// Satellites across all streets, computed without building them.
    pub fn planned_satellites(&self) -> Result<u64> {
        self.check()?;
        let (radius, _) = coverage_footprint(self.altitude_km, self.beam_width_deg, self.focus)?;
        let (_, spacing) = street_spacing(radius, self.street_width_km, self.focus)?;
        Ok(required_satellites(spacing)? as u64 * self.raan_deg.len() as u64)
    }

    fn check(&self) -> Result<()> {
        if !(0.0..180.0).contains(&self.beam_width_deg) {
            return Err(ConstellationError::InvalidBeamWidth(self.beam_width_deg));
        }
        if !(self.altitude_km >= 0.0) {
            return Err(ConstellationError::NegativeAltitude(self.altitude_km));
        }
        if !(self.street_width_km >= 0.0) {
            return Err(ConstellationError::NegativeStreetWidth(self.street_width_km));
        }
        if self.raan_deg.is_empty() {
            return Err(ConstellationError::NoStreets);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetsOfCoverage {
    spec: StreetsSpec,
    coverage_radius_km: f64,
    coverage_angle_rad: f64,
    lateral_half_chord_km: f64,
    angular_spacing_rad: f64,
    num_satellites: u32,
    true_anomaly_deg: Vec<f64>,
    satellites: Vec<Satellite>,
}

impl StreetsOfCoverage {
    pub fn build(spec: StreetsSpec) -> Result<Self> {
        spec.check()?;
        let (coverage_radius_km, coverage_angle_rad) =
            coverage_footprint(spec.altitude_km, spec.beam_width_deg, spec.focus)?;
        let (lateral_half_chord_km, angular_spacing_rad) =
            street_spacing(coverage_radius_km, spec.street_width_km, spec.focus)?;
        let num_satellites = required_satellites(angular_spacing_rad)?;
        let total = num_satellites as u64 * spec.raan_deg.len() as u64;
        if total > MAX_SATELLITES_PER_CONSTELLATION as u64 {
            return Err(ConstellationError::TooManySatellites {
                required: total as f64,
                limit: MAX_SATELLITES_PER_CONSTELLATION,
            });
        }
        let true_anomaly_deg = true_anomalies(num_satellites, angular_spacing_rad);

        let per_street = num_satellites as usize;
        let mut satellites = Vec::with_capacity(per_street * spec.raan_deg.len());
        for (street, &raan) in spec.raan_deg.iter().enumerate() {
            for (slot, &ta) in true_anomaly_deg.iter().enumerate() {
                let number = spec.starting_number as usize + street * per_street + slot + 1;
                satellites.push(Satellite {
                    name: format!("{} {}", spec.name, number),
                    altitude_km: spec.altitude_km,
                    eccentricity: 0.0,
                    inclination_deg: STREETS_INCLINATION_DEG,
                    raan_deg: raan,
                    perigee_deg: 0.0,
                    true_anomaly_deg: ta,
                    beam_width_deg: spec.beam_width_deg,
                    focus: spec.focus,
                });
            }
        }

        debug!(
            "Built streets-of-coverage '{}': {} streets x {} satellites, spacing {:.4} rad",
            spec.name,
            spec.raan_deg.len(),
            num_satellites,
            angular_spacing_rad
        );

        Ok(Self {
            spec,
            coverage_radius_km,
            coverage_angle_rad,
            lateral_half_chord_km,
            angular_spacing_rad,
            num_satellites,
            true_anomaly_deg,
            satellites,
        })
    }

    pub fn spec(&self) -> &StreetsSpec {
        &self.spec
    }

    pub fn inclination_deg(&self) -> f64 {
        STREETS_INCLINATION_DEG
    }

    /// Ground distance from the sub-satellite point to the coverage edge
    pub fn coverage_radius_km(&self) -> f64 {
        self.coverage_radius_km
    }

    /// Central angle subtended by the coverage radius
    pub fn coverage_angle_rad(&self) -> f64 {
        self.coverage_angle_rad
    }

    pub fn lateral_half_chord_km(&self) -> f64 {
        self.lateral_half_chord_km
    }

    pub fn angular_spacing_rad(&self) -> f64 {
        self.angular_spacing_rad
    }

    /// Satellites in each street
    pub fn num_satellites(&self) -> u32 {
        self.num_satellites
    }

    pub fn true_anomaly_deg(&self) -> &[f64] {
        &self.true_anomaly_deg
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn as_dict(&self) -> Value {
        satellites_dict(&self.satellites)
    }

    pub fn as_xml(&self) -> String {
        self.satellites.iter().map(Satellite::as_xml).collect()
    }
}

impl fmt::Display for StreetsOfCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_satellite_lines(f, &self.satellites)
    }
}

/// Coverage radius (km) and central half-angle (rad) seen under `beam_width_deg`.
///
/// The flat chord `altitude * tan(beam / 2)` is wrapped onto the body surface
/// as a great-circle arc.
pub fn coverage_footprint(altitude_km: f64, beam_width_deg: f64, focus: Body) -> Result<(f64, f64)> {
    let radius = focus.radius_km();
    let chord_km = altitude_km * (beam_width_deg / 2.0).to_radians().tan();
    let ratio = chord_km / radius;
    if !(0.0..=1.0).contains(&ratio) {
        return Err(ConstellationError::CoverageExceedsBody { chord_km, body: focus });
    }
    let angle = ratio.asin();
    Ok((radius * angle, angle))
}

/// Half chord (km) across the coverage circle at the street edge, and the
/// angular spacing (rad) between satellites that it allows.
pub fn street_spacing(coverage_radius_km: f64, street_width_km: f64, focus: Body) -> Result<(f64, f64)> {
    let half_street = street_width_km / 2.0;
    if half_street > coverage_radius_km {
        return Err(ConstellationError::StreetTooWide {
            street_width_km,
            coverage_diameter_km: 2.0 * coverage_radius_km,
        });
    }
    let half_chord = (coverage_radius_km.powi(2) - half_street.powi(2)).sqrt();
    let spacing = 2.0 * half_chord / focus.radius_km();
    if !(spacing > 0.0) {
        return Err(ConstellationError::DegenerateSpacing);
    }
    Ok((half_chord, spacing))
}

/// Satellites needed to close a full orbit at `angular_spacing_rad`.
pub fn required_satellites(angular_spacing_rad: f64) -> Result<u32> {
    let required = (TAU / angular_spacing_rad).round();
    if !(required <= MAX_SATELLITES_PER_STREET as f64) {
        return Err(ConstellationError::TooManySatellites {
            required,
            limit: MAX_SATELLITES_PER_STREET,
        });
    }
    Ok(required as u32)
}

/// `i * spacing` for each slot, in degrees.
pub fn true_anomalies(num_satellites: u32, angular_spacing_rad: f64) -> Vec<f64> {
    (0..num_satellites)
        .map(|i| (i as f64 * angular_spacing_rad).to_degrees())
        .collect()
}
