//! Walker Delta constellation
//!
//! ## Walker Delta Notation: T/P/F
//! - T = Total satellites
//! - P = Number of orbital planes
//! - F = Phasing factor (0 to P-1)
//!
//! Satellites are laid out plane by plane. Every plane after the first is
//! rotated 360/P in RAAN and advanced 360*F/T in true anomaly relative to the
//! previous one.

use crate::satellite::{satellites_dict, write_satellite_lines};
use crate::{default_sat_name, ConstellationError, Result, Satellite, MAX_SATELLITES_PER_CONSTELLATION};
use orbital_geometry::Body;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// Design parameters for one Walker Delta constellation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationSpec {
    pub num_satellites: u32,
    pub num_planes: u32,
    pub phasing: u32,
    pub inclination_deg: f64,
    pub altitude_km: f64,
    pub eccentricity: f64,
    pub beam_width_deg: f64,
    #[serde(default = "default_sat_name")]
    pub name: String,
    #[serde(default)]
    pub focus: Body,
    /// Satellites already numbered by earlier constellations in the scene
    #[serde(default)]
    pub starting_number: u32,
}

impl ConstellationSpec {
    pub fn new(
        num_satellites: u32,
        num_planes: u32,
        phasing: u32,
        inclination_deg: f64,
        altitude_km: f64,
        eccentricity: f64,
        beam_width_deg: f64,
    ) -> Self {
        Self {
            num_satellites,
            num_planes,
            phasing,
            inclination_deg,
            altitude_km,
            eccentricity,
            beam_width_deg,
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
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkerConstellation {
    spec: ConstellationSpec,
    sats_per_plane: u32,
    corrected_phasing: f64,
    perigee_positions: Vec<f64>,
    raan: Vec<f64>,
    true_anomaly: Vec<f64>,
    satellites: Vec<Satellite>,
}

impl WalkerConstellation {
    /// Expand `spec` into per-satellite elements.
    ///
    /// Fails when the planes cannot hold a single satellite each, or when
    /// more than [`MAX_SATELLITES_PER_CONSTELLATION`] satellites are asked for.
    /// Counts that don't divide evenly are accepted; the trailing
    /// `T mod P` satellites then start a partial extra plane.
    pub fn build(spec: ConstellationSpec) -> Result<Self> {
        if spec.num_satellites > MAX_SATELLITES_PER_CONSTELLATION {
            return Err(ConstellationError::TooManySatellites {
                required: spec.num_satellites as f64,
                limit: MAX_SATELLITES_PER_CONSTELLATION,
            });
        }
        let sats_per_plane = if spec.num_planes == 0 {
            0
        } else {
            spec.num_satellites / spec.num_planes
        };
        if sats_per_plane == 0 {
            return Err(ConstellationError::EmptyPlane {
                satellites: spec.num_satellites,
                planes: spec.num_planes,
            });
        }

        let total = spec.num_satellites as usize;
        let spp = sats_per_plane as usize;
        let corrected_phasing = 360.0 * spec.phasing as f64 / spec.num_satellites as f64;

        let perigee_positions = perigee_positions(total, sats_per_plane);
        let raan = plane_staircase(total, spp, 360.0 / spec.num_planes as f64);
        let true_anomaly = plane_staircase(total, spp, corrected_phasing);

        let satellites = (0..total)
            .map(|i| Satellite {
                name: format!("{} {}", spec.name, spec.starting_number as usize + i + 1),
                altitude_km: spec.altitude_km,
                eccentricity: spec.eccentricity,
                inclination_deg: spec.inclination_deg,
                raan_deg: raan[i],
                perigee_deg: perigee_positions[i],
                true_anomaly_deg: true_anomaly[i],
                beam_width_deg: spec.beam_width_deg,
                focus: spec.focus,
            })
            .collect();

        debug!(
            "Built Walker {}/{}/{} '{}' ({} per plane, first #{})",
            spec.num_satellites,
            spec.num_planes,
            spec.phasing,
            spec.name,
            sats_per_plane,
            spec.starting_number as u64 + 1
        );

        Ok(Self {
            spec,
            sats_per_plane,
            corrected_phasing,
            perigee_positions,
            raan,
            true_anomaly,
            satellites,
        })
    }

    pub fn spec(&self) -> &ConstellationSpec {
        &self.spec
    }

    pub fn sats_per_plane(&self) -> u32 {
        self.sats_per_plane
    }

    /// True anomaly offset between adjacent planes (degrees)
    pub fn corrected_phasing(&self) -> f64 {
        self.corrected_phasing
    }

    pub fn perigee_positions(&self) -> &[f64] {
        &self.perigee_positions
    }

    pub fn raan(&self) -> &[f64] {
        &self.raan
    }

    pub fn true_anomaly(&self) -> &[f64] {
        &self.true_anomaly
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    /// One-line parameter summary, `T, P, F, i, alt, e, beam, name=.., starting_number=..`
    pub fn summary(&self) -> String {
        let s = &self.spec;
        format!(
            "{}, {}, {}, {}, {}, {}, {}, name={}, starting_number={}",
            s.num_satellites,
            s.num_planes,
            s.phasing,
            s.inclination_deg,
            s.altitude_km,
            s.eccentricity,
            s.beam_width_deg,
            s.name,
            s.starting_number
        )
    }

    /// Map of satellite name to its parameters, tagged `"Type": "constellation"`.
    pub fn as_dict(&self) -> Value {
        satellites_dict(&self.satellites)
    }

    /// Concatenated legacy Pigi fragments of every satellite.
    pub fn as_xml(&self) -> String {
        self.satellites.iter().map(Satellite::as_xml).collect()
    }
}

impl fmt::Display for WalkerConstellation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_satellite_lines(f, &self.satellites)
    }
}

/// Argument of perigee cycling through `0, step, 2*step, ..` within each plane,
/// with `step = floor(360 / sats_per_plane)`.
fn perigee_positions(total: usize, sats_per_plane: u32) -> Vec<f64> {
    let step = 360 / sats_per_plane;
    (0..total)
        .map(|i| ((i as u32 % sats_per_plane) * step) as f64)
        .collect()
}

/// Zero for the first plane, then each entry is the one a plane earlier plus `step`.
fn plane_staircase(total: usize, sats_per_plane: usize, step: f64) -> Vec<f64> {
    let mut values = vec![0.0; total];
    for i in sats_per_plane..total {
        values[i] = values[i - sats_per_plane] + step;
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn reference() -> WalkerConstellation {
        WalkerConstellation::build(ConstellationSpec::new(8, 2, 1, 45.0, 780.0, 0.0, 60.0)).unwrap()
    }

    #[test]
    fn test_reference_walker() {
        let walker = reference();

        assert_eq!(walker.satellites().len(), 8);
        assert_eq!(walker.sats_per_plane(), 4);
        assert_eq!(walker.corrected_phasing(), 45.0);
        assert_eq!(walker.raan(), &[0.0, 0.0, 0.0, 0.0, 180.0, 180.0, 180.0, 180.0]);
        assert_eq!(walker.true_anomaly(), &[0.0, 0.0, 0.0, 0.0, 45.0, 45.0, 45.0, 45.0]);
        assert_eq!(
            walker.perigee_positions(),
            &[0.0, 90.0, 180.0, 270.0, 0.0, 90.0, 180.0, 270.0]
        );

        let sat = &walker.satellites()[5];
        assert_eq!(sat.name, "Sat 6");
        assert_eq!(sat.raan_deg, 180.0);
        assert_eq!(sat.perigee_deg, 90.0);
        assert_eq!(sat.true_anomaly_deg, 45.0);
        assert_eq!(sat.inclination_deg, 45.0);
        assert_eq!(sat.altitude_km, 780.0);
    }

    #[test]
    fn test_halo_walker() {
        // 12/3/1 at 10,500 km
        let walker =
            WalkerConstellation::build(ConstellationSpec::new(12, 3, 1, 55.0, 10_500.0, 0.0004, 30.0))
                .unwrap();

        let planes: HashSet<u64> = walker.raan().iter().map(|r| r.to_bits()).collect();
        assert_eq!(planes.len(), 3);
        assert_eq!(walker.raan()[4], 120.0);
        assert_eq!(walker.raan()[8], 240.0);
        assert_eq!(walker.true_anomaly()[11], 60.0);
        assert_eq!(walker.perigee_positions()[3], 270.0);
    }

    #[test]
    fn test_starting_number_offsets_names() {
        let spec = ConstellationSpec::new(4, 2, 0, 60.0, 500.0, 0.0, 30.0)
            .with_name("Star")
            .starting_at(10);
        let walker = WalkerConstellation::build(spec).unwrap();
        let names: Vec<&str> = walker.satellites().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Star 11", "Star 12", "Star 13", "Star 14"]);
    }

    #[test]
    fn test_perigee_step_is_floored() {
        // 7 per plane: floor(360 / 7) = 51
        let walker =
            WalkerConstellation::build(ConstellationSpec::new(7, 1, 0, 0.0, 500.0, 0.0, 10.0)).unwrap();
        assert_eq!(walker.perigee_positions()[1], 51.0);
        assert_eq!(walker.perigee_positions()[6], 306.0);
    }

    #[test]
    fn test_indivisible_counts_undercount_planes() {
        // 7/2: 3 per plane, the seventh satellite opens a third RAAN step
        let walker =
            WalkerConstellation::build(ConstellationSpec::new(7, 2, 1, 45.0, 780.0, 0.0, 60.0)).unwrap();
        assert_eq!(walker.satellites().len(), 7);
        assert_eq!(walker.sats_per_plane(), 3);
        assert_eq!(walker.raan()[6], 360.0);
    }

    #[test]
    fn test_empty_plane_rejected() {
        let err = WalkerConstellation::build(ConstellationSpec::new(2, 3, 0, 0.0, 500.0, 0.0, 10.0))
            .unwrap_err();
        assert_eq!(
            err,
            ConstellationError::EmptyPlane {
                satellites: 2,
                planes: 3
            }
        );
        assert!(
            WalkerConstellation::build(ConstellationSpec::new(4, 0, 0, 0.0, 500.0, 0.0, 10.0)).is_err()
        );
    }

    #[test]
    fn test_oversized_constellation_rejected() {
        let err = WalkerConstellation::build(ConstellationSpec::new(u32::MAX, 1, 0, 0.0, 500.0, 0.0, 10.0))
            .unwrap_err();
        assert_eq!(
            err,
            ConstellationError::TooManySatellites {
                required: u32::MAX as f64,
                limit: MAX_SATELLITES_PER_CONSTELLATION
            }
        );
        let at_limit = ConstellationSpec::new(MAX_SATELLITES_PER_CONSTELLATION, 1000, 0, 0.0, 500.0, 0.0, 10.0);
        assert!(WalkerConstellation::build(at_limit).is_ok());
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            reference().summary(),
            "8, 2, 1, 45, 780, 0, 60, name=Sat, starting_number=0"
        );
    }

    #[test]
    fn test_as_dict() {
        let dict = reference().as_dict();
        let map = dict.as_object().unwrap();
        assert_eq!(map.len(), 9);
        assert_eq!(map["Type"], "constellation");
        assert_eq!(map["Sat 5"]["right_ascension"], 180.0);
    }

    #[test]
    fn test_as_xml_and_display() {
        let walker = reference();
        assert_eq!(walker.as_xml().matches("<Entity Type=\"Satellite\"").count(), 8);
        let text = walker.to_string();
        assert_eq!(text.lines().count(), 8);
        assert!(text.lines().last().unwrap().starts_with("Sat 8:"));
    }

    proptest! {
        #[test]
        fn prop_walker_layout(planes in 1u32..12, per_plane in 1u32..12, phase_seed in 0u32..12) {
            let total = planes * per_plane;
            let phasing = phase_seed % planes;
            let spec = ConstellationSpec::new(total, planes, phasing, 53.0, 550.0, 0.0, 40.0);
            let walker = WalkerConstellation::build(spec.clone()).unwrap();

            prop_assert_eq!(walker.satellites().len(), total as usize);
            let names: HashSet<&str> = walker.satellites().iter().map(|s| s.name()).collect();
            prop_assert_eq!(names.len(), total as usize);

            let raan_step = 360.0 / planes as f64;
            let ta_step = 360.0 * phasing as f64 / total as f64;
            let spp = per_plane as usize;
            for i in 0..total as usize {
                if i < spp {
                    prop_assert_eq!(walker.raan()[i], 0.0);
                    prop_assert_eq!(walker.true_anomaly()[i], 0.0);
                } else {
                    let d_raan = walker.raan()[i] - walker.raan()[i - spp];
                    let d_ta = walker.true_anomaly()[i] - walker.true_anomaly()[i - spp];
                    prop_assert!((d_raan - raan_step).abs() < 1e-9);
                    prop_assert!((d_ta - ta_step).abs() < 1e-9);
                }
                if i % spp != 0 {
                    prop_assert_eq!(walker.raan()[i], walker.raan()[i - 1]);
                }
            }

            // Deterministic
            prop_assert_eq!(walker, WalkerConstellation::build(spec).unwrap());
        }
    }
}
