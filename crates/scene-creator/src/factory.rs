//! Parameter validation and scene assembly

use crate::params::{ConstellationParams, SceneRequest};
use crate::{Result, Scene, SceneEntity, SceneError, Violation, MAX_SCENE_SATELLITES};
use constellations::{
    ConstellationSpec, StreetsOfCoverage, WalkerConstellation, MAX_SATELLITES_PER_CONSTELLATION,
};
use ground_stations::ground_array_creator;
use orbital_geometry::elementwise_mod;
use tracing::{info, warn};

/// Count-like value as an integer, if it is a positive whole number.
fn as_count(value: f64) -> Option<u32> {
    if value >= 1.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Every rule the constellation lists break, in check order.
pub fn constellation_violations(params: &ConstellationParams) -> Vec<Violation> {
    let mut violations = Vec::new();
    let count = params.num_constellations;

    if as_count(count).is_none() {
        violations.push(Violation::ConstellationCount(count));
    }

    let lists: [(&'static str, &[f64]); 7] = [
        ("satellite_nums", &params.satellite_nums),
        ("satellite_planes", &params.satellite_planes),
        ("plane_phasing", &params.plane_phasing),
        ("inclination", &params.inclination),
        ("altitude", &params.altitude),
        ("eccentricity", &params.eccentricity),
        ("beam_width", &params.beam_width),
    ];
    for (field, values) in lists {
        if values.len() as f64 != count {
            violations.push(Violation::LengthMismatch {
                field,
                expected: count,
                actual: values.len(),
            });
        }
    }

    let mut total = 0.0;
    for (index, &value) in params.satellite_nums.iter().enumerate() {
        match as_count(value) {
            None => violations.push(Violation::SatelliteCount { index, value }),
            Some(n) if n > MAX_SATELLITES_PER_CONSTELLATION => {
                violations.push(Violation::SatelliteCountTooLarge {
                    index,
                    value,
                    limit: MAX_SATELLITES_PER_CONSTELLATION,
                });
                total += value;
            }
            Some(_) => total += value,
        }
    }
    if total > MAX_SCENE_SATELLITES as f64 {
        violations.push(Violation::SceneTooLarge {
            total,
            limit: MAX_SCENE_SATELLITES,
        });
    }
    for (index, &value) in params.satellite_planes.iter().enumerate() {
        if as_count(value).is_none() {
            violations.push(Violation::PlaneCount { index, value });
        }
    }

    let remainders = elementwise_mod(&params.satellite_nums, &params.satellite_planes);
    for (index, remainder) in remainders.into_iter().enumerate() {
        let satellites = params.satellite_nums[index];
        let planes = params.satellite_planes[index];
        // Malformed counts are already reported above
        if as_count(satellites).is_some() && as_count(planes).is_some() && remainder != 0.0 {
            violations.push(Violation::Divisibility {
                index,
                satellites,
                planes,
            });
        }
    }

    for (index, &phasing) in params.plane_phasing.iter().enumerate() {
        let planes = params.satellite_planes.get(index).copied();
        let below = !(phasing >= 0.0);
        let above = planes.is_some_and(|p| !(phasing < p));
        if below || above {
            violations.push(Violation::PhasingOutOfRange {
                index,
                phasing,
                planes: planes.unwrap_or(f64::NAN),
            });
        } else if phasing.fract() != 0.0 {
            violations.push(Violation::PhasingNotIntegral { index, phasing });
        }
    }

    for (index, &value) in params.inclination.iter().enumerate() {
        if !(value.abs() <= 90.0) {
            violations.push(Violation::InclinationOutOfRange { index, value });
        }
    }
    for (index, &value) in params.altitude.iter().enumerate() {
        if !(value >= 0.0) {
            violations.push(Violation::NegativeAltitude { index, value });
        }
    }
    for (index, &value) in params.eccentricity.iter().enumerate() {
        if !(0.0..1.0).contains(&value) {
            violations.push(Violation::EccentricityOutOfRange { index, value });
        }
    }
    for (index, &value) in params.beam_width.iter().enumerate() {
        if !(0.0..=180.0).contains(&value) {
            violations.push(Violation::BeamWidthOutOfRange { index, value });
        }
    }

    violations
}

/// Walker specs for already-validated lists, numbered from `first_number`.
///
/// Validation bounds the running count by [`MAX_SCENE_SATELLITES`].
fn walker_specs(params: &ConstellationParams, first_number: u32) -> Vec<ConstellationSpec> {
    let mut starting_number = first_number;
    (0..params.satellite_nums.len())
        .map(|idx| {
            let num_satellites = params.satellite_nums[idx] as u32;
            let spec = ConstellationSpec::new(
                num_satellites,
                params.satellite_planes[idx] as u32,
                params.plane_phasing[idx] as u32,
                params.inclination[idx],
                params.altitude[idx],
                params.eccentricity[idx],
                params.beam_width[idx],
            )
            .with_name(params.sat_name.clone())
            .with_focus(params.focus)
            .starting_at(starting_number);
            starting_number += num_satellites;
            spec
        })
        .collect()
}

fn build_walkers(specs: Vec<ConstellationSpec>) -> Result<Vec<SceneEntity>> {
    specs
        .into_iter()
        .map(|spec| Ok(SceneEntity::Walker(WalkerConstellation::build(spec)?)))
        .collect()
}

fn reject(violations: Vec<Violation>) -> SceneError {
    warn!("Rejected scene parameters: {} violations", violations.len());
    for v in &violations {
        warn!("  {}", v);
    }
    SceneError::InvalidParameters(violations)
}

/// Validate the constellation lists and build one Walker constellation per entry.
///
/// Satellite numbering runs across constellations so every name in the
/// result is unique.
pub fn constellation_creator(params: &ConstellationParams) -> Result<Vec<SceneEntity>> {
    let violations = constellation_violations(params);
    if !violations.is_empty() {
        return Err(reject(violations));
    }
    build_walkers(walker_specs(params, 0))
}

/// Validate every parameter set, then build Walker constellations, any
/// Streets-of-Coverage constellations, and finally the ground stations.
///
/// Either the whole scene is returned or nothing is.
pub fn create_scene(request: &SceneRequest) -> Result<Scene> {
    let mut violations = constellation_violations(&request.constellations);
    violations.extend(
        request
            .ground_stations
            .violations()
            .into_iter()
            .map(Violation::from),
    );
    if !violations.is_empty() {
        return Err(reject(violations));
    }

    let specs = walker_specs(&request.constellations, 0);
    let walker_total = specs
        .last()
        .map(|s| s.starting_number + s.num_satellites)
        .unwrap_or(0);

    // Streets sizes come from geometry, so the scene total is checked before anything is built
    let mut streets_numbers = Vec::with_capacity(request.streets.len());
    let mut total = walker_total as u64;
    for streets in &request.streets {
        streets_numbers.push(total);
        total += streets.planned_satellites()?;
    }
    if total > MAX_SCENE_SATELLITES as u64 {
        return Err(reject(vec![Violation::SceneTooLarge {
            total: total as f64,
            limit: MAX_SCENE_SATELLITES,
        }]));
    }

    let mut scene = build_walkers(specs)?;
    for (streets, first_number) in request.streets.iter().zip(streets_numbers) {
        let spec = streets.clone().starting_at(first_number as u32);
        scene.push(SceneEntity::Streets(StreetsOfCoverage::build(spec)?));
    }

    let stations = ground_array_creator(&request.ground_stations)?;
    scene.extend(stations.into_iter().map(SceneEntity::GroundStation));

    info!(
        "Scene assembled: {} entities, {} satellites",
        scene.len(),
        scene.iter().map(|e| e.satellites().len()).sum::<usize>()
    );
    Ok(scene)
}
