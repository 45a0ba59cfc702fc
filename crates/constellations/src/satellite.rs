//! Single satellite record
//!
//! A satellite is a fixed set of Keplerian elements at one instant. No
//! propagation happens here; [`Satellite::position_km`] only places the
//! satellite for visualizers.

use orbital_geometry::{polar_to_cartesian, rotate, segment_intercept, xml_escape, Axis, Body, Vector3};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub name: String,
    pub altitude_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    /// Argument of perigee
    pub perigee_deg: f64,
    pub true_anomaly_deg: f64,
    pub beam_width_deg: f64,
    pub focus: Body,
}

impl Satellite {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter map keyed the way scene consumers expect.
    pub fn as_dict(&self) -> Value {
        json!({
            "altitude": self.altitude_km,
            "eccentricity": self.eccentricity,
            "inclination": self.inclination_deg,
            "right_ascension": self.raan_deg,
            "perigee": self.perigee_deg,
            "true_anomaly": self.true_anomaly_deg,
            "beam": self.beam_width_deg,
            "focus": self.focus.name(),
            "type": "satellite",
        })
    }

    /// Legacy Pigi entity fragment.
    pub fn as_xml(&self) -> String {
        let mut xml = format!(
            "\t\t<Entity Type=\"Satellite\" Name=\"{}\">\n\t\t\t<PropertySection Name=\"UserProperties\">\n",
            xml_escape(&self.name)
        );
        for (key, value) in [
            ("altitude", self.altitude_km),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination_deg),
            ("right_ascension", self.raan_deg),
            ("perigee", self.perigee_deg),
            ("true_anomaly", self.true_anomaly_deg),
            ("beam", self.beam_width_deg),
        ] {
            xml.push_str(&format!(
                "\t\t\t\t<FloatPropertyValue name=\"{}\" value=\"{}\"/>\n",
                key, value
            ));
        }
        xml.push_str(&format!(
            "\t\t\t\t<StringPropertyValue name=\"focus\" value=\"{}\"/>\n",
            self.focus
        ));
        xml.push_str("\t\t\t</PropertySection>\n\t\t</Entity>\n");
        xml
    }

    /// Inertial position in km with the focus body at the origin.
    ///
    /// The satellite sits at `perigee + true anomaly` around a circle of
    /// radius `body radius + altitude`, tilted by inclination about x and then
    /// turned by RAAN about z.
    pub fn position_km(&self) -> Vector3<f64> {
        let r = self.focus.radius_km() + self.altitude_km;
        let in_plane = polar_to_cartesian(
            r,
            90f64.to_radians(),
            (self.perigee_deg + self.true_anomaly_deg).to_radians(),
        );
        let tilted = rotate(in_plane, self.inclination_deg.to_radians(), Axis::X);
        rotate(tilted, self.raan_deg.to_radians(), Axis::Z)
    }

    /// True when the straight segment between both satellites clears the
    /// focus body.
    pub fn line_of_sight(&self, other: &Satellite) -> bool {
        !segment_intercept(
            &self.position_km(),
            &other.position_km(),
            self.focus.radius_km(),
        )
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: alt={} km, e={}, i={}, raan={}, aop={}, ta={}, beam={}, focus={}",
            self.name,
            self.altitude_km,
            self.eccentricity,
            self.inclination_deg,
            self.raan_deg,
            self.perigee_deg,
            self.true_anomaly_deg,
            self.beam_width_deg,
            self.focus
        )
    }
}

/// Satellite name to parameter map, tagged `"Type": "constellation"`.
/// Duplicate names keep the first entry.
pub(crate) fn satellites_dict(satellites: &[Satellite]) -> Value {
    let mut constellation = Map::new();
    for sat in satellites {
        if !constellation.contains_key(&sat.name) {
            constellation.insert(sat.name.clone(), sat.as_dict());
        }
    }
    constellation.insert("Type".to_string(), Value::from("constellation"));
    Value::Object(constellation)
}

pub(crate) fn write_satellite_lines(
    f: &mut fmt::Formatter<'_>,
    satellites: &[Satellite],
) -> fmt::Result {
    for (i, sat) in satellites.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{}", sat)?;
    }
    Ok(())
}
