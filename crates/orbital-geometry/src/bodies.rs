//! Celestial body constants
//!
//! Mean radius, mass and sidereal rotation period for every body a
//! constellation can be centred on.

use crate::{GeometryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    #[default]
    Earth,
    Luna,
    Mars,
    Venus,
    Mercury,
    Sol,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 11] = [
        Body::Earth,
        Body::Luna,
        Body::Mars,
        Body::Venus,
        Body::Mercury,
        Body::Sol,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Mean radius in km
    pub fn radius_km(&self) -> f64 {
        match self {
            Body::Earth => 6371.0,
            Body::Luna => 1737.0,
            Body::Mars => 3390.0,
            Body::Venus => 6052.0,
            Body::Mercury => 2440.0,
            Body::Sol => 695_700.0,
            Body::Jupiter => 69_911.0,
            Body::Saturn => 58_232.0,
            Body::Uranus => 25_362.0,
            Body::Neptune => 24_622.0,
            Body::Pluto => 1188.0,
        }
    }

    /// Mass in kg
    pub fn mass_kg(&self) -> f64 {
        match self {
            Body::Earth => 5.972e24,
            Body::Luna => 73.46e21,
            Body::Mars => 641.71e21,
            Body::Venus => 4867.5e21,
            Body::Mercury => 330.11e21,
            Body::Sol => 1.9885e30,
            Body::Jupiter => 1.8982e27,
            Body::Saturn => 5.6834e26,
            Body::Uranus => 8.6810e25,
            Body::Neptune => 1.02413e26,
            Body::Pluto => 13.03e21,
        }
    }

    /// Sidereal rotation period in days
    pub fn rotation_period_days(&self) -> f64 {
        match self {
            Body::Earth => 1.0,
            Body::Luna => 27.321661,
            Body::Mars => 1.02595675,
            Body::Venus => 243.0187,
            Body::Mercury => 58.6462,
            Body::Sol => 25.379995,
            Body::Jupiter => 0.41007,
            Body::Saturn => 0.426,
            Body::Uranus => 0.71833,
            Body::Neptune => 0.67125,
            Body::Pluto => 6.38718,
        }
    }

    /// Standard gravitational parameter in km^3/s^2
    pub fn mu_km3_s2(&self) -> f64 {
        // G is in m^3, scale down to km^3
        crate::GRAVITATIONAL_CONSTANT * self.mass_kg() * 1e-9
    }

    pub fn name(&self) -> &'static str {
        match self {
            Body::Earth => "earth",
            Body::Luna => "luna",
            Body::Mars => "mars",
            Body::Venus => "venus",
            Body::Mercury => "mercury",
            Body::Sol => "sol",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name() == wanted)
            .ok_or_else(|| GeometryError::UnknownBody(s.to_string()))
    }
}
