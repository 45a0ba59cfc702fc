//! Orbital Geometry Library
//!
//! Celestial body constants, rotation transforms and the line-of-sight
//! geometry shared by the constellation builders and downstream visualizers.

use thiserror::Error;

pub mod bodies;
pub mod transforms;

pub use bodies::Body;
pub use transforms::{polar_to_cartesian, rotate, segment_intercept, sphere_intercept, Axis};

/// Re-exported so callers don't need a direct nalgebra dependency.
pub use nalgebra::Vector3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Unknown celestial body: {0}")]
    UnknownBody(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

/// Gravitational constant [m^3 kg^-1 s^-2]
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67408e-11;

/// Earth angular velocity [rad/s]
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.2921159e-5;

/// Earth J2 zonal harmonic (dimensionless)
pub const EARTH_J2: f64 = 1.0826269e-3;

/// Pairwise floored modulo over two slices.
///
/// The result takes the sign of the divisor and is truncated to the shorter
/// input. A zero divisor yields NaN for that element.
pub fn elementwise_mod(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(y)
        .map(|(&a, &b)| a - b * (a / b).floor())
        .collect()
}

/// Escape a value for an XML attribute.
///
/// Shared by every entity that writes a Pigi fragment.
pub fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementwise_mod() {
        let result = elementwise_mod(&[8.0, 7.0, 12.0], &[2.0, 2.0, 5.0]);
        assert_eq!(result, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_elementwise_mod_floors_towards_divisor_sign() {
        let result = elementwise_mod(&[-7.0, 7.0], &[2.0, -2.0]);
        assert_eq!(result, vec![1.0, -1.0]);
    }

    #[test]
    fn test_elementwise_mod_truncates_to_shorter() {
        assert_eq!(elementwise_mod(&[4.0, 5.0, 6.0], &[3.0]).len(), 1);
        assert!(elementwise_mod(&[], &[3.0]).is_empty());
    }

    #[test]
    fn test_elementwise_mod_zero_divisor() {
        assert!(elementwise_mod(&[4.0], &[0.0])[0].is_nan());
    }

    #[test]
    fn test_xml_escape() {
        assert_eq!(xml_escape("Sat 1"), "Sat 1");
        assert_eq!(xml_escape("A&B <\"x\">"), "A&amp;B &lt;&quot;x&quot;&gt;");
        assert_eq!(xml_escape("O'Brien"), "O&apos;Brien");
    }
}
