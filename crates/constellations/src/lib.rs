//! Constellations Library
//!
//! Static constellation layout: Walker Delta (T/P/F) and polar
//! Streets-of-Coverage patterns, expanded into per-satellite orbital elements.
//!
//! All exposed angles are degrees. Streets-of-Coverage keeps its intermediate
//! coverage geometry in radians and only converts when it fills in satellites.

use thiserror::Error;

pub mod satellite;
pub mod streets;
pub mod walker;

pub use satellite::Satellite;
pub use streets::{StreetsOfCoverage, StreetsSpec};
pub use walker::{ConstellationSpec, WalkerConstellation};

pub use orbital_geometry::Body;

/// Default satellite name prefix
pub const DEFAULT_SAT_NAME: &str = "Sat";

/// Upper bound on satellites built for one constellation
pub const MAX_SATELLITES_PER_CONSTELLATION: u32 = 100_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstellationError {
    #[error("{satellites} satellites cannot fill {planes} planes")]
    EmptyPlane { satellites: u32, planes: u32 },
    #[error("Coverage chord {chord_km:.3} km exceeds {body} radius")]
    CoverageExceedsBody { chord_km: f64, body: Body },
    #[error("Street width {street_width_km} km exceeds coverage diameter {coverage_diameter_km:.3} km")]
    StreetTooWide {
        street_width_km: f64,
        coverage_diameter_km: f64,
    },
    #[error("Street spacing collapses to zero")]
    DegenerateSpacing,
    #[error("{required} satellites requested, limit is {limit}")]
    TooManySatellites { required: f64, limit: u32 },
    #[error("Beam width out of range [0, 180): {0}")]
    InvalidBeamWidth(f64),
    #[error("Altitude must be non-negative: {0}")]
    NegativeAltitude(f64),
    #[error("Street width must be non-negative: {0}")]
    NegativeStreetWidth(f64),
    #[error("At least one street RAAN is required")]
    NoStreets,
}

pub type Result<T> = std::result::Result<T, ConstellationError>;

pub(crate) fn default_sat_name() -> String {
    DEFAULT_SAT_NAME.to_string()
}
