//! Rotation transforms and sphere intersection

use nalgebra::{Rotation3, Unit, Vector3};

/// Axis for [`rotate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Axis {
    X,
    Y,
    Z,
    /// Roll, pitch and yaw in degrees, applied as R_z(yaw) * R_y(pitch) * R_x(roll).
    /// The `angle` argument of [`rotate`] is ignored for this variant.
    Composite { roll: f64, pitch: f64, yaw: f64 },
    /// Rotation about an arbitrary axis. The axis is normalized before use.
    Custom(Vector3<f64>),
}

/// Rotate `vec` by `angle` radians about `axis`.
pub fn rotate(vec: Vector3<f64>, angle: f64, axis: Axis) -> Vector3<f64> {
    let rotation = match axis {
        Axis::X => Rotation3::from_axis_angle(&Vector3::x_axis(), angle),
        Axis::Y => Rotation3::from_axis_angle(&Vector3::y_axis(), angle),
        Axis::Z => Rotation3::from_axis_angle(&Vector3::z_axis(), angle),
        Axis::Composite { roll, pitch, yaw } => {
            Rotation3::from_euler_angles(roll.to_radians(), pitch.to_radians(), yaw.to_radians())
        }
        Axis::Custom(basis) => match Unit::try_new(basis, f64::EPSILON) {
            Some(unit) => Rotation3::from_axis_angle(&unit, angle),
            None => Rotation3::identity(),
        },
    };
    rotation * vec
}

/// Spherical to cartesian, `phi` measured from +z and `theta` around it (radians).
pub fn polar_to_cartesian(r: f64, phi: f64, theta: f64) -> Vector3<f64> {
    Vector3::new(
        r * phi.sin() * theta.cos(),
        r * theta.sin() * phi.sin(),
        r * phi.cos(),
    )
}

/// Whether the line through `p1` and `p2` touches a sphere of `radius`
/// centred on the origin.
///
/// Tangent lines count as intersecting.
pub fn sphere_intercept(p1: &Vector3<f64>, p2: &Vector3<f64>, radius: f64) -> bool {
    let d = p2 - p1;
    let a = d.norm_squared();
    let b = 2.0 * p1.dot(&d);
    let c = p1.norm_squared() - radius * radius;

    b * b - 4.0 * a * c >= 0.0
}

/// Whether the segment from `p1` to `p2` touches a sphere of `radius`
/// centred on the origin.
///
/// Unlike [`sphere_intercept`], hits beyond either endpoint don't count.
pub fn segment_intercept(p1: &Vector3<f64>, p2: &Vector3<f64>, radius: f64) -> bool {
    let d = p2 - p1;
    let a = d.norm_squared();
    let t = if a > 0.0 {
        (-p1.dot(&d) / a).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p1 + d * t).norm_squared() <= radius * radius
}
