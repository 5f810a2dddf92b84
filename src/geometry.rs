//! Geometric primitives shared by the observation model and the sensors.
//!
//! All angles returned from this module are in degrees, matching the units
//! of [`MotionCommand`](crate::nav::MotionCommand).

use log::trace;
use nalgebra::{Unit, Vector3};

/// Length below which a vector is treated as degenerate.
pub const EPSILON: f64 = 1e-9;

/// World up axis (+Y).
pub fn world_up() -> Unit<Vector3<f64>> {
    Vector3::y_axis()
}

/// Projects `v` onto the plane orthogonal to `normal`.
///
/// A zero-length `normal` leaves `v` unchanged.
pub fn project_on_plane(v: &Vector3<f64>, normal: &Vector3<f64>) -> Vector3<f64> {
    let len_sq = normal.norm_squared();
    if len_sq < EPSILON * EPSILON {
        return *v;
    }
    v - normal * (v.dot(normal) / len_sq)
}

/// Signed angle in degrees between `v1` and `v2` about `plane_normal`,
/// after projecting both onto the plane orthogonal to it.
///
/// The result lies in `(-180, 180]`. The sign follows the right-hand rule:
/// positive when `plane_normal · (v1 × v2) >= 0`, so exactly opposite
/// projections give `+180`.
///
/// Returns `0.0` when the normal or either projection is shorter than
/// [`EPSILON`].
///
/// ```
/// use nalgebra::Vector3;
/// use navcore::geometry::signed_angle_plane;
///
/// let heading = Vector3::new(0.0, 0.0, 1.0);
/// let right = Vector3::new(1.0, 0.0, 0.0);
/// let angle = signed_angle_plane(&heading, &right, &Vector3::y());
/// assert!((angle - 90.0).abs() < 1e-9);
/// ```
pub fn signed_angle_plane(
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
    plane_normal: &Vector3<f64>,
) -> f64 {
    let Some(normal) = Unit::try_new(*plane_normal, EPSILON) else {
        trace!("degenerate plane normal {:?}", plane_normal);
        return 0.0;
    };

    let a = Unit::try_new(project_on_plane(v1, &normal), EPSILON);
    let b = Unit::try_new(project_on_plane(v2, &normal), EPSILON);
    let (Some(a), Some(b)) = (a, b) else {
        trace!("degenerate projection onto plane {:?}", plane_normal);
        return 0.0;
    };
    let (a, b) = (a.into_inner(), b.into_inner());

    // Both projections lie in the plane, so `a × b` is parallel to the normal.
    let sin = normal.dot(&a.cross(&b));
    let cos = a.dot(&b).clamp(-1.0, 1.0);
    if sin == 0.0 {
        return if cos < 0.0 { 180.0 } else { 0.0 };
    }
    let signed = sin.atan2(cos).to_degrees();

    if signed <= -180.0 {
        180.0
    } else {
        signed
    }
}

/// Standard logistic function, range `(0, 1)`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Maps a non-negative distance onto `[0, 1)` via `2 * sigmoid(x) - 1`.
///
/// Monotonic, `0` at `0`, saturating towards `1` for large distances.
#[inline]
pub fn squash_distance(x: f64) -> f64 {
    2.0 * sigmoid(x) - 1.0
}
