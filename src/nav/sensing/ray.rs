//! Ray-fan obstacle probe.

use nalgebra::{Point3, Rotation3, Unit, Vector3};

use crate::geometry::world_up;
use crate::nav::config::RayFanConfig;
use crate::nav::error::ConfigError;
use crate::nav::types::Pose;

/// Feature value reported by a ray that hit nothing within range.
pub const NO_HIT: f64 = -1.0;

/// Ray casting engine queried by [`RayProbe`].
pub trait RayCaster {
    /// Distance along `direction` from `origin` to the first hit, if any
    /// hit lies within `max_range`.
    fn cast(
        &self,
        origin: &Point3<f64>,
        direction: &Unit<Vector3<f64>>,
        max_range: f64,
    ) -> Option<f64>;
}

/// Casts a fixed fan of rays around the heading.
///
/// Each ray yields `hit_distance / max_range` in `[0, 1]`, or [`NO_HIT`].
pub struct RayProbe {
    fan: RayFanConfig,
    caster: Box<dyn RayCaster>,
    offsets: Vec<Rotation3<f64>>,
}

impl RayProbe {
    /// Builds the fan and precomputes each ray's rotation about world up.
    ///
    /// # Arguments
    ///
    /// * `fan` - Ray count, total fan angle and range; rays are spread
    ///   evenly across the fan, centred on the heading (a full circle
    ///   starts at the heading)
    /// * `caster` - Host world query answering the hit distance of each ray
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `fan` is invalid.
    pub fn new(fan: RayFanConfig, caster: Box<dyn RayCaster>) -> Result<Self, ConfigError> {
        fan.validate()?;

        let up = world_up();
        let offsets = fan_angles(&fan)
            .into_iter()
            .map(|deg| Rotation3::from_axis_angle(&up, deg.to_radians()))
            .collect();

        Ok(Self {
            fan,
            caster,
            offsets,
        })
    }

    pub fn ray_count(&self) -> usize {
        self.fan.ray_count
    }

    pub fn max_range(&self) -> f64 {
        self.fan.max_range
    }

    /// World-space ray directions for the given heading, in output order.
    pub fn directions(&self, heading: &Unit<Vector3<f64>>) -> Vec<Unit<Vector3<f64>>> {
        self.offsets.iter().map(|rot| rot * *heading).collect()
    }

    /// Casts every ray from `pose` and returns the normalized hit distances.
    pub fn sense(&self, pose: &Pose) -> Vec<f64> {
        let range = self.fan.max_range;
        self.directions(&pose.heading)
            .iter()
            .map(|dir| match self.caster.cast(&pose.position, dir, range) {
                Some(d) if d.is_finite() && (0.0..=range).contains(&d) => d / range,
                _ => NO_HIT,
            })
            .collect()
    }
}

/// Yaw offsets of each ray, in degrees.
fn fan_angles(fan: &RayFanConfig) -> Vec<f64> {
    let n = fan.ray_count;
    if fan.fan_degrees >= 360.0 {
        let step = 360.0 / n as f64;
        (0..n).map(|i| i as f64 * step).collect()
    } else if n == 1 {
        vec![0.0]
    } else {
        let step = fan.fan_degrees / (n - 1) as f64;
        (0..n)
            .map(|i| -fan.fan_degrees / 2.0 + i as f64 * step)
            .collect()
    }
}

/// A sphere obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Point3<f64>,
    pub radius: f64,
}

/// Analytic ray caster over a set of spheres.
///
/// Enough for tests and demos; hosts with a physics engine supply their own
/// [`RayCaster`].
#[derive(Debug, Clone, Default)]
pub struct SphereField {
    spheres: Vec<Sphere>,
}

impl SphereField {
    pub fn new(spheres: Vec<Sphere>) -> Self {
        Self { spheres }
    }

    pub fn add(&mut self, center: Point3<f64>, radius: f64) {
        self.spheres.push(Sphere { center, radius });
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }
}

impl RayCaster for SphereField {
    fn cast(
        &self,
        origin: &Point3<f64>,
        direction: &Unit<Vector3<f64>>,
        max_range: f64,
    ) -> Option<f64> {
        self.spheres
            .iter()
            .filter_map(|s| {
                let oc = *origin - s.center;
                let b = direction.dot(&oc);
                let c = oc.norm_squared() - s.radius * s.radius;
                let disc = b * b - c;
                if disc < 0.0 {
                    return None;
                }
                let root = disc.sqrt();
                let (near, far) = (-b - root, -b + root);
                if far < 0.0 {
                    return None;
                }
                // Origin inside the sphere counts as an immediate hit.
                Some(near.max(0.0))
            })
            .filter(|&t| t <= max_range)
            .min_by(|a, b| a.total_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(ray_count: usize, fan_degrees: f64, field: SphereField) -> RayProbe {
        let fan = RayFanConfig {
            ray_count,
            max_range: 10.0,
            fan_degrees,
        };
        RayProbe::new(fan, Box::new(field)).unwrap()
    }

    fn pose() -> Pose {
        Pose::new(Point3::origin(), Vector3::z_axis(), 1.0)
    }

    #[test]
    fn empty_world_reports_no_hit_sentinel() {
        let readings = probe(8, 360.0, SphereField::default()).sense(&pose());
        assert_eq!(readings, vec![NO_HIT; 8]);
    }

    #[test]
    fn obstacle_ahead_hits_first_ray_only() {
        let mut field = SphereField::default();
        field.add(Point3::new(0.0, 0.0, 5.0), 1.0);
        let readings = probe(8, 360.0, field).sense(&pose());
        assert!((readings[0] - 0.4).abs() < 1e-9);
        assert!(readings[1..].iter().all(|&r| r == NO_HIT));
    }

    #[test]
    fn obstacle_to_the_right_hits_quarter_ray() {
        let mut field = SphereField::default();
        field.add(Point3::new(5.0, 0.0, 0.0), 1.0);
        let readings = probe(8, 360.0, field).sense(&pose());
        assert!((readings[2] - 0.4).abs() < 1e-9);
        assert_eq!(readings[6], NO_HIT);
    }

    #[test]
    fn obstacle_beyond_range_is_no_hit() {
        let mut field = SphereField::default();
        field.add(Point3::new(0.0, 0.0, 20.0), 1.0);
        assert_eq!(probe(8, 360.0, field).sense(&pose())[0], NO_HIT);
    }

    #[test]
    fn body_inside_obstacle_reads_zero() {
        let mut field = SphereField::default();
        field.add(Point3::origin(), 2.0);
        let readings = probe(4, 360.0, field).sense(&pose());
        assert!(readings.iter().all(|&r| r == 0.0));
    }

    #[test]
    fn partial_fan_is_symmetric_around_heading() {
        let p = probe(3, 90.0, SphereField::default());
        let dirs = p.directions(&Vector3::z_axis());
        assert!(dirs[1].x.abs() < 1e-12 && (dirs[1].z - 1.0).abs() < 1e-12);
        assert!((dirs[0].x + dirs[2].x).abs() < 1e-12);
        assert!(dirs[2].x > 0.0);
    }

    #[test]
    fn zero_rays_rejected() {
        let fan = RayFanConfig {
            ray_count: 0,
            ..RayFanConfig::default()
        };
        assert_eq!(
            RayProbe::new(fan, Box::new(SphereField::default())).err(),
            Some(ConfigError::NoRays)
        );
    }
}
