//! Observation encoding for the navigation agent.
//!
//! Derives target-relative bearings from the body's pose and assembles
//! them, together with the sensing features, into the bounded feature
//! vector handed to the policy.

use nalgebra::{Unit, Vector3};

use super::config::NavConfig;
use super::target::Target;
use super::types::{Observation, Pose};
use crate::geometry::{signed_angle_plane, squash_distance, world_up};

/// Target-relative geometry for one pose, recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetObservation {
    /// Euclidean distance to the target.
    pub distance: f64,
    /// Unit direction from the body towards the target.
    pub direction: Unit<Vector3<f64>>,
    /// Bearing about world up, degrees in `(-180, 180]`. Positive turns right.
    pub yaw_deg: f64,
    /// Bearing about the lateral axis `heading × up`, degrees in `(-180, 180]`.
    pub pitch_deg: f64,
}

impl TargetObservation {
    /// Computes distance and polar bearings from `pose` to `target`.
    pub fn compute(pose: &Pose, target: &dyn Target) -> Self {
        let up = world_up().into_inner();
        let heading = pose.heading.into_inner();
        let perp = heading.cross(&up);

        let distance = target.distance_to(&pose.position);
        let direction = target.direction_from(&pose.position);

        Self {
            distance,
            direction,
            yaw_deg: signed_angle_plane(&heading, &direction, &up),
            pitch_deg: signed_angle_plane(&heading, &direction, &perp),
        }
    }

    /// Returns true if the target is strictly closer than `threshold`.
    pub fn has_reached(&self, threshold: f64) -> bool {
        self.distance < threshold
    }

    /// Normalized features: `[pitch/180, yaw/180, 2*sigmoid(distance)-1]`.
    ///
    /// The lateral-axis bearing comes first, then the world-up bearing.
    pub fn features(&self) -> [f64; 3] {
        [
            self.pitch_deg / 180.0,
            self.yaw_deg / 180.0,
            squash_distance(self.distance),
        ]
    }
}

/// Builds observation vectors for an agent.
pub struct ObservationBuilder;

impl ObservationBuilder {
    /// Builds the observation for one decision.
    ///
    /// ```text
    /// [pitch, yaw, distance, speed, body_pitch] ++ sensing
    /// ```
    ///
    /// `body_pitch` is the heading's world-up component.
    pub fn build(
        pose: &Pose,
        target: &TargetObservation,
        sensing: Vec<f64>,
        config: &NavConfig,
    ) -> Observation {
        let mut values = Vec::with_capacity(NavConfig::TARGET_FEATURE_DIM + sensing.len());
        values.extend(target.features());
        values.push(config.speed.normalize(pose.speed));
        values.push(pose.heading.y.clamp(-1.0, 1.0));
        values.extend(sensing);
        Observation::from_values(values)
    }
}
