//! Heading-seeking heuristic policy.
//!
//! Turns straight towards the target, slows down near the target and near
//! obstacles, and decides more often when either is close.

use super::trait_::Policy;
use crate::nav::error::PolicyError;
use crate::nav::types::{Action, Observation};

/// Greedy pursuit of the target bearing.
///
/// Reads the bearings through [`Observation::yaw`] and
/// [`Observation::pitch`], so it does not depend on their slot order:
/// ```text
/// yaw    = bearing_yaw                         (turn fully onto the target)
/// pitch  = bearing_pitch
/// speed  = 2 * min(distance, clearance) - 1     (slow down near target/obstacles)
/// interval = speed                              (decide more often when slow)
/// ```
/// where `clearance` is the nearest normalized ray hit, or 1 without hits.
pub struct HeadingPolicy {
    /// Ray hits nearer than this fraction of the range stop the body.
    stop_clearance: f64,
}

impl HeadingPolicy {
    pub fn new(stop_clearance: f64) -> Self {
        Self {
            stop_clearance: stop_clearance.clamp(0.0, 1.0),
        }
    }

    /// Nearest ray hit rescaled so `stop_clearance` maps to 0.
    fn clearance(&self, observation: &Observation) -> f64 {
        let nearest = observation
            .sensing()
            .iter()
            .copied()
            .filter(|&r| r >= 0.0)
            .fold(1.0_f64, f64::min);
        if self.stop_clearance >= 1.0 {
            return 0.0;
        }
        ((nearest - self.stop_clearance) / (1.0 - self.stop_clearance)).clamp(0.0, 1.0)
    }
}

impl Default for HeadingPolicy {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Policy for HeadingPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<Action, PolicyError> {
        if observation.len() < crate::nav::NavConfig::TARGET_FEATURE_DIM {
            return Err(PolicyError::Failed(format!(
                "observation too short: {} features",
                observation.len()
            )));
        }

        let urgency = observation.distance().min(self.clearance(observation));
        let speed = 2.0 * urgency - 1.0;

        Ok(Action::new(
            observation.yaw(),
            observation.pitch(),
            speed,
            speed,
        ))
    }

    fn name(&self) -> &str {
        "heading"
    }
}
