//! Configuration for a navigation agent.
//!
//! Everything here is set once when the agent is built and is immutable
//! afterwards. Call [`NavConfig::validate`] (the scheduler does so on
//! construction) to reject invalid parameters up front.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Obstacle-sensing mode, chosen once per agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensingConfig {
    /// Fan of rays cast outward from the body.
    Raycast(RayFanConfig),
    /// Virtual depth camera producing a side-channel image.
    Camera(CameraConfig),
}

/// Geometry of the ray fan used by [`SensingConfig::Raycast`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RayFanConfig {
    /// Number of rays in the fan.
    pub ray_count: usize,
    /// Maximum ray length in world units.
    pub max_range: f64,
    /// Total angular spread of the fan about world up, in degrees.
    ///
    /// `360` spaces the rays evenly around the body; anything smaller
    /// sweeps symmetrically from `-fan/2` to `+fan/2` around the heading.
    pub fan_degrees: f64,
}

impl RayFanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ray_count == 0 {
            return Err(ConfigError::NoRays);
        }
        if !(self.max_range.is_finite() && self.max_range > 0.0) {
            return Err(ConfigError::InvalidRayRange(self.max_range));
        }
        if !(self.fan_degrees > 0.0 && self.fan_degrees <= 360.0) {
            return Err(ConfigError::InvalidFanAngle(self.fan_degrees));
        }
        Ok(())
    }
}

impl Default for RayFanConfig {
    fn default() -> Self {
        Self {
            ray_count: 8,
            max_range: 10.0,
            fan_degrees: 360.0,
        }
    }
}

/// Resolution of the image produced by [`SensingConfig::Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Size in bytes of one RGB24 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 84,
            height: 84,
        }
    }
}

/// Legal speed range of the actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    /// Maps a speed command in `[-1, 1]` linearly onto `[min, max]`.
    pub fn scale(&self, command: f64) -> f64 {
        let t = (command.clamp(-1.0, 1.0) + 1.0) * 0.5;
        self.min + t * (self.max - self.min)
    }

    /// Maps an actuator speed onto `[-1, 1]`; inverse of [`scale`](Self::scale).
    pub fn normalize(&self, speed: f64) -> f64 {
        let t = (speed - self.min) / (self.max - self.min);
        (t * 2.0 - 1.0).clamp(-1.0, 1.0)
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: 0.0, max: 5.0 }
    }
}

/// Configuration of a navigation agent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavConfig {
    /// Active obstacle-sensing mode.
    pub sensing: SensingConfig,
    /// Actuator speed range used to scale and normalize speed.
    pub speed: SpeedRange,
    /// The target counts as reached when closer than this.
    pub reach_threshold: f64,
    /// Wall-clock budget for a single policy call.
    pub policy_budget: Duration,
}

impl NavConfig {
    /// Number of target-relative features: yaw, pitch, distance, speed, body pitch.
    pub const TARGET_FEATURE_DIM: usize = 5;

    /// Number of features contributed by the sensing subsystem.
    pub fn sensing_dim(&self) -> usize {
        match &self.sensing {
            SensingConfig::Raycast(fan) => fan.ray_count,
            SensingConfig::Camera(_) => 0,
        }
    }

    /// Length of every observation vector this agent produces.
    pub fn observation_dim(&self) -> usize {
        Self::TARGET_FEATURE_DIM + self.sensing_dim()
    }

    /// Checks every parameter, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.sensing {
            SensingConfig::Raycast(fan) => fan.validate()?,
            SensingConfig::Camera(cam) => cam.validate()?,
        }

        let SpeedRange { min, max } = self.speed;
        if !(min.is_finite() && max.is_finite() && min >= 0.0 && max > min) {
            return Err(ConfigError::InvalidSpeedRange { min, max });
        }

        if !(self.reach_threshold.is_finite() && self.reach_threshold > 0.0) {
            return Err(ConfigError::InvalidReachThreshold(self.reach_threshold));
        }

        Ok(())
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            sensing: SensingConfig::Raycast(RayFanConfig::default()),
            speed: SpeedRange::default(),
            reach_threshold: 0.25,
            policy_budget: Duration::from_millis(20),
        }
    }
}
