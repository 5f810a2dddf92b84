//! Core value types exchanged between the scheduler, the policy and the
//! actuator.

use std::fmt;

use nalgebra::{Point3, Unit, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::actuator::Actuator;
use super::config::SpeedRange;

/// Snapshot of the body's state, read from the actuator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    pub position: Point3<f64>,
    pub heading: Unit<Vector3<f64>>,
    pub speed: f64,
}

impl Pose {
    pub fn new(position: Point3<f64>, heading: Unit<Vector3<f64>>, speed: f64) -> Self {
        Self {
            position,
            heading,
            speed,
        }
    }

    /// Reads the current pose from an actuator.
    pub fn of(actuator: &dyn Actuator) -> Self {
        Self {
            position: actuator.current_position(),
            heading: actuator.current_heading(),
            speed: actuator.current_speed(),
        }
    }
}

/// Action returned by a policy: `[yaw, pitch, speed, interval]`, each
/// nominally in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Action {
    pub yaw: f64,
    pub pitch: f64,
    pub speed: f64,
    pub interval: f64,
}

impl Action {
    pub fn new(yaw: f64, pitch: f64, speed: f64, interval: f64) -> Self {
        Self {
            yaw,
            pitch,
            speed,
            interval,
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.yaw, self.pitch, self.speed, self.interval]
    }

    /// Returns true if every component is finite and within `[-1, 1]`.
    pub fn is_in_range(&self) -> bool {
        self.as_array()
            .iter()
            .all(|c| c.is_finite() && (-1.0..=1.0).contains(c))
    }

    /// Clamps every component into `[-1, 1]`; non-finite components become 0.
    pub fn clamped(&self) -> Self {
        fn clamp(c: f64) -> f64 {
            if c.is_finite() {
                c.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        Self {
            yaw: clamp(self.yaw),
            pitch: clamp(self.pitch),
            speed: clamp(self.speed),
            interval: clamp(self.interval),
        }
    }
}

impl From<[f64; 4]> for Action {
    fn from(a: [f64; 4]) -> Self {
        Self::new(a[0], a[1], a[2], a[3])
    }
}

/// Motion command submitted to the actuator once per decision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionCommand {
    /// Yaw in degrees, `[-180, 180]`.
    pub yaw_deg: f64,
    /// Pitch in degrees, `[-180, 180]`.
    pub pitch_deg: f64,
    pub speed: f64,
}

impl MotionCommand {
    /// Converts a clamped action into a motion command.
    pub fn from_action(action: &Action, speed_range: &SpeedRange) -> Self {
        Self {
            yaw_deg: action.yaw * 180.0,
            pitch_deg: action.pitch * 180.0,
            speed: speed_range.scale(action.speed),
        }
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "yaw {:.1}°, pitch {:.1}°, speed {:.2}",
            self.yaw_deg, self.pitch_deg, self.speed
        )
    }
}

/// Number of ticks between two decisions, always in `[1, 21]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecisionInterval(u32);

impl DecisionInterval {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 21;

    /// Derives the interval from an action component via
    /// `round((command + 1) * 10) + 1`.
    ///
    /// The command is clamped to `[-1, 1]` first, so the result always
    /// lies in `[1, 21]`.
    pub fn from_command(command: f64) -> Self {
        let command = if command.is_finite() {
            command.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let ticks = ((command + 1.0) * 10.0).round() as u32 + 1;
        Self(ticks.clamp(Self::MIN, Self::MAX))
    }

    pub fn ticks(&self) -> u32 {
        self.0
    }
}

impl Default for DecisionInterval {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for DecisionInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks", self.0)
    }
}

/// Normalized feature vector handed to the policy.
///
/// Layout:
/// ```text
/// [pitch/180, yaw/180, squashed_distance, speed, body_pitch] ++ [sensing features]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    values: Vec<f64>,
}

impl Observation {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalized bearing to the target about world up.
    pub fn yaw(&self) -> f64 {
        self.values[1]
    }

    /// Normalized bearing to the target about the lateral axis.
    pub fn pitch(&self) -> f64 {
        self.values[0]
    }

    /// Squashed distance to the target.
    pub fn distance(&self) -> f64 {
        self.values[2]
    }

    /// Features contributed by the sensing subsystem.
    pub fn sensing(&self) -> &[f64] {
        &self.values[super::config::NavConfig::TARGET_FEATURE_DIM..]
    }

    /// Returns true if every component lies in `[-1, 1]`.
    pub fn is_bounded(&self) -> bool {
        self.values
            .iter()
            .all(|v| v.is_finite() && (-1.0..=1.0).contains(v))
    }
}
