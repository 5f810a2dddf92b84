//! Navigation decision core.
//!
//! A [`DecisionScheduler`] is driven once per fixed-rate tick by the host.
//! At an adaptive cadence it observes the target relative to the body's
//! heading, optionally fuses obstacle sensing, asks a [`Policy`] for an
//! [`Action`] and applies the resulting [`MotionCommand`] to an
//! [`Actuator`].
//!
//! The physics engine, the ray caster, the depth renderer and the policy
//! itself are external collaborators plugged in through traits.

pub mod actuator;
pub mod config;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod scheduler;
pub mod sensing;
pub mod target;
pub mod types;

pub use actuator::Actuator;
pub use config::{CameraConfig, NavConfig, RayFanConfig, SensingConfig, SpeedRange};
pub use error::{ConfigError, PolicyError};
pub use metrics::SchedulerStats;
pub use observation::{ObservationBuilder, TargetObservation};
pub use policy::{HeadingPolicy, Policy, RandomPolicy, ScriptedPolicy};
pub use scheduler::{DecisionScheduler, TickOutcome};
pub use sensing::{
    DepthRenderer, ImageBuffer, RayCaster, SensingSubsystem, SensorBackend, SensorPose,
    SphereField, NO_HIT,
};
pub use target::{MovingTarget, StaticTarget, Target};
pub use types::{Action, DecisionInterval, MotionCommand, Observation, Pose};
