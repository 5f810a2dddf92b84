//! navcore - decision core for an autonomous navigation agent
//!
//! Turns a body's pose and a target into a bounded observation vector,
//! consults a pluggable policy at an adaptive cadence, and issues motion
//! commands to the body. Obstacle sensing is either a ray fan feeding the
//! observation or a virtual depth camera filling a side-channel image.
//!
//! See [`nav::DecisionScheduler`] for the entry point.

pub mod geometry;
pub mod nav;

pub use nav::{Actuator, DecisionScheduler, NavConfig, Policy, Target, TickOutcome};

/// Identifier type used to tag schedulers in logs.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
