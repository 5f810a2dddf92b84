//! Actuator trait for the body being navigated.

use nalgebra::{Point3, Unit, Vector3};

/// The body (drone) being navigated.
///
/// The scheduler borrows an actuator for the duration of a single
/// [`tick`](super::DecisionScheduler::tick) or
/// [`reset`](super::DecisionScheduler::reset) call and never retains it.
/// Motion integration is the implementor's business.
pub trait Actuator {
    /// Current world-space position.
    fn current_position(&self) -> Point3<f64>;

    /// Current heading as a unit vector.
    fn current_heading(&self) -> Unit<Vector3<f64>>;

    /// Current scalar speed.
    fn current_speed(&self) -> f64;

    /// Applies a relative turn (degrees) and a new speed.
    fn apply_motion(&mut self, yaw_deg: f64, pitch_deg: f64, speed: f64);

    /// Recomputes derived orientation axes after [`apply_motion`](Self::apply_motion).
    fn refresh_axes(&mut self);
}
