//! Navigation targets.

use std::cell::Cell;
use std::rc::Rc;

use nalgebra::{Point3, Unit, Vector3};

use crate::geometry::EPSILON;

/// Something the agent navigates towards.
pub trait Target {
    /// Current position of the target.
    fn position(&self) -> Point3<f64>;

    /// Euclidean distance from `point` to the target.
    fn distance_to(&self, point: &Point3<f64>) -> f64 {
        (self.position() - *point).norm()
    }

    /// Unit direction from `point` towards the target.
    ///
    /// Returns +Z when `point` coincides with the target.
    fn direction_from(&self, point: &Point3<f64>) -> Unit<Vector3<f64>> {
        Unit::try_new(self.position() - *point, EPSILON).unwrap_or_else(Vector3::z_axis)
    }
}

/// A target fixed in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticTarget {
    position: Point3<f64>,
}

impl StaticTarget {
    pub fn new(position: Point3<f64>) -> Self {
        Self { position }
    }
}

impl Target for StaticTarget {
    fn position(&self) -> Point3<f64> {
        self.position
    }
}

/// A target moved by the host between ticks.
///
/// The host keeps one handle and hands a clone to the scheduler; both see
/// the same position.
#[derive(Debug, Clone)]
pub struct MovingTarget {
    position: Rc<Cell<Point3<f64>>>,
}

impl MovingTarget {
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position: Rc::new(Cell::new(position)),
        }
    }

    /// Moves the target; visible to every clone of this handle.
    pub fn set_position(&self, position: Point3<f64>) {
        self.position.set(position);
    }

    /// Moves the target by `delta`.
    pub fn translate(&self, delta: Vector3<f64>) {
        self.position.set(self.position.get() + delta);
    }
}

impl Target for MovingTarget {
    fn position(&self) -> Point3<f64> {
        self.position.get()
    }
}
