//! Policy trait for the navigation agent.

use crate::nav::error::PolicyError;
use crate::nav::types::{Action, Observation};

/// A decision-value source mapping observations to actions.
///
/// Called once per fired decision, on the scheduler's policy thread. The
/// scheduler clamps the returned action, so implementations may return
/// components outside `[-1, 1]`; they are counted as out-of-range but
/// still applied.
pub trait Policy: Send + Sync {
    /// Selects the next action for `observation`.
    ///
    /// # Errors
    ///
    /// A policy that knows it cannot answer in time may return
    /// [`PolicyError::Timeout`]; any other failure is
    /// [`PolicyError::Failed`]. Both make the scheduler skip the decision
    /// and retry on the next tick. An answer that arrives after the
    /// budget has run out is dropped.
    fn decide(&mut self, observation: &Observation) -> Result<Action, PolicyError>;

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
