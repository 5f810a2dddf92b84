//! Runtime statistics for a decision scheduler.

use std::fmt;

/// Counters accumulated by a [`DecisionScheduler`](super::DecisionScheduler)
/// over its lifetime. Episode resets keep them; only
/// [`reset_stats`](super::DecisionScheduler::reset_stats) clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Ticks processed.
    pub ticks: u64,
    /// Episode resets processed (idempotent repeats excluded).
    pub resets: u64,
    /// Decisions that produced a motion command.
    pub decisions: u64,
    /// Decisions whose action had to be clamped into range.
    pub clamped_actions: u64,
    /// Decisions skipped because the policy ran over budget.
    pub policy_timeouts: u64,
    /// Decisions skipped because the policy failed.
    pub policy_failures: u64,
}

impl SchedulerStats {
    /// Decisions skipped for any reason.
    pub fn skipped(&self) -> u64 {
        self.policy_timeouts + self.policy_failures
    }

    /// Fraction of ticks that produced a decision, or 0 before the first tick.
    pub fn decision_rate(&self) -> f64 {
        if self.ticks == 0 {
            return 0.0;
        }
        self.decisions as f64 / self.ticks as f64
    }
}

impl fmt::Display for SchedulerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Scheduler Stats ({} ticks) ===", self.ticks)?;
        writeln!(f, "  Resets:            {}", self.resets)?;
        writeln!(
            f,
            "  Decisions:         {} ({:.1}% of ticks)",
            self.decisions,
            self.decision_rate() * 100.0
        )?;
        writeln!(f, "  Clamped actions:   {}", self.clamped_actions)?;
        writeln!(f, "  Policy timeouts:   {}", self.policy_timeouts)?;
        write!(f, "  Policy failures:   {}", self.policy_failures)
    }
}
