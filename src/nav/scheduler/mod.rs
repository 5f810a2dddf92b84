//! Adaptive-cadence decision scheduler.
//!
//! The scheduler is driven by the host once per fixed-rate tick. It counts
//! ticks and, once the current [`DecisionInterval`] has elapsed, runs a
//! decision:
//!
//! 1. read the pose from the actuator and build the observation,
//! 2. ask the policy for an action under [`NavConfig::policy_budget`],
//! 3. clamp the action and apply it as a [`MotionCommand`],
//! 4. take the next interval from the action and zero the counter.
//!
//! The policy runs on its own thread, so a slow or hung policy costs a tick
//! at most the budget. Policy failures and timeouts skip the decision
//! without touching the actuator. The counter and interval are kept, so the
//! next tick retries.

use log::{debug, info, trace, warn};

use super::actuator::Actuator;
use super::config::NavConfig;
use super::error::{ConfigError, PolicyError};
use super::metrics::SchedulerStats;
use super::observation::{ObservationBuilder, TargetObservation};
use super::policy::Policy;
use super::sensing::{ImageBuffer, SensingSubsystem, SensorBackend};
use super::target::Target;
use super::types::{DecisionInterval, MotionCommand, Observation, Pose};
use crate::{generate_id, Id};

mod worker;


use worker::PolicyWorker;

/// What a single [`tick`](DecisionScheduler::tick) or
/// [`reset`](DecisionScheduler::reset) did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The interval has not elapsed yet; nothing was decided.
    Waiting,
    /// A decision fired and this command was applied to the actuator.
    Decided(MotionCommand),
    /// A decision was due but the policy gave no usable action. It is
    /// retried on the next tick.
    Skipped(PolicyError),
}

impl TickOutcome {
    pub fn is_decided(&self) -> bool {
        matches!(self, TickOutcome::Decided(_))
    }
}

/// Periodic controller deciding what the body does next.
pub struct DecisionScheduler {
    id: Id,
    config: NavConfig,
    sensing: SensingSubsystem,
    target: Box<dyn Target>,
    policy: PolicyWorker,
    tick_counter: u32,
    interval: DecisionInterval,
    /// Set by a skipped decision; the next tick decides regardless of the counter.
    decision_due: bool,
    /// Set by `reset`, cleared by the next tick.
    reset_latched: bool,
    stats: SchedulerStats,
}

impl DecisionScheduler {
    /// Builds a scheduler and starts its policy thread.
    ///
    /// # Arguments
    ///
    /// * `config` - Agent configuration, validated here and fixed afterwards
    /// * `backend` - Engine driving the sensing mode selected in `config`
    ///   (a [`RayCaster`](super::sensing::RayCaster) for raycast mode, a
    ///   [`DepthRenderer`](super::sensing::DepthRenderer) for camera mode)
    /// * `target` - What the agent navigates towards
    /// * `policy` - Decision source; it is moved onto a worker thread
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` is invalid, `backend` does not
    /// match its sensing mode, or the policy thread cannot be started.
    pub fn new(
        config: NavConfig,
        backend: SensorBackend,
        target: Box<dyn Target>,
        policy: Box<dyn Policy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sensing = SensingSubsystem::new(&config.sensing, backend)?;
        let policy = PolicyWorker::spawn(policy)
            .map_err(|e| ConfigError::PolicyThread(e.to_string()))?;
        let id = generate_id();

        info!(
            "[{}] scheduler created: policy '{}', observation dim {}",
            id,
            policy.name(),
            config.observation_dim()
        );

        Ok(Self {
            id,
            config,
            sensing,
            target,
            policy,
            tick_counter: 0,
            interval: DecisionInterval::default(),
            decision_due: false,
            reset_latched: false,
            stats: SchedulerStats::default(),
        })
    }

    /// Advances one fixed-rate tick, deciding if the interval has elapsed.
    pub fn tick(&mut self, actuator: &mut dyn Actuator) -> TickOutcome {
        self.stats.ticks += 1;
        self.reset_latched = false;
        self.tick_counter = self.tick_counter.saturating_add(1);

        if self.decision_due || self.tick_counter >= self.interval.ticks() {
            self.decide(actuator)
        } else {
            TickOutcome::Waiting
        }
    }

    /// Starts a new episode: zeroes the counter and decides immediately.
    ///
    /// The interval keeps its previous value until the decision replaces
    /// it. Calling `reset` again before the next tick does nothing and
    /// returns [`TickOutcome::Waiting`].
    pub fn reset(&mut self, actuator: &mut dyn Actuator) -> TickOutcome {
        if self.reset_latched {
            trace!("[{}] repeated reset ignored", self.id);
            return TickOutcome::Waiting;
        }
        self.reset_latched = true;
        self.stats.resets += 1;
        self.tick_counter = 0;
        info!("[{}] episode reset (interval {})", self.id, self.interval);
        self.decide(actuator)
    }

    fn decide(&mut self, actuator: &mut dyn Actuator) -> TickOutcome {
        let observation = self.observe(actuator);

        let action = match self.policy.query(observation, self.config.policy_budget) {
            Ok(action) => action,
            Err(err) => {
                match err {
                    PolicyError::Timeout { .. } => self.stats.policy_timeouts += 1,
                    PolicyError::Failed(_) => self.stats.policy_failures += 1,
                }
                warn!("[{}] decision skipped: {}", self.id, err);
                self.decision_due = true;
                return TickOutcome::Skipped(err);
            }
        };

        let clamped = action.clamped();
        if clamped != action {
            self.stats.clamped_actions += 1;
            warn!(
                "[{}] policy '{}' returned out-of-range action {:?}, clamped",
                self.id,
                self.policy.name(),
                action.as_array()
            );
        }

        let command = MotionCommand::from_action(&clamped, &self.config.speed);
        actuator.apply_motion(command.yaw_deg, command.pitch_deg, command.speed);
        actuator.refresh_axes();

        self.interval = DecisionInterval::from_command(clamped.interval);
        self.tick_counter = 0;
        self.decision_due = false;
        self.stats.decisions += 1;

        debug!(
            "[{}] decision: {}, next in {}",
            self.id, command, self.interval
        );
        TickOutcome::Decided(command)
    }

    /// Reads the actuator, senses and assembles the observation.
    fn observe(&mut self, actuator: &dyn Actuator) -> Observation {
        let pose = Pose::of(actuator);
        let target = TargetObservation::compute(&pose, &*self.target);
        let sensing = self.sensing.sense(&pose);
        ObservationBuilder::build(&pose, &target, sensing, &self.config)
    }

    /// Returns true if the actuator is within the reach threshold of the target.
    pub fn has_reached_target(&self, actuator: &dyn Actuator) -> bool {
        self.target.distance_to(&actuator.current_position()) < self.config.reach_threshold
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Ticks since the last decision or reset.
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Current decision interval.
    pub fn interval(&self) -> DecisionInterval {
        self.interval
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SchedulerStats::default();
    }

    pub fn sensing(&self) -> &SensingSubsystem {
        &self.sensing
    }

    /// Latest camera image, in camera mode.
    pub fn image(&self) -> Option<&ImageBuffer> {
        self.sensing.image()
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
}
