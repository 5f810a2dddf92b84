//! Scripted policy replaying a fixed action sequence.

use std::collections::VecDeque;

use super::trait_::Policy;
use crate::nav::error::PolicyError;
use crate::nav::types::{Action, Observation};

/// Replays a fixed list of actions, one per decision.
///
/// Once the script runs out, every call fails with
/// [`PolicyError::Failed`] unless the policy was built with
/// [`cycling`](Self::cycling), in which case it starts over.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    script: VecDeque<Action>,
    cycle: bool,
    seen: Vec<Observation>,
}

impl ScriptedPolicy {
    pub fn new(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            script: actions.into_iter().collect(),
            cycle: false,
            seen: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), but loops over the script forever.
    pub fn cycling(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            cycle: true,
            ..Self::new(actions)
        }
    }

    /// Actions not yet replayed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Every observation this policy was asked to decide on, oldest first.
    pub fn observations(&self) -> &[Observation] {
        &self.seen
    }
}

impl Policy for ScriptedPolicy {
    fn decide(&mut self, observation: &Observation) -> Result<Action, PolicyError> {
        self.seen.push(observation.clone());
        let action = self
            .script
            .pop_front()
            .ok_or_else(|| PolicyError::Failed("script exhausted".to_string()))?;
        if self.cycle {
            self.script.push_back(action);
        }
        Ok(action)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
