//! Background thread running the policy under a wall-clock budget.
//!
//! The scheduler hands each observation to the worker and waits at most
//! `policy_budget` for the answer. A late answer is never applied: every
//! request carries a sequence number and replies to older requests are
//! dropped on arrival. If requests pile up behind a slow call, the worker
//! only answers the newest one.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use log::trace;

use crate::nav::error::PolicyError;
use crate::nav::policy::Policy;
use crate::nav::types::{Action, Observation};

type Request = (u64, Observation);
type Reply = (u64, Result<Action, PolicyError>);

pub(super) struct PolicyWorker {
    name: String,
    requests: Sender<Request>,
    replies: Receiver<Reply>,
    seq: u64,
}

impl PolicyWorker {
    /// Moves `policy` onto a dedicated thread.
    ///
    /// The thread exits once the worker is dropped and the call in flight,
    /// if any, has returned. It is never joined, so a hung policy cannot
    /// block the owner.
    pub(super) fn spawn(mut policy: Box<dyn Policy>) -> std::io::Result<Self> {
        let name = policy.name().to_string();
        let (requests, jobs) = unbounded::<Request>();
        let (answers, replies) = unbounded::<Reply>();

        thread::Builder::new()
            .name(format!("policy-{name}"))
            .spawn(move || {
                while let Ok(mut job) = jobs.recv() {
                    while let Ok(newer) = jobs.try_recv() {
                        job = newer;
                    }
                    let (seq, observation) = job;
                    let result = policy.decide(&observation);
                    if answers.send((seq, result)).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            name,
            requests,
            replies,
            seq: 0,
        })
    }

    pub(super) fn name(&self) -> &str {
        &self.name
    }

    /// Asks for an action, waiting no longer than `budget`.
    pub(super) fn query(
        &mut self,
        observation: Observation,
        budget: Duration,
    ) -> Result<Action, PolicyError> {
        self.seq += 1;
        let seq = self.seq;
        let started = Instant::now();

        self.requests
            .send((seq, observation))
            .map_err(|_| PolicyError::Failed("policy worker stopped".to_string()))?;

        loop {
            let remaining = budget.saturating_sub(started.elapsed());
            match self.replies.recv_timeout(remaining) {
                Ok((id, result)) if id == seq => return result,
                Ok((id, _)) => trace!("dropping late answer to request {id}"),
                Err(RecvTimeoutError::Timeout) => {
                    return Err(PolicyError::Timeout {
                        elapsed: started.elapsed(),
                        budget,
                    })
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(PolicyError::Failed("policy worker stopped".to_string()))
                }
            }
        }
    }
}
