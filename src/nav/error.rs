use std::time::Duration;

use thiserror::Error;

/// Invalid agent configuration, rejected at construction time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Ray fan must contain at least one ray")]
    NoRays,

    #[error("Ray range must be positive and finite, got {0}")]
    InvalidRayRange(f64),

    #[error("Ray fan angle must be in (0, 360], got {0}")]
    InvalidFanAngle(f64),

    #[error("Image resolution must be non-zero, got {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Speed range is invalid: min {min}, max {max}")]
    InvalidSpeedRange { min: f64, max: f64 },

    #[error("Target reach threshold must be positive, got {0}")]
    InvalidReachThreshold(f64),

    #[error("Sensing mode '{mode}' cannot be driven by a '{backend}' backend")]
    BackendMismatch {
        mode: &'static str,
        backend: &'static str,
    },

    #[error("Failed to start the policy thread: {0}")]
    PolicyThread(String),
}

/// Recoverable failure of a single policy call.
///
/// The scheduler never propagates these; it skips the decision and retries
/// on the next tick.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Policy did not answer within its {budget:?} budget ({elapsed:?} elapsed)")]
    Timeout { elapsed: Duration, budget: Duration },

    #[error("Policy could not produce an action: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rays_display() {
        assert_eq!(
            ConfigError::NoRays.to_string(),
            "Ray fan must contain at least one ray"
        );
    }

    #[test]
    fn resolution_display() {
        let e = ConfigError::InvalidResolution {
            width: 0,
            height: 84,
        };
        assert_eq!(e.to_string(), "Image resolution must be non-zero, got 0x84");
    }

    #[test]
    fn timeout_display() {
        let e = PolicyError::Timeout {
            elapsed: Duration::from_millis(30),
            budget: Duration::from_millis(20),
        };
        assert_eq!(
            e.to_string(),
            "Policy did not answer within its 20ms budget (30ms elapsed)"
        );
    }

    #[test]
    fn backend_mismatch_display() {
        let e = ConfigError::BackendMismatch {
            mode: "raycast",
            backend: "depth",
        };
        assert!(e.to_string().contains("'raycast'"));
    }

    #[test]
    fn policy_thread_display() {
        let e = ConfigError::PolicyThread("out of threads".to_string());
        assert_eq!(
            e.to_string(),
            "Failed to start the policy thread: out of threads"
        );
    }
}
