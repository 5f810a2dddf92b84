//! Obstacle sensing.
//!
//! The sensing mode is fixed when the agent is built. Both variants are
//! driven through [`SensingSubsystem::sense`]; only the ray probe
//! contributes features to the observation, the image probe fills a
//! side-channel buffer instead.

pub mod image;
pub mod ray;

pub use image::{DepthRenderer, ImageBuffer, ImageProbe, SensorPose};
pub use ray::{RayCaster, RayProbe, Sphere, SphereField, NO_HIT};

use super::config::SensingConfig;
use super::error::ConfigError;
use super::types::Pose;

/// External engine backing a sensing mode.
pub enum SensorBackend {
    /// Ray casting engine, for [`SensingConfig::Raycast`].
    Rays(Box<dyn RayCaster>),
    /// Depth image pipeline, for [`SensingConfig::Camera`].
    Depth(Box<dyn DepthRenderer>),
}

impl SensorBackend {
    fn kind(&self) -> &'static str {
        match self {
            SensorBackend::Rays(_) => "rays",
            SensorBackend::Depth(_) => "depth",
        }
    }
}

/// The active sensing subsystem of an agent.
pub enum SensingSubsystem {
    Ray(RayProbe),
    Image(ImageProbe),
}

impl SensingSubsystem {
    /// Builds the subsystem selected by `config`, driven by `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BackendMismatch`] if the backend does not fit
    /// the sensing mode, or the probe's own validation error.
    pub fn new(config: &SensingConfig, backend: SensorBackend) -> Result<Self, ConfigError> {
        match (config, backend) {
            (SensingConfig::Raycast(fan), SensorBackend::Rays(caster)) => {
                Ok(Self::Ray(RayProbe::new(*fan, caster)?))
            }
            (SensingConfig::Camera(cam), SensorBackend::Depth(renderer)) => {
                Ok(Self::Image(ImageProbe::new(*cam, renderer)?))
            }
            (config, backend) => Err(ConfigError::BackendMismatch {
                mode: mode_name(config),
                backend: backend.kind(),
            }),
        }
    }

    /// Senses from `pose`, returning the features to append to the
    /// observation (empty for the image probe).
    pub fn sense(&mut self, pose: &Pose) -> Vec<f64> {
        match self {
            SensingSubsystem::Ray(probe) => probe.sense(pose),
            SensingSubsystem::Image(probe) => {
                probe.sense(pose);
                Vec::new()
            }
        }
    }

    /// Number of features [`sense`](Self::sense) returns.
    pub fn feature_dim(&self) -> usize {
        match self {
            SensingSubsystem::Ray(probe) => probe.ray_count(),
            SensingSubsystem::Image(_) => 0,
        }
    }

    /// Latest image, if this is an image probe.
    pub fn image(&self) -> Option<&ImageBuffer> {
        match self {
            SensingSubsystem::Image(probe) => Some(probe.buffer()),
            SensingSubsystem::Ray(_) => None,
        }
    }
}

fn mode_name(config: &SensingConfig) -> &'static str {
    match config {
        SensingConfig::Raycast(_) => "raycast",
        SensingConfig::Camera(_) => "camera",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::config::{CameraConfig, RayFanConfig};
    use nalgebra::{Point3, Vector3};

    struct Blank;

    impl DepthRenderer for Blank {
        fn render(&mut self, _eye: &SensorPose, _buffer: &mut ImageBuffer) {}
    }

    fn pose() -> Pose {
        Pose::new(Point3::origin(), Vector3::z_axis(), 0.0)
    }

    #[test]
    fn raycast_mode_contributes_one_feature_per_ray() {
        let config = SensingConfig::Raycast(RayFanConfig::default());
        let backend = SensorBackend::Rays(Box::new(SphereField::default()));
        let mut sensing = SensingSubsystem::new(&config, backend).unwrap();
        assert_eq!(sensing.feature_dim(), 8);
        assert_eq!(sensing.sense(&pose()).len(), 8);
        assert!(sensing.image().is_none());
    }

    #[test]
    fn camera_mode_contributes_no_features() {
        let config = SensingConfig::Camera(CameraConfig::default());
        let backend = SensorBackend::Depth(Box::new(Blank));
        let mut sensing = SensingSubsystem::new(&config, backend).unwrap();
        assert!(sensing.sense(&pose()).is_empty());
        assert_eq!(sensing.image().map(|img| img.width()), Some(84));
    }

    #[test]
    fn mismatched_backend_rejected() {
        let config = SensingConfig::Camera(CameraConfig::default());
        let backend = SensorBackend::Rays(Box::new(SphereField::default()));
        let err = SensingSubsystem::new(&config, backend).err();
        assert_eq!(
            err,
            Some(ConfigError::BackendMismatch {
                mode: "camera",
                backend: "rays"
            })
        );
    }
}
