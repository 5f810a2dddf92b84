//! Image-based obstacle probe.
//!
//! Places a virtual depth camera just behind the body, looking along the
//! heading, and has an external renderer fill a reusable RGB24 buffer.
//! The image is a side channel: it is not appended to the observation.

use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

use crate::geometry::{world_up, EPSILON};
use crate::nav::config::CameraConfig;
use crate::nav::error::ConfigError;
use crate::nav::types::Pose;

/// Distance the camera sits behind the body, along the heading.
pub const CAMERA_SETBACK: f64 = 1.0;

/// Depth image pipeline queried by [`ImageProbe`].
pub trait DepthRenderer {
    /// Renders the view from `eye` into `buffer`.
    fn render(&mut self, eye: &SensorPose, buffer: &mut ImageBuffer);
}

/// World-space placement of the virtual camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorPose {
    pub position: Point3<f64>,
    /// Maps local +Z onto the viewing direction.
    pub rotation: UnitQuaternion<f64>,
}

impl SensorPose {
    /// Camera pose for a body: `CAMERA_SETBACK` behind it, looking along
    /// its heading with world up as the up vector.
    pub fn behind(pose: &Pose) -> Self {
        let forward = pose.heading.into_inner();
        let world = world_up().into_inner();
        let up = if forward.cross(&world).norm() < EPSILON {
            Vector3::z()
        } else {
            world
        };
        Self {
            position: pose.position - forward * CAMERA_SETBACK,
            rotation: UnitQuaternion::face_towards(&forward, &up),
        }
    }

    /// Viewing direction.
    pub fn forward(&self) -> Unit<Vector3<f64>> {
        self.rotation * Vector3::z_axis()
    }
}

/// Fixed-size RGB24 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    pub const CHANNELS: usize = 3;

    /// A black image of the configured resolution.
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            data: vec![0; config.frame_len()],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGB bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// RGB triple at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        let i = self.offset(x, y)?;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + Self::CHANNELS].copy_from_slice(&rgb);
        }
    }

    /// Sets every pixel to `rgb`.
    pub fn fill(&mut self, rgb: [u8; 3]) {
        for px in self.data.chunks_exact_mut(Self::CHANNELS) {
            px.copy_from_slice(&rgb);
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * Self::CHANNELS)
    }
}

/// Positions the virtual camera every tick and owns the rendered image.
pub struct ImageProbe {
    renderer: Box<dyn DepthRenderer>,
    buffer: ImageBuffer,
    eye: Option<SensorPose>,
}

impl ImageProbe {
    /// Allocates the image buffer once; every render reuses it.
    ///
    /// # Arguments
    ///
    /// * `config` - Output resolution in pixels
    /// * `renderer` - Host renderer drawing the scene from the sensor pose
    ///   one unit behind the body
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the resolution is zero in either axis.
    pub fn new(
        config: CameraConfig,
        renderer: Box<dyn DepthRenderer>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            renderer,
            buffer: ImageBuffer::new(&config),
            eye: None,
        })
    }

    /// Re-places the camera for `pose` and renders into the buffer.
    pub fn sense(&mut self, pose: &Pose) {
        let eye = SensorPose::behind(pose);
        self.renderer.render(&eye, &mut self.buffer);
        self.eye = Some(eye);
    }

    pub fn buffer(&self) -> &ImageBuffer {
        &self.buffer
    }

    /// Camera pose used for the latest render.
    pub fn eye(&self) -> Option<&SensorPose> {
        self.eye.as_ref()
    }
}
