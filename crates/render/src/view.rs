use glam::Vec3;
use skyflap_common::Rgba;
use skyflap_math::{Mat4, deg_to_rad, normalize};

/// Fixed camera and lighting setup shared by every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Translation applied on top of the projection, pushing the scene away.
    pub projection_offset: Vec3,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    pub up: Vec3,
    /// Direction light travels; the shader receives its normalized reverse.
    pub light_direction: Vec3,
    pub clear_color: Rgba,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 2000.0,
            projection_offset: Vec3::new(0.0, 0.0, -360.0),
            eye: Vec3::new(0.0, 0.0, 100.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            light_direction: Vec3::new(0.5, 0.5, 0.5),
            clear_color: [0.45, 0.7, 0.9, 1.0],
        }
    }
}

impl RenderView {
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let offset = self.projection_offset;
        Mat4::perspective(deg_to_rad(self.fov_degrees), aspect, self.near, self.far)
            .translate(offset.x, offset.y, offset.z)
    }

    /// Camera-to-world matrix.
    pub fn camera(&self) -> Mat4 {
        Mat4::look_at(self.eye, self.target, self.up)
    }

    pub fn view(&self) -> Mat4 {
        self.camera().inverse()
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect).multiply(&self.view())
    }

    /// Unit vector pointing toward the light.
    pub fn reverse_light_direction(&self) -> Vec3 {
        normalize(-self.light_direction)
    }
}

/// Drawable area in physical pixels. Never zero-sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Match the current display size. Returns true if the size changed.
    pub fn resize_to(&mut self, width: u32, height: u32) -> bool {
        let next = Self::new(width, height);
        if next == *self {
            return false;
        }
        *self = next;
        true
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
