use glam::Vec3;
use rand::Rng;
use skyflap_common::{RenderObject, Rgba};
use skyflap_input::ActionQueue;
use skyflap_kernel::FlappyGame;
use skyflap_math::Mat4;

use crate::view::{RenderView, Viewport};

/// Everything a backend needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub object: RenderObject,
    pub world: Mat4,
    pub world_view_projection: Mat4,
    /// Transforms normals into world space.
    pub world_inverse_transpose: Mat4,
}

impl DrawCall {
    pub fn new(object: RenderObject, view_projection: &Mat4) -> Self {
        let world = world_matrix(&object);
        Self {
            object,
            world,
            world_view_projection: view_projection.multiply(&world),
            world_inverse_transpose: world.inverse().transpose(),
        }
    }
}

/// One finished frame: viewport, shared uniforms, and draw calls in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub viewport: Viewport,
    pub view_projection: Mat4,
    pub eye: Vec3,
    pub reverse_light_direction: Vec3,
    pub clear_color: Rgba,
    pub draws: Vec<DrawCall>,
}

/// World matrix for `object`: rotate about X, Y, Z, then translate, then
/// scale, in call order. Applied to a vertex the scale acts first and the
/// rotation last, so rotation also turns the translated position.
pub fn world_matrix(object: &RenderObject) -> Mat4 {
    let r = object.rotation;
    let p = object.position;
    let s = object.scale;
    Mat4::IDENTITY
        .x_rotate(r.x)
        .y_rotate(r.y)
        .z_rotate(r.z)
        .translate(p.x, p.y, p.z)
        .scale(s.x, s.y, s.z)
}

/// Build a frame from already-produced renderables.
pub fn build_frame(
    view: &RenderView,
    viewport: Viewport,
    tick: u64,
    objects: &[RenderObject],
) -> Frame {
    let view_projection = view.view_projection(viewport.aspect());
    Frame {
        tick,
        viewport,
        view_projection,
        eye: view.eye,
        reverse_light_direction: view.reverse_light_direction(),
        clear_color: view.clear_color,
        draws: objects
            .iter()
            .map(|obj| DrawCall::new(*obj, &view_projection))
            .collect(),
    }
}

/// Per-tick orchestration. Owns no game logic.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    view: RenderView,
    viewport: Viewport,
}

impl FrameDriver {
    pub fn new(view: RenderView, width: u32, height: u32) -> Self {
        Self {
            view,
            viewport: Viewport::new(width, height),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Run one tick: match the display size, apply queued actions, advance
    /// the game, and turn its renderables into draw calls.
    pub fn tick<R: Rng>(
        &mut self,
        game: &mut FlappyGame<R>,
        actions: &mut ActionQueue,
        display_size: (u32, u32),
    ) -> Frame {
        if self.viewport.resize_to(display_size.0, display_size.1) {
            tracing::debug!(
                width = self.viewport.width,
                height = self.viewport.height,
                "viewport resized"
            );
        }

        actions.apply_to(game);
        game.update();

        let objects = game.renderables();
        build_frame(&self.view, self.viewport, game.tick(), &objects)
    }
}
