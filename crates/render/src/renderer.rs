use crate::frame::Frame;

/// Backend-agnostic interface. All renderers implement this trait.
///
/// A renderer consumes a finished [`Frame`] and produces output. It never
/// touches game state: the frame driver has already turned the game into
/// draw calls.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &Frame) -> Self::Output;
}

/// Text renderer for the CLI, logs and tests.
///
/// Lists every draw call with its position, scale and base colour.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame (tick={}, {}x{}) ===\n",
            frame.tick, frame.viewport.width, frame.viewport.height
        ));
        out.push_str(&format!("Draws: {}\n", frame.draws.len()));
        out.push_str(&format!(
            "Eye: ({:.1}, {:.1}, {:.1})\n",
            frame.eye.x, frame.eye.y, frame.eye.z
        ));

        for (i, draw) in frame.draws.iter().enumerate() {
            let p = draw.object.position;
            let s = draw.object.scale;
            let c = draw.object.material.base_color;
            out.push_str(&format!(
                "  [{i:02}] pos=({:.2}, {:.2}, {:.2}) scale=({:.2}, {:.2}, {:.2}) color=({:.2}, {:.2}, {:.2}, {:.2})\n",
                p.x, p.y, p.z, s.x, s.y, s.z, c[0], c[1], c[2], c[3]
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::build_frame;
    use crate::view::{RenderView, Viewport};
    use skyflap_kernel::{FlappyGame, GameConfig};

    #[test]
    fn debug_renderer_empty_frame() {
        let frame = build_frame(&RenderView::default(), Viewport::new(640, 480), 0, &[]);
        let output = DebugTextRenderer::new().render(&frame);

        assert!(output.contains("tick=0"));
        assert!(output.contains("640x480"));
        assert!(output.contains("Draws: 0"));
    }

    #[test]
    fn debug_renderer_lists_every_draw() {
        let game = FlappyGame::with_seed(GameConfig::default(), 9).unwrap();
        let frame = build_frame(
            &RenderView::default(),
            Viewport::new(800, 600),
            game.tick(),
            &game.renderables(),
        );
        let output = DebugTextRenderer::new().render(&frame);

        assert!(output.contains("Draws: 37"));
        assert_eq!(output.matches("pos=").count(), 37);
        assert!(output.contains("[00] pos=(-200.00, -50.00, 0.00)"));
        assert_eq!(output.lines().count(), 3 + 37);
    }
}
