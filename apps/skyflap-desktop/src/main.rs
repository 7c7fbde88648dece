use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use skyflap_input::{Action, ActionQueue};
use skyflap_kernel::{FlappyGame, GameConfig};
use skyflap_render::{Frame, FrameDriver, RenderView};
use skyflap_render_wgpu::{GpuContext, WgpuRenderer};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const TITLE: &str = "Skyflap";

#[derive(Parser)]
#[command(name = "skyflap-desktop", about = "Skyflap desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// RNG seed; omit for a fresh game every launch
    #[arg(long)]
    seed: Option<u64>,

    /// JSON game config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Game-side state: everything that is not a GPU handle.
struct AppState {
    game: FlappyGame,
    actions: ActionQueue,
    driver: FrameDriver,
    shown_score: Option<u32>,
}

impl AppState {
    fn new(game: FlappyGame, width: u32, height: u32) -> Self {
        Self {
            game,
            actions: ActionQueue::new(),
            driver: FrameDriver::new(RenderView::default(), width, height),
            shown_score: None,
        }
    }

    /// Map a key press to a queued action. Returns true if the key asks to quit.
    fn handle_key(&mut self, key: KeyCode, repeat: bool) -> bool {
        match key {
            KeyCode::Space | KeyCode::ArrowUp => self.actions.push(Action::Jump),
            KeyCode::KeyR if !repeat => self.actions.push(Action::Restart),
            KeyCode::Escape => return true,
            _ => {}
        }
        false
    }

    /// Advance one tick only once a drawable target was acquired, so a dropped
    /// frame costs no game time.
    fn tick_into<T>(
        &mut self,
        target: Result<T, wgpu::SurfaceError>,
        display_size: (u32, u32),
    ) -> Result<(T, Frame), wgpu::SurfaceError> {
        let target = target?;
        let frame = self
            .driver
            .tick(&mut self.game, &mut self.actions, display_size);
        self.game.drain_events();
        Ok((target, frame))
    }
}

/// Window plus the GPU objects created for it.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: WgpuRenderer,
}

struct GpuApp {
    state: AppState,
    size: PhysicalSize<u32>,
    graphics: Option<Graphics>,
    fatal: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(state: AppState, size: PhysicalSize<u32>) -> Self {
        Self {
            state,
            size,
            graphics: None,
            fatal: None,
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(self.size);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let renderer = WgpuRenderer::new(&gpu.device, gpu.config.format, size.width, size.height);

        Ok(Graphics {
            window,
            gpu,
            renderer,
        })
    }

    fn redraw(&mut self) {
        let Some(graphics) = &mut self.graphics else {
            return;
        };

        let acquired = graphics.gpu.surface.get_current_texture();
        let (output, frame) = match self.state.tick_into(acquired, graphics.gpu.size()) {
            Ok(ready) => ready,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("surface lost or outdated, reconfiguring");
                graphics.gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        graphics
            .renderer
            .render(&graphics.gpu.device, &graphics.gpu.queue, &view, &frame);
        output.present();

        let score = self.state.game.score();
        if self.state.shown_score != Some(score) {
            graphics.window.set_title(&format!("{TITLE} | score {score}"));
            self.state.shown_score = Some(score);
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => self.graphics = Some(graphics),
            Err(e) => {
                tracing::error!("graphics init failed: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(graphics) = &mut self.graphics {
                    graphics.gpu.resize(new_size.width, new_size.height);
                    let (width, height) = graphics.gpu.size();
                    graphics
                        .renderer
                        .resize(&graphics.gpu.device, width, height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat,
                        ..
                    },
                ..
            } => {
                if self.state.handle_key(key, repeat) {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => {
                self.state.actions.push(Action::Jump);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if let Some(graphics) = &self.graphics {
                    graphics.window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!(
        backend = skyflap_render_wgpu::crate_info(),
        "skyflap-desktop starting"
    );

    let config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let game = match cli.seed {
        Some(seed) => FlappyGame::with_seed(config, seed)?,
        None => FlappyGame::from_entropy(config)?,
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let state = AppState::new(game, cli.width, cli.height);
    let mut app = GpuApp::new(state, PhysicalSize::new(cli.width, cli.height));
    event_loop.run_app(&mut app)?;

    match app.fatal {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        let game = FlappyGame::with_seed(GameConfig::default(), 1).unwrap();
        AppState::new(game, 800, 600)
    }

    #[test]
    fn jump_keys_queue_jumps() {
        let mut s = state();
        assert!(!s.handle_key(KeyCode::Space, false));
        assert!(!s.handle_key(KeyCode::ArrowUp, false));
        assert!(!s.handle_key(KeyCode::Space, true));
        assert_eq!(s.actions.drain().collect::<Vec<_>>(), vec![Action::Jump; 3]);
    }

    #[test]
    fn restart_ignores_key_repeat() {
        let mut s = state();
        s.handle_key(KeyCode::KeyR, false);
        s.handle_key(KeyCode::KeyR, true);
        assert_eq!(s.actions.drain().collect::<Vec<_>>(), vec![Action::Restart]);
    }

    #[test]
    fn lost_surface_does_not_advance_the_game() {
        let mut s = state();
        s.handle_key(KeyCode::Space, false);
        for err in [wgpu::SurfaceError::Lost, wgpu::SurfaceError::Outdated] {
            assert!(s.tick_into(Err::<(), _>(err), (800, 600)).is_err());
        }
        assert_eq!(s.game.tick(), 0);
        assert_eq!(s.actions.len(), 1);

        let (_, frame) = s.tick_into(Ok(()), (800, 600)).unwrap();
        assert_eq!(frame.tick, 1);
        assert_eq!(s.game.player_velocity(), -4.75);
        assert!(s.actions.is_empty());
    }

    #[test]
    fn escape_requests_quit_without_queueing() {
        let mut s = state();
        assert!(s.handle_key(KeyCode::Escape, false));
        assert!(s.actions.is_empty());
    }
}
