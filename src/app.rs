// Window, renderer and event loop glue around a duel session

use anyhow::{anyhow, Result};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Fullscreen, Window, WindowBuilder},
};

use crate::config::GameConfig;
use crate::engine::assets::AssetManager;
use crate::engine::game_loop::GameLoop;
use crate::engine::input::InputManager;
use crate::engine::renderer::{Renderer, TextRenderer};
use crate::game::duel::{DisplayMode, Duel};
use crate::game::render::SpriteSet;

pub struct App {
    config: GameConfig,
    window: Arc<Window>,
    renderer: Renderer,
    input: InputManager,
    game_loop: GameLoop,
    duel: Duel,
}

impl App {
    /// Open the window and load every asset; any failure is fatal
    pub fn new(config: GameConfig, event_loop: &EventLoop<()>) -> Result<Self> {
        let (width, height) = config.windowed_size;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(config.title.as_str())
                .with_inner_size(LogicalSize::new(width, height))
                .with_resizable(false)
                .build(event_loop)?,
        );
        info!("Window created ({}x{})", width, height);

        let mut assets = AssetManager::new(&config.asset_root);
        let font_bytes = assets.load_font_bytes(&config.font_name)?;
        let text = TextRenderer::from_bytes(&config.font_name, font_bytes, config.font_size)?;
        info!("Font {} loaded", config.font_name);

        let mut renderer = pollster::block_on(Renderer::new(
            window.clone(),
            config.windowed_size,
            text,
        ))?;
        let sprites = SpriteSet::load(&mut assets, renderer.texture_manager_mut())?;

        let game_loop = GameLoop::new(config.frame_delay);
        let duel = Duel::new(config.clone(), sprites, game_loop.now_ms());

        Ok(Self {
            config,
            window,
            renderer,
            input: InputManager::new(),
            game_loop,
            duel,
        })
    }

    /// Run until the session stops
    pub fn run(mut self, event_loop: EventLoop<()>) -> Result<()> {
        event_loop
            .run(move |event, elwt| self.handle_event(event, elwt))
            .map_err(|e| anyhow!("Event loop error: {}", e))
    }

    fn handle_event(&mut self, event: Event<()>, elwt: &EventLoopWindowTarget<()>) {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => self.duel.quit(),
                WindowEvent::Resized(size) => self.renderer.resize(size),
                // Releases that happen while unfocused are never delivered
                WindowEvent::Focused(false) => self.input.reset_all(),
                WindowEvent::KeyboardInput { event, .. } => {
                    self.input.process_keyboard_event(&event)
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    self.input.process_mouse_button(button, state)
                }
                _ => {}
            },
            Event::AboutToWait => {
                if self.duel.is_running() && self.game_loop.is_frame_due(Instant::now()) {
                    self.run_frame();
                }

                if self.duel.is_running() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(self.game_loop.next_frame_at()));
                } else {
                    info!(
                        "Stopping after {} frames ({:.1} fps)",
                        self.game_loop.frame_count(),
                        self.game_loop.fps()
                    );
                    elwt.exit();
                }
            }
            _ => {}
        }
    }

    fn run_frame(&mut self) {
        let now_ms = self.game_loop.begin_frame();

        if let Some(mode) = self.duel.update(&mut self.input, now_ms) {
            self.apply_display_mode(mode);
        }

        self.duel.render(&mut self.renderer);
        match self.renderer.present() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("Surface lost, reconfiguring and skipping frame");
                self.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Out of GPU memory");
                self.duel.quit();
            }
            Err(e) => warn!("Skipped frame: {:?}", e),
        }

        self.input.update();
        self.game_loop.end_frame();
    }

    fn apply_display_mode(&mut self, mode: DisplayMode) {
        let (width, height) = mode.size(&self.config);

        match mode {
            DisplayMode::Fullscreen => {
                let Some(monitor) = self.window.current_monitor() else {
                    error!("No monitor available for fullscreen");
                    self.duel.display_failed();
                    return;
                };
                self.window
                    .set_fullscreen(Some(Fullscreen::Borderless(Some(monitor))));
            }
            DisplayMode::Windowed => {
                self.window.set_fullscreen(None);
                if let Some(size) = self
                    .window
                    .request_inner_size(LogicalSize::new(width, height))
                {
                    self.renderer.resize(size);
                }
            }
        }

        self.renderer.set_logical_size(width, height);
        info!("Display mode {:?} at {}x{}", mode, width, height);
    }
}
