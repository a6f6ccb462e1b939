//! Candy Match -- main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. Each `RedrawRequested`
//! is one tick of the game, run in strict order on this thread:
//!
//!   1. Pump joystick state and decode it together with the latched quit flag
//!   2. `GameLoop::tick` -- movement, texture cycling, exit checks
//!   3. Render the frame's draw list (clear, background, cake)
//!   4. Sleep for what is left of the 20ms tick budget
//!
//! The joystick is opened before any window exists. Missing joystick, missing
//! PNG support, or a window/GPU failure are fatal and exit with status 1.
//! A missing texture is not fatal: it is logged and simply not drawn.

use std::process::ExitCode;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use candy_core::time::TickClock;
use candy_core::{FrameInput, FramePacer, FrameStats, GameConfig, GameLoop};
use candy_platform::{create_window, Joystick, PlatformConfig};
use candy_render::texture::ensure_png_support;
use candy_render::{AssetPaths, GpuContext, SpriteRenderer, TextureCache};

/// How often smoothed frame timing is written to the trace log.
const STATS_LOG_INTERVAL: u64 = 250;

/// Everything that exists only while the window is open.
///
/// Field order is drop order: textures go before the renderer and the GPU
/// context they were created from, and the window goes last.
struct EngineState {
    textures: TextureCache,
    renderer: SpriteRenderer,
    gpu: GpuContext,
    game: GameLoop,
    pacer: FramePacer,
    stats: FrameStats,
    clock: TickClock,
    window: Arc<Window>,
}

impl EngineState {
    fn new(
        window: Arc<Window>,
        game_config: GameConfig,
        logical: (u32, u32),
        assets: &AssetPaths,
    ) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let renderer = SpriteRenderer::new(&gpu, logical);
        let textures = TextureCache::load(
            &gpu.device,
            &gpu.queue,
            &renderer.pipeline,
            assets,
            game_config.cake_texture_count,
        );
        let pacer = FramePacer::new(game_config.tick_budget_ms, game_config.pacing);
        log::info!(
            "Tick budget {}ms ({:?} pacing)",
            pacer.budget_ms,
            pacer.mode
        );

        Ok(Self {
            textures,
            renderer,
            gpu,
            game: GameLoop::new(game_config),
            stats: FrameStats::new(pacer.budget_ms),
            pacer,
            clock: TickClock::new(),
            window,
        })
    }
}

struct App {
    platform: PlatformConfig,
    game_config: GameConfig,
    assets: AssetPaths,
    joystick: Joystick,
    state: Option<EngineState>,
    quit_requested: bool,
    startup_error: Option<String>,
}

impl App {
    fn new(joystick: Joystick, game_config: GameConfig) -> Self {
        Self {
            platform: PlatformConfig {
                width: game_config.screen_width as u32,
                height: game_config.screen_height as u32,
                ..PlatformConfig::default()
            },
            game_config,
            assets: AssetPaths::default(),
            joystick,
            state: None,
            quit_requested: false,
            startup_error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<EngineState, String> {
        let window = create_window(event_loop, &self.platform)?;
        let physical = window.inner_size();
        log::info!(
            "Window created: {}x{} (logical {}x{})",
            physical.width,
            physical.height,
            self.platform.width,
            self.platform.height
        );
        EngineState::new(
            window,
            self.game_config,
            (self.platform.width, self.platform.height),
            &self.assets,
        )
    }

    fn run_tick(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let start_tick = state.clock.ticks();

        self.joystick.refresh();
        let input = FrameInput::poll(self.quit_requested, &self.joystick);
        if !state.game.tick(input).is_running() {
            event_loop.exit();
            return;
        }

        let draw_list = state.game.draw_list();
        state.renderer.render(&state.gpu, &state.textures, &draw_list);

        let sleep = state.pacer.sleep_for(start_tick, state.clock.ticks());
        std::thread::sleep(sleep);

        state.stats.record(state.clock.ticks().wrapping_sub(start_tick));
        if state.stats.frame_count % STATS_LOG_INTERVAL == 0 {
            log::trace!(
                "frame {}: {:.2}ms avg ({:.1} fps)",
                state.stats.frame_count,
                state.stats.smoothed_frame_time_ms,
                state.stats.smoothed_fps
            );
        }
    }

    fn exit_code(&self) -> ExitCode {
        if self.startup_error.is_some() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.startup_error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("{err}");
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
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
                log::info!("Close requested");
                self.quit_requested = true;
                // Handle it now rather than waiting for a redraw the
                // compositor may never deliver to a closing window.
                self.run_tick(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(state) = self.state.as_mut() {
                    state
                        .gpu
                        .resize(physical_size.width, physical_size.height);
                    log::info!(
                        "Resized to {}x{}",
                        physical_size.width,
                        physical_size.height
                    );
                }
            }

            WindowEvent::RedrawRequested => {
                let has_surface = self
                    .state
                    .as_ref()
                    .is_some_and(|s| s.gpu.size.0 > 0 && s.gpu.size.1 > 0);
                if has_surface {
                    self.run_tick(event_loop);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            log::info!("destroy window");
            state.textures.release();
            drop(state);
        }
        log::info!("shutting down");
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Candy Match starting...");

    let game_config = GameConfig::default();
    if let Err(err) = game_config.validate() {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = ensure_png_support() {
        log::error!("{err}");
        return ExitCode::FAILURE;
    }

    let joystick = match Joystick::open_first() {
        Ok(joystick) => joystick,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Using joystick '{}'", joystick.name());

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {err}");
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(joystick, game_config);
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {err}");
        return ExitCode::FAILURE;
    }

    let code = app.exit_code();
    drop(app);
    log::info!("done");
    code
}
