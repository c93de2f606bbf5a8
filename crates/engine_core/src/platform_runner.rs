// crates/engine_core/src/platform_runner.rs

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::app::App;
use crate::assets::AssetStore;
use crate::engine_loop::EngineLoop;
use crate::error::HostError;
use crate::host::{self, HostState};
use crate::hot_reload::PluginWatcher;
use crate::input::{EngineAction, InputSampler};
use crate::inspector::{self, PluginStatus};
use crate::painter;
use crate::plugin_manager::{PluginManager, PluginRuntimeState};
use crate::renderer::Renderer;

use engine_shared::plugin_api::HostInterface;

/// Simple, best-effort file logger for fatal errors.
fn log_fatal_error_to_file(message: &str) {
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open("engine_fatal.log")
    {
        let _ = writeln!(file, "{}", message);
    }
}

/// Owns App and runs the platform (winit) event loop.
/// This isolates OS interaction from the engine core.
pub struct PlatformRunner {
    app: App,
}

impl PlatformRunner {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    pub fn start(mut self) -> Result<(), HostError> {
        let config = self.app.config.clone();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window.width,
                config.window.height,
            ))
            .build(&event_loop)?;

        // GUI + renderer initialization
        self.app.gui.init(&window);
        let mut renderer = pollster::block_on(Renderer::new(&window))?;

        // Host + plugin initialization
        let mut host = HostState::new(AssetStore::new(&config.asset_root), self.app.gui.ctx.clone());
        let host_interface: HostInterface = host::create_interface();

        let mut plugin_manager = PluginManager::new(&config.plugin_path, config.hot_reload.debounce());
        plugin_manager.initial_load(&mut host, &host_interface);

        let watcher = if config.hot_reload.watch {
            match PluginWatcher::new(&config.plugin_path) {
                Ok(w) => Some(w),
                Err(e) => {
                    warn!(error = %e, "hot reload on file change disabled");
                    None
                }
            }
        } else {
            None
        };
        // Set when the library changes; the reload waits for writes to settle.
        let mut pending_reload: Option<Instant> = None;

        let mut engine_loop = EngineLoop::new();
        let mut input_sampler = InputSampler::default();

        event_loop.run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            // Give GUI first shot at all window events (for focus, etc.).
            if let Event::WindowEvent { event: ref w_event, .. } = event {
                self.app.gui.handle_event(&window, w_event);
            }

            match event {
                Event::WindowEvent { event: win_event, .. } => match win_event {
                    WindowEvent::CloseRequested => elwt.exit(),

                    WindowEvent::Resized(size) => renderer.resize(size),

                    WindowEvent::RedrawRequested => {
                        let frame_dt = engine_loop.tick_timer();

                        let mut actions = Vec::new();
                        let mut inspector_open = self.app.gui.show_inspector;
                        let input_map = &self.app.input_map;

                        let frame = self.app.gui.draw(&window, |ctx| {
                            actions = input_map.triggered(ctx);

                            // --- UPDATE PHASE ---
                            let input = input_sampler.sample(ctx, frame_dt);
                            plugin_manager.update(&mut host, &input);
                            painter::paint(ctx, &mut host.assets, host.draw_list.take());

                            // --- ENGINE UI ---
                            if inspector_open {
                                let status = PluginStatus::collect(
                                    &plugin_manager,
                                    host.assets.len(),
                                    host.draw_list.last_len(),
                                    frame_dt,
                                );
                                inspector::show(ctx, &status, &mut inspector_open);
                            }
                            if let PluginRuntimeState::PausedError(msg) = &plugin_manager.runtime_state {
                                inspector::show_error(ctx, msg);
                            }
                        });
                        self.app.gui.show_inspector = inspector_open;

                        // Engine internal actions, edge-triggered by egui.
                        for action in actions {
                            match action {
                                EngineAction::ToggleInspector => self.app.gui.toggle_inspector(),
                                EngineAction::ReloadPlugin => {
                                    pending_reload = None;
                                    plugin_manager.try_hot_reload(&mut host, &host_interface);
                                }
                            }
                        }

                        let Some(frame) = frame else {
                            return;
                        };

                        // --- RENDER PHASE ---
                        match renderer.render(frame.pixels_per_point, &frame.primitives, &frame.textures_delta) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                                warn!("surface lost/outdated, reconfiguring swapchain");
                                renderer.recover();
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                let msg = "[Renderer] FATAL: Out of GPU memory. Exiting.";
                                error!("{msg}");
                                log_fatal_error_to_file(msg);
                                elwt.exit();
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                warn!("surface timeout, skipping this frame");
                            }
                        }
                    }

                    _ => {}
                },

                Event::AboutToWait => {
                    if watcher.as_ref().is_some_and(|w| w.changed()) {
                        pending_reload = Some(Instant::now());
                    }
                    if let Some(since) = pending_reload {
                        if since.elapsed() >= config.hot_reload.debounce() {
                            pending_reload = None;
                            info!("plugin rebuilt on disk");
                            plugin_manager.try_hot_reload(&mut host, &host_interface);
                        }
                    }

                    window.request_redraw();
                }

                _ => {}
            }
        })?;

        Ok(())
    }
}
