//! Window and frame pump.
//!
//! [`Viewer`] is the explicit rendering context: it owns the window, GPU
//! renderer, camera, clock and scene, and drives
//! [`FrameScheduler::tick`](crate::FrameScheduler::tick) once per
//! `RedrawRequested`. Each redraw requests the next, and the surface presents
//! with vsync, so the loop runs at the display refresh rate.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::camera::OrbitCamera;
use crate::config::WaveConfig;
use crate::error::AppError;
use crate::gpu::{RenderSettings, Renderer};
use crate::panel::{FrameStats, PanelControls};
use crate::particles::ParticleSet;
use crate::scheduler::{Backend, FrameScheduler, WaveScene};
use crate::texture::SpriteTexture;
use crate::time::Clock;

/// Open a window and animate the particle field until it is closed.
pub fn run(config: WaveConfig) -> Result<(), AppError> {
    config.validate()?;

    log::info!(
        "spawning {} particles (spread {}, backend: {})",
        config.particle_count,
        config.spread,
        config.backend.label()
    );
    let particles = ParticleSet::random(config.particle_count as usize, config.spread, config.seed);
    let sprite = SpriteTexture::load_or_default(config.texture.as_deref());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut viewer = Viewer::new(config, particles, sprite);
    event_loop.run_app(&mut viewer)?;

    match viewer.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Surface size and effective pixel ratio for a window.
///
/// The window's scale factor is capped at `max_ratio`; the surface is the
/// logical window size times that ratio.
///
/// When the cap applies, the surface is smaller than the window and the
/// presentation engine stretches it to fit. Metal, Wayland and X11 swapchains
/// do this; Win32 Vulkan swapchains may require an exact match, so raise
/// `max_pixel_ratio` to the display's scale factor there. The debug panel is
/// rescaled to the capped surface by the renderer.
pub fn surface_size(physical: PhysicalSize<u32>, scale_factor: f64, max_ratio: f32) -> ((u32, u32), f32) {
    let ratio = (scale_factor as f32).min(max_ratio);
    let scale = ratio as f64 / scale_factor;
    let width = (physical.width as f64 * scale).round() as u32;
    let height = (physical.height as f64 * scale).round() as u32;
    ((width, height), ratio)
}

/// Push panel values into the clock and scene. Returns the render settings
/// the renderer should use this frame.
pub fn apply_controls(controls: &PanelControls, clock: &mut Clock, scene: &mut WaveScene) -> RenderSettings {
    clock.set_paused(controls.paused);
    clock.set_time_scale(controls.time_scale);

    if scene.backend() != controls.backend {
        log::debug!(
            "displacement backend {} -> {}",
            scene.backend().label(),
            controls.backend.label()
        );
        scene.set_backend(controls.backend);
    }

    RenderSettings {
        particle_size: controls.particle_size,
        size_attenuation: controls.size_attenuation,
        blend_mode: controls.blend_mode,
        depth_write: controls.depth_write,
    }
}

pub struct Viewer {
    config: WaveConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: WaveScene,
    sprite: SpriteTexture,
    clock: Clock,
    camera: OrbitCamera,
    controls: PanelControls,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    error: Option<AppError>,
}

impl Viewer {
    pub fn new(config: WaveConfig, particles: ParticleSet, sprite: SpriteTexture) -> Self {
        let scene = WaveScene::new(particles, config.backend);
        let camera = OrbitCamera::new(config.camera_distance, config.field_of_view, config.damping);
        let controls = PanelControls::from_config(&config);
        let mut clock = Clock::new();
        clock.set_time_scale(config.time_scale);

        Self {
            config,
            window: None,
            renderer: None,
            scene,
            sprite,
            clock,
            camera,
            controls,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title("wavefield")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let (size, ratio) = surface_size(
            window.inner_size(),
            window.scale_factor(),
            self.config.max_pixel_ratio,
        );

        let settings = apply_controls(&self.controls, &mut self.clock, &mut self.scene);
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            size,
            ratio,
            self.scene.particles_mut(),
            &self.sprite,
            settings,
        ))?;

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.clock.reset();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let settings = apply_controls(&self.controls, &mut self.clock, &mut self.scene);

        let elapsed = self.clock.tick();
        self.scene.tick(elapsed);
        self.camera.update();

        let (Some(renderer), Some(window)) = (self.renderer.as_mut(), self.window.as_ref()) else {
            return;
        };
        renderer.settings = settings;
        renderer.upload_particles(self.scene.particles_mut());
        let gpu_displace = self.scene.backend() == Backend::Gpu;

        #[cfg(feature = "egui")]
        let overlay = if self.config.show_panel {
            let stats = FrameStats {
                fps: self.clock.fps(),
                frame: self.clock.frame(),
                elapsed,
                particle_count: self.scene.particles().len(),
            };
            renderer.egui.begin_frame(window);
            crate::panel::show(&renderer.egui.ctx, &stats, &mut self.controls);
            Some(renderer.egui.end_frame(window))
        } else {
            None
        };

        #[cfg(not(feature = "egui"))]
        let overlay = None;

        let result = renderer.render(&self.camera, elapsed, gpu_displace, overlay);

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory; exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("render error: {e:?}"),
        }

        window.request_redraw();
    }

    /// Title-bar stats for builds without the panel.
    #[cfg_attr(feature = "egui", allow(dead_code))]
    fn stats(&self) -> FrameStats {
        FrameStats {
            fps: self.clock.fps(),
            frame: self.clock.frame(),
            elapsed: self.clock.elapsed(),
            particle_count: self.scene.particles().len(),
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init_window(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        if let (Some(renderer), Some(window)) = (self.renderer.as_mut(), self.window.as_ref()) {
            if self.config.show_panel && renderer.egui.on_window_event(window, &event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let (Some(renderer), Some(window)) = (self.renderer.as_mut(), self.window.as_ref()) {
                    let (size, ratio) = surface_size(
                        physical_size,
                        window.scale_factor(),
                        self.config.max_pixel_ratio,
                    );
                    renderer.resize(size, ratio);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        self.camera
                            .rotate((position.x - last_x) as f32, (position.y - last_y) as f32);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.zoom(scroll);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);

                #[cfg(not(feature = "egui"))]
                if self.clock.frame() % 60 == 0 {
                    if let Some(window) = &self.window {
                        let stats = self.stats();
                        window.set_title(&format!(
                            "wavefield - {} particles - {:.0} fps",
                            stats.particle_count, stats.fps
                        ));
                    }
                }
            }
            _ => {}
        }
    }
}
