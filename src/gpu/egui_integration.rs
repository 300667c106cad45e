//! egui overlay that carries the wave viewer's debug panel.
//!
//! The panel is drawn in its own pass after the particles, loading the
//! particle frame rather than clearing it. Pointer events that land on the
//! panel are consumed here so dragging a slider does not also orbit the
//! camera.

use std::sync::Arc;
use winit::window::Window;

/// Panel state owned by the [`Renderer`](super::Renderer): the egui
/// context, winit input translation and the wgpu paint backend.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// One frame of panel geometry, handed to [`Renderer::render`](super::Renderer::render)
/// as its overlay.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    /// egui's own points-to-window-pixels factor.
    pub pixels_per_point: f32,
    /// Window scale factor when the frame was built. The renderer combines
    /// it with the capped pixel ratio to map points onto the surface.
    pub window_scale: f32,
}

impl EguiIntegration {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        // Translucent dark panel over a black scene.
        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        style.visuals.window_fill = egui::Color32::from_black_alpha(200);
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(device, output_format, None, 1, false);

        Self { ctx, state, renderer }
    }

    /// Feed a winit event. Returns true if egui consumed it, in which case
    /// the camera should ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Start collecting panel widgets for this redraw.
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
    }

    /// Finish the panel and tessellate it for the overlay pass.
    pub fn end_frame(&mut self, window: &Window) -> EguiFrameOutput {
        let full_output = self.ctx.end_pass();
        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
            window_scale: window.scale_factor() as f32,
        }
    }

    /// Upload the panel's font atlas changes and vertex data. Returns command
    /// buffers that must be submitted ahead of the frame encoder so the panel
    /// pass sees them.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: &EguiFrameOutput,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &output.paint_jobs, screen_descriptor)
    }

    pub fn renderer(&self) -> &egui_wgpu::Renderer {
        &self.renderer
    }

    /// Release textures egui dropped this frame. Call after submission.
    pub fn cleanup(&mut self, output: &EguiFrameOutput) {
        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
