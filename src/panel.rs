//! Debug panel.
//!
//! [`PanelControls`] holds the tweakable values and is always compiled so the
//! viewer can apply them the same way with or without a UI. The egui window
//! that edits them is behind the `egui` feature.

use crate::config::{BlendMode, WaveConfig};
use crate::scheduler::Backend;

/// Values the panel edits. Applied by the viewer at the start of each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelControls {
    pub paused: bool,
    pub time_scale: f32,
    pub particle_size: f32,
    pub size_attenuation: bool,
    pub blend_mode: BlendMode,
    pub depth_write: bool,
    pub backend: Backend,
}

impl PanelControls {
    pub fn from_config(config: &WaveConfig) -> Self {
        Self {
            paused: false,
            time_scale: config.time_scale,
            particle_size: config.particle_size,
            size_attenuation: config.size_attenuation,
            blend_mode: config.blend_mode,
            depth_write: config.depth_write,
            backend: config.backend,
        }
    }
}

/// Read-only numbers shown at the top of the panel.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub frame: u64,
    pub elapsed: f32,
    pub particle_count: usize,
}

#[cfg(feature = "egui")]
pub fn show(ctx: &egui::Context, stats: &FrameStats, controls: &mut PanelControls) {
    egui::Window::new("Debug")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("{:.0} fps  |  frame {}", stats.fps, stats.frame));
            ui.label(format!(
                "{} particles  |  t = {:.2}s",
                stats.particle_count, stats.elapsed
            ));
            ui.separator();

            ui.checkbox(&mut controls.paused, "Paused");
            ui.add(egui::Slider::new(&mut controls.time_scale, 0.0..=4.0).text("time scale"));

            ui.separator();
            ui.add(
                egui::Slider::new(&mut controls.particle_size, 0.005..=0.5)
                    .logarithmic(true)
                    .text("size"),
            );
            ui.checkbox(&mut controls.size_attenuation, "Size attenuation");
            ui.checkbox(&mut controls.depth_write, "Depth write");
            ui.horizontal(|ui| {
                ui.label("Blending");
                ui.selectable_value(&mut controls.blend_mode, BlendMode::Additive, "Additive");
                ui.selectable_value(&mut controls.blend_mode, BlendMode::Alpha, "Alpha");
            });

            ui.separator();
            egui::ComboBox::from_label("Displacement")
                .selected_text(controls.backend.label())
                .show_ui(ui, |ui| {
                    for backend in Backend::ALL {
                        ui.selectable_value(&mut controls.backend, backend, backend.label());
                    }
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_start_from_config() {
        let config = WaveConfig::new()
            .with_time_scale(0.25)
            .with_particle_size(0.1)
            .with_backend(Backend::Gpu);
        let controls = PanelControls::from_config(&config);
        assert!(!controls.paused);
        assert_eq!(controls.time_scale, 0.25);
        assert_eq!(controls.particle_size, 0.1);
        assert_eq!(controls.backend, Backend::Gpu);
        assert_eq!(controls.blend_mode, BlendMode::Additive);
    }
}
