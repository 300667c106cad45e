//! Viewer configuration.
//!
//! [`WaveConfig`] can be built in code with the `with_*` methods, or loaded
//! from JSON. Missing JSON fields take their defaults, so a config file only
//! needs to list what it changes:
//!
//! ```json
//! { "particle_count": 200000, "backend": "gpu", "particle_size": 0.03 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scheduler::Backend;

/// How overlapping sprites combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,
    /// Colours add together; dense regions glow.
    #[default]
    Additive,
}

impl BlendMode {
    pub(crate) fn to_wgpu(self) -> wgpu::BlendState {
        match self {
            BlendMode::Alpha => wgpu::BlendState::ALPHA_BLENDING,
            BlendMode::Additive => wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            },
        }
    }
}

/// Complete viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    pub particle_count: u32,
    /// Side length of the cube the particles are scattered in.
    pub spread: f32,
    /// Sprite size: world units with attenuation, hundreds of pixels without.
    pub particle_size: f32,
    pub size_attenuation: bool,
    pub blend_mode: BlendMode,
    pub depth_write: bool,
    /// Sprite image. A generated soft disc is used when unset.
    pub texture: Option<PathBuf>,
    pub backend: Backend,
    pub seed: Option<u64>,
    pub time_scale: f32,
    /// Upper bound on the window scale factor used for the surface.
    pub max_pixel_ratio: f32,
    pub window_width: u32,
    pub window_height: u32,
    pub camera_distance: f32,
    pub field_of_view: f32,
    pub damping: f32,
    pub show_panel: bool,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            particle_count: 50_000,
            spread: 10.0,
            particle_size: 0.06,
            size_attenuation: true,
            blend_mode: BlendMode::Additive,
            depth_write: false,
            texture: None,
            backend: Backend::Parallel,
            seed: None,
            time_scale: 1.0,
            max_pixel_ratio: 2.0,
            window_width: 1280,
            window_height: 720,
            camera_distance: 3.0,
            field_of_view: 75.0,
            damping: 0.05,
            show_panel: true,
        }
    }
}

impl WaveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_particle_count(mut self, count: u32) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    pub fn with_size_attenuation(mut self, enabled: bool) -> Self {
        self.size_attenuation = enabled;
        self
    }

    pub fn with_blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    pub fn with_depth_write(mut self, enabled: bool) -> Self {
        self.depth_write = enabled;
        self
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    pub fn with_max_pixel_ratio(mut self, ratio: f32) -> Self {
        self.max_pixel_ratio = ratio;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn with_camera(mut self, distance: f32, field_of_view: f32, damping: f32) -> Self {
        self.camera_distance = distance;
        self.field_of_view = field_of_view;
        self.damping = damping;
        self
    }

    pub fn with_panel(mut self, show: bool) -> Self {
        self.show_panel = show;
        self
    }

    /// Load a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }

        if !(self.spread.is_finite() && self.spread > 0.0) {
            return invalid("spread", "must be a positive number");
        }
        if !(self.particle_size.is_finite() && self.particle_size > 0.0) {
            return invalid("particle_size", "must be a positive number");
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return invalid("time_scale", "must be zero or positive");
        }
        if !(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio > 0.0) {
            return invalid("max_pixel_ratio", "must be a positive number");
        }
        if self.window_width == 0 || self.window_height == 0 {
            return invalid("window_width", "window dimensions must be non-zero");
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            return invalid("camera_distance", "must be a positive number");
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < 180.0) {
            return invalid("field_of_view", "must lie strictly between 0 and 180 degrees");
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return invalid("damping", "must lie in (0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_scene() {
        let config = WaveConfig::default();
        assert_eq!(config.particle_count, 50_000);
        assert_eq!(config.spread, 10.0);
        assert_eq!(config.particle_size, 0.06);
        assert_eq!(config.blend_mode, BlendMode::Additive);
        assert!(!config.depth_write);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = WaveConfig::from_json(r#"{ "particle_count": 12, "backend": "gpu" }"#).unwrap();
        assert_eq!(config.particle_count, 12);
        assert_eq!(config.backend, Backend::Gpu);
        assert_eq!(config.spread, 10.0);
        assert_eq!(config.texture, None);
    }

    #[test]
    fn test_json_round_trip() {
        let config = WaveConfig::new()
            .with_particle_count(7)
            .with_texture("textures/particles/2.png")
            .with_blend_mode(BlendMode::Alpha)
            .with_seed(99);
        let back = WaveConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("wavefield-config-{}.json", std::process::id()));
        let config = WaveConfig::new().with_time_scale(0.5);
        config.save(&path).unwrap();
        let loaded = WaveConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = WaveConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = [
            (WaveConfig::new().with_particle_size(0.0), "particle_size"),
            (WaveConfig::new().with_spread(-1.0), "spread"),
            (WaveConfig::new().with_time_scale(-0.1), "time_scale"),
            (WaveConfig::new().with_max_pixel_ratio(0.0), "max_pixel_ratio"),
            (WaveConfig::new().with_window_size(0, 10), "window_width"),
            (WaveConfig::new().with_camera(3.0, 180.0, 0.05), "field_of_view"),
            (WaveConfig::new().with_camera(3.0, 75.0, 0.0), "damping"),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("expected {expected} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_backend_is_json_error() {
        let err = WaveConfig::from_json(r#"{ "backend": "cuda" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
