//! Error types for wavefield.
//!
//! Precondition violations inside the displacement core panic; these types
//! cover the recoverable failures of the collaborators around it (GPU setup,
//! texture loading, configuration, windowing).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; a GPU with WebGPU/Vulkan/Metal/DX12 support is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,
}

/// Errors that can occur while loading the particle sprite.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Failed to decode the image file.
    #[error("failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Image had a zero dimension.
    #[error("texture '{0}' has zero width or height")]
    Empty(PathBuf),
}

/// Errors from reading, writing or validating a [`WaveConfig`](crate::WaveConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Errors that can occur when running the viewer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_message_names_field() {
        let err = ConfigError::Invalid {
            field: "particle_size",
            reason: "must be positive".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("particle_size"));
        assert!(msg.contains("must be positive"));
    }

    #[test]
    fn test_app_error_wraps_gpu_error() {
        let err: AppError = GpuError::NoAdapter.into();
        assert!(matches!(err, AppError::Gpu(GpuError::NoAdapter)));
        assert!(err.to_string().starts_with("GPU error"));
    }
}
