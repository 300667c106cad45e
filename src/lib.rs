//! # wavefield
//!
//! An animated field of coloured point sprites. Every frame each particle's
//! height is recomputed from elapsed time and its fixed x coordinate,
//! `y = sin(t + x)`, giving a travelling wave through a random cloud.
//!
//! The displacement core is a pure per-index mapping with no cross-particle
//! state, so it runs sequentially, across the rayon pool, or as a wgpu
//! compute shader with identical results.
//!
//! ## Quick Start
//!
//! ```no_run
//! use wavefield::{Backend, WaveConfig};
//!
//! fn main() -> Result<(), wavefield::AppError> {
//!     let config = WaveConfig::new()
//!         .with_particle_count(50_000)
//!         .with_backend(Backend::Parallel);
//!     wavefield::run(config)
//! }
//! ```
//!
//! ## Headless use
//!
//! The core needs no window. Drive a [`WaveScene`] from any loop:
//!
//! ```
//! use wavefield::prelude::*;
//!
//! let mut scene = WaveScene::new(ParticleSet::random(1_000, 10.0, Some(1)), Backend::Sequential);
//! scene.tick(0.5);
//! assert!(scene.particles().is_dirty());
//! ```
//!
//! ## Modules
//!
//! | Concern | Module |
//! |---------|--------|
//! | Particle storage | [`particles`] |
//! | Wave displacement | [`displacement`] |
//! | Frame scheduling | [`scheduler`] |
//! | Timing | [`time`] |
//! | Orbit camera | [`camera`] |
//! | Configuration | [`config`] |
//! | Window / frame pump | [`app`] |

pub mod app;
pub mod camera;
pub mod config;
pub mod displacement;
mod error;
pub mod gpu;
pub mod panel;
pub mod particles;
pub mod scheduler;
pub mod texture;
pub mod time;

pub use app::run;
pub use camera::OrbitCamera;
pub use config::{BlendMode, WaveConfig};
pub use displacement::{displace_range, wave_height, DisplacementEngine, Strategy};
pub use error::{AppError, ConfigError, GpuError, TextureError};
pub use glam::Vec3;
pub use particles::ParticleSet;
pub use scheduler::{Backend, FrameScheduler, WaveScene};
pub use texture::SpriteTexture;
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use wavefield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::OrbitCamera;
    pub use crate::config::{BlendMode, WaveConfig};
    pub use crate::displacement::{DisplacementEngine, Strategy};
    pub use crate::particles::ParticleSet;
    pub use crate::scheduler::{Backend, FrameScheduler, WaveScene};
    pub use crate::time::Clock;
    pub use crate::Vec3;
}
