//! One-method frame scheduling.
//!
//! The host frame pump (the winit redraw loop in `app`, or a test) calls
//! [`FrameScheduler::tick`] once per display refresh with the current
//! elapsed time. [`WaveScene`] is the scheduler for the particle field: it
//! runs the CPU displacement pass, or leaves the buffer to the GPU when the
//! GPU backend is selected.

use serde::{Deserialize, Serialize};

use crate::displacement::{DisplacementEngine, Strategy};
use crate::particles::ParticleSet;

/// Something driven once per frame by a host loop.
pub trait FrameScheduler {
    /// Run one frame's worth of work for `elapsed` seconds since start.
    fn tick(&mut self, elapsed: f32);
}

/// Where the per-frame displacement runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Sequential,
    #[default]
    Parallel,
    /// Compute shader on the particle vertex buffer.
    Gpu,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Sequential, Backend::Parallel, Backend::Gpu];

    /// CPU strategy for this backend, or `None` when the GPU does the work.
    pub fn cpu_strategy(self) -> Option<Strategy> {
        match self {
            Backend::Sequential => Some(Strategy::Sequential),
            Backend::Parallel => Some(Strategy::Parallel),
            Backend::Gpu => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Backend::Sequential => "CPU (sequential)",
            Backend::Parallel => "CPU (parallel)",
            Backend::Gpu => "GPU compute",
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sequential" | "seq" => Ok(Backend::Sequential),
            "parallel" | "par" => Ok(Backend::Parallel),
            "gpu" => Ok(Backend::Gpu),
            other => Err(format!(
                "unknown backend '{other}' (expected sequential, parallel or gpu)"
            )),
        }
    }
}

/// The animated particle field: particle set plus displacement engine.
#[derive(Debug)]
pub struct WaveScene {
    particles: ParticleSet,
    engine: DisplacementEngine,
    backend: Backend,
    last_elapsed: f32,
}

impl WaveScene {
    pub fn new(particles: ParticleSet, backend: Backend) -> Self {
        let engine = DisplacementEngine::new(backend.cpu_strategy().unwrap_or_default());
        Self {
            particles,
            engine,
            backend,
            last_elapsed: 0.0,
        }
    }

    #[inline]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Mutable access for the renderer's upload hand-off.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.particles
    }

    #[inline]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Elapsed time passed to the most recent tick.
    #[inline]
    pub fn last_elapsed(&self) -> f32 {
        self.last_elapsed
    }

    pub fn set_backend(&mut self, backend: Backend) {
        if let Some(strategy) = backend.cpu_strategy() {
            self.engine.set_strategy(strategy);
        }
        self.backend = backend;
    }
}

impl FrameScheduler for WaveScene {
    fn tick(&mut self, elapsed: f32) {
        self.last_elapsed = elapsed;
        if self.backend.cpu_strategy().is_some() {
            self.engine.update(elapsed, &mut self.particles);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::displacement::wave_height;

    #[test]
    fn test_tick_runs_cpu_pass() {
        let mut scene = WaveScene::new(ParticleSet::random(100, 10.0, Some(5)), Backend::Sequential);
        scene.particles_mut().take_dirty();
        scene.tick(0.75);

        assert_eq!(scene.last_elapsed(), 0.75);
        assert!(scene.particles().is_dirty());
        let set = scene.particles();
        for (p, &x) in set.positions().iter().zip(set.base_x()) {
            assert_eq!(p.y, wave_height(0.75, x));
        }
    }

    #[test]
    fn test_gpu_backend_leaves_cpu_buffer_alone() {
        let initial = ParticleSet::random(10, 10.0, Some(9));
        let before = initial.positions().to_vec();
        let mut scene = WaveScene::new(initial, Backend::Gpu);
        scene.particles_mut().take_dirty();

        scene.tick(1.0);
        assert_eq!(scene.particles().positions(), &before[..]);
        assert!(!scene.particles().is_dirty());
    }

    #[test]
    fn test_switching_backend_resumes_cpu_pass() {
        let mut scene = WaveScene::new(ParticleSet::random(10, 10.0, Some(9)), Backend::Gpu);
        scene.set_backend(Backend::Sequential);
        scene.tick(2.0);
        let set = scene.particles();
        assert_eq!(set.positions()[3].y, wave_height(2.0, set.base_x()[3]));
    }

    #[test]
    fn test_backend_picks_engine_strategy() {
        assert_eq!(Backend::Sequential.cpu_strategy(), Some(Strategy::Sequential));
        assert_eq!(Backend::Parallel.cpu_strategy(), Some(Strategy::Parallel));
        assert_eq!(Backend::Gpu.cpu_strategy(), None);
        assert_eq!(Backend::default().cpu_strategy(), Some(Strategy::default()));
    }

    #[test]
    fn test_backend_parses_from_cli_names() {
        assert_eq!("GPU".parse::<Backend>(), Ok(Backend::Gpu));
        assert_eq!("seq".parse::<Backend>(), Ok(Backend::Sequential));
        assert!("cuda".parse::<Backend>().is_err());
    }
}
