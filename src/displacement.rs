//! Per-frame wave displacement.
//!
//! Every particle's height is a pure function of elapsed time and its fixed
//! x coordinate:
//!
//! ```text
//! y[i] = sin(elapsed + base_x[i])
//! ```
//!
//! No particle reads another particle's state, so the pass can be split into
//! arbitrary index ranges and run in any order. [`displace_range`] is that
//! mapping over one range; [`DisplacementEngine`] applies it to a whole
//! [`ParticleSet`] sequentially or across the rayon pool. The GPU backend
//! runs the same formula in a compute shader (see [`gpu::shaders`](crate::gpu::shaders)).
//!
//! # Example
//!
//! ```
//! use wavefield::{DisplacementEngine, ParticleSet, Strategy, Vec3};
//!
//! let mut set = ParticleSet::from_parts(
//!     vec![Vec3::new(0.0, 5.0, 1.0)],
//!     vec![Vec3::ONE],
//! );
//! DisplacementEngine::new(Strategy::Sequential).update(0.0, &mut set);
//! assert_eq!(set.positions()[0], Vec3::new(0.0, 0.0, 1.0));
//! ```

use std::ops::Range;

use glam::Vec3;
use rayon::prelude::*;

use crate::particles::ParticleSet;

/// Particles per rayon task. Large enough that task overhead stays small
/// next to 4096 `sin` evaluations.
pub const PARALLEL_CHUNK: usize = 4096;

/// Height of a particle with phase `base_x` at time `elapsed`.
#[inline]
pub fn wave_height(elapsed: f32, base_x: f32) -> f32 {
    (elapsed + base_x).sin()
}

/// Recompute `positions[i].y` for every `i` in `range`.
///
/// Touches nothing outside `range` and only the y component inside it.
///
/// # Panics
///
/// Panics if the slices differ in length or `range` falls outside them.
pub fn displace_range(elapsed: f32, base_x: &[f32], positions: &mut [Vec3], range: Range<usize>) {
    assert_eq!(
        base_x.len(),
        positions.len(),
        "base_x/positions length mismatch"
    );
    assert!(
        range.start <= range.end && range.end <= positions.len(),
        "particle range {:?} out of bounds for {} particles",
        range,
        positions.len()
    );

    for (p, &x) in positions[range.clone()].iter_mut().zip(&base_x[range]) {
        p.y = wave_height(elapsed, x);
    }
}

/// How the CPU pass is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// One pass on the calling thread.
    Sequential,
    /// Fixed-size chunks spread over the rayon global pool.
    #[default]
    Parallel,
}

/// Applies the wave to a [`ParticleSet`] once per frame.
///
/// Stateless apart from its strategy; calling [`update`](Self::update) twice
/// with the same time leaves an identical buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplacementEngine {
    strategy: Strategy,
}

impl DisplacementEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Recompute every particle's height for `elapsed` and flag the set for
    /// re-upload.
    ///
    /// Any finite `elapsed` is accepted; monotonicity is the caller's concern.
    pub fn update(&self, elapsed: f32, particles: &mut ParticleSet) {
        let (base_x, positions) = particles.displacement_view();
        assert_eq!(
            base_x.len(),
            positions.len(),
            "base_x/positions length mismatch"
        );

        match self.strategy {
            Strategy::Sequential => {
                let len = positions.len();
                displace_range(elapsed, base_x, positions, 0..len);
            }
            Strategy::Parallel => {
                positions
                    .par_chunks_mut(PARALLEL_CHUNK)
                    .zip(base_x.par_chunks(PARALLEL_CHUNK))
                    .for_each(|(chunk, phases)| {
                        let len = chunk.len();
                        displace_range(elapsed, phases, chunk, 0..len);
                    });
            }
        }

        particles.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line(xs: &[f32]) -> ParticleSet {
        let positions = xs.iter().map(|&x| Vec3::new(x, 9.0, -x)).collect();
        let colors = vec![Vec3::splat(0.5); xs.len()];
        ParticleSet::from_parts(positions, colors)
    }

    #[test]
    fn test_wave_height_at_quarter_turns() {
        use std::f32::consts::{FRAC_PI_2, PI};
        assert_abs_diff_eq!(wave_height(0.0, 0.0), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wave_height(0.0, FRAC_PI_2), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wave_height(FRAC_PI_2, PI), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_displace_range_only_touches_range() {
        let mut set = line(&[0.1, 0.2, 0.3, 0.4]);
        let (base_x, positions) = set.displacement_view();
        displace_range(1.0, base_x, positions, 1..3);

        assert_eq!(positions[0].y, 9.0);
        assert_eq!(positions[3].y, 9.0);
        assert_abs_diff_eq!(positions[1].y, (1.2f32).sin(), epsilon = 1e-6);
        assert_abs_diff_eq!(positions[2].y, (1.3f32).sin(), epsilon = 1e-6);
    }

    #[test]
    fn test_empty_range_is_noop() {
        let mut set = line(&[0.5]);
        let (base_x, positions) = set.displacement_view();
        displace_range(3.0, base_x, positions, 1..1);
        assert_eq!(positions[0].y, 9.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_range_past_end_panics() {
        let mut positions = vec![Vec3::ZERO; 2];
        displace_range(0.0, &[0.0, 0.0], &mut positions, 0..3);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_mismatched_lengths_panic() {
        let mut positions = vec![Vec3::ZERO; 3];
        displace_range(0.0, &[0.0, 0.0], &mut positions, 0..2);
    }

    #[test]
    fn test_update_marks_dirty() {
        let mut set = line(&[0.0, 1.0]);
        set.take_dirty();
        DisplacementEngine::new(Strategy::Sequential).update(0.5, &mut set);
        assert!(set.take_dirty());
    }

    #[test]
    fn test_update_on_empty_set_marks_dirty() {
        let mut set = line(&[]);
        set.take_dirty();
        DisplacementEngine::new(Strategy::Parallel).update(2.0, &mut set);
        assert!(set.is_empty());
        assert!(set.is_dirty());
    }

    #[test]
    fn test_parallel_handles_partial_last_chunk() {
        let xs: Vec<f32> = (0..PARALLEL_CHUNK + 17).map(|i| i as f32 * 0.01).collect();
        let mut set = line(&xs);
        DisplacementEngine::new(Strategy::Parallel).update(0.25, &mut set);
        for (p, &x) in set.positions().iter().zip(&xs) {
            assert_eq!(p.y, wave_height(0.25, x));
        }
    }
}
