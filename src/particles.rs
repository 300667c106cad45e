//! The particle set: positions, colours and the fixed phase inputs.
//!
//! A [`ParticleSet`] is created once and never resized. Only the y component
//! of each position changes after construction; x is captured into
//! [`ParticleSet::base_x`] and z is left alone.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed-size collection of points with per-point colour.
#[derive(Debug, Clone)]
pub struct ParticleSet {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    base_x: Vec<f32>,
    /// Set whenever positions change; cleared by the renderer on upload.
    dirty: bool,
}

impl ParticleSet {
    /// Build a set from explicit positions and colours.
    ///
    /// `base_x` is taken from the x component of each position.
    ///
    /// # Panics
    ///
    /// Panics if `positions` and `colors` differ in length.
    pub fn from_parts(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        assert_eq!(
            positions.len(),
            colors.len(),
            "position/color count mismatch"
        );
        let base_x = positions.iter().map(|p| p.x).collect();
        Self {
            positions,
            colors,
            base_x,
            dirty: true,
        }
    }

    /// Scatter `count` particles uniformly inside a cube of side `spread`
    /// centred on the origin, with uniformly random colours in `[0, 1)`.
    ///
    /// Passing a `seed` makes the layout reproducible.
    pub fn random(count: usize, spread: f32, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let coord = |rng: &mut StdRng| (rng.gen::<f32>() - 0.5) * spread;

        let positions = (0..count)
            .map(|_| Vec3::new(coord(&mut rng), coord(&mut rng), coord(&mut rng)))
            .collect();
        let colors = (0..count)
            .map(|_| Vec3::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();

        Self::from_parts(positions, colors)
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// Per-particle phase input: the x coordinate captured at construction.
    #[inline]
    pub fn base_x(&self) -> &[f32] {
        &self.base_x
    }

    /// Whether the positions changed since the last [`take_dirty`](Self::take_dirty).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the buffer as needing re-upload.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Split borrow used by the displacement pass: read-only phases and
    /// writable positions.
    pub(crate) fn displacement_view(&mut self) -> (&[f32], &mut [Vec3]) {
        (&self.base_x, &mut self.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_respects_spread_and_color_range() {
        let set = ParticleSet::random(2_000, 10.0, Some(7));
        assert_eq!(set.len(), 2_000);
        assert_eq!(set.colors().len(), 2_000);
        assert_eq!(set.base_x().len(), 2_000);

        for p in set.positions() {
            for c in p.to_array() {
                assert!((-5.0..5.0).contains(&c), "coordinate {c} outside spread");
            }
        }
        for c in set.colors() {
            for v in c.to_array() {
                assert!((0.0..1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let a = ParticleSet::random(100, 4.0, Some(42));
        let b = ParticleSet::random(100, 4.0, Some(42));
        assert_eq!(a.positions(), b.positions());
        assert_eq!(a.colors(), b.colors());
    }

    #[test]
    fn test_base_x_matches_initial_x() {
        let set = ParticleSet::random(64, 2.0, Some(1));
        for (p, x) in set.positions().iter().zip(set.base_x()) {
            assert_eq!(p.x, *x);
        }
    }

    #[test]
    fn test_dirty_flag_is_consumed() {
        let mut set = ParticleSet::random(4, 1.0, Some(3));
        // Fresh sets need an initial upload.
        assert!(set.take_dirty());
        assert!(!set.is_dirty());
        assert!(!set.take_dirty());

        set.mark_dirty();
        assert!(set.take_dirty());
    }

    #[test]
    fn test_empty_set_is_valid() {
        let set = ParticleSet::random(0, 10.0, None);
        assert!(set.is_empty());
        assert!(set.base_x().is_empty());
    }

    #[test]
    #[should_panic(expected = "position/color count mismatch")]
    fn test_from_parts_rejects_mismatched_lengths() {
        ParticleSet::from_parts(vec![Vec3::ZERO; 3], vec![Vec3::ONE; 2]);
    }
}
