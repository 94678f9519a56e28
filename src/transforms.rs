//! Transformations that can be applied to sample data
//!
//! Mostly useful for testing and demos: inject noise into a clean signal,
//! then check how well the smoother recovers it.

use nalgebra::DMatrix;
use rand::{
    distr::{uniform::SampleUniform, Distribution, Uniform},
    rngs::SmallRng,
    SeedableRng,
};
use rand_distr::{Normal, StandardNormal};

use crate::{statistics::stddev_and_mean, value::Value};

pub use rand;
pub use rand_distr;

/// The strength of a noise transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strength<T: Value> {
    /// Noise amplitude in the units of the data itself.
    Absolute(T),

    /// Noise amplitude as a fraction of the data's standard deviation.
    ///
    /// A column with zero spread falls back to a fraction of 1.
    Relative(T),
}

impl<T: Value> Strength<T> {
    /// Resolves the strength to an absolute amplitude for the given values.
    fn amplitude(self, values: impl Iterator<Item = T>) -> T {
        match self {
            Self::Absolute(a) => a,
            Self::Relative(f) => {
                let (sdev, _) = stddev_and_mean(values);
                if sdev == T::zero() {
                    f
                } else {
                    f * sdev
                }
            }
        }
    }
}

/// Trait for applying random noise to sample data.
///
/// Pass a seed to make the perturbation reproducible; `None` draws fresh
/// entropy from the thread-local generator.
pub trait ApplyNoise<T: Value> {
    /// Adds zero-mean Gaussian noise with the given strength per column.
    #[must_use]
    fn apply_normal_noise(&self, strength: Strength<T>, seed: Option<u64>) -> Self;

    /// Adds noise drawn uniformly from `[-strength, strength]` per column.
    #[must_use]
    fn apply_uniform_noise(&self, strength: Strength<T>, seed: Option<u64>) -> Self;
}

fn rng_from(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_rng(&mut rand::rng()),
    }
}

impl<T> ApplyNoise<T> for DMatrix<T>
where
    T: Value + num_traits::Float + SampleUniform,
    StandardNormal: Distribution<T>,
{
    fn apply_normal_noise(&self, strength: Strength<T>, seed: Option<u64>) -> Self {
        let mut rng = rng_from(seed);
        let mut out = self.clone();
        for c in 0..self.ncols() {
            let amplitude = strength.amplitude(self.column(c).iter().copied());
            let normal = Normal::new(T::zero(), amplitude)
                .unwrap_or_else(|_| Normal::new(T::zero(), <T as num_traits::Float>::epsilon()).expect("valid sigma"));
            for i in 0..self.nrows() {
                out[(i, c)] += normal.sample(&mut rng);
            }
        }
        out
    }

    fn apply_uniform_noise(&self, strength: Strength<T>, seed: Option<u64>) -> Self {
        let mut rng = rng_from(seed);
        let mut out = self.clone();
        for c in 0..self.ncols() {
            let amplitude = strength.amplitude(self.column(c).iter().copied());
            let uniform = Uniform::new_inclusive(-amplitude, amplitude)
                .expect("amplitude range is well formed");
            for i in 0..self.nrows() {
                out[(i, c)] += uniform.sample(&mut rng);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let data = DMatrix::from_row_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let a = data.apply_normal_noise(Strength::Absolute(0.5), Some(42));
        let b = data.apply_normal_noise(Strength::Absolute(0.5), Some(42));
        assert_eq!(a, b);
        assert_ne!(a, data);
    }

    #[test]
    fn test_uniform_noise_is_bounded() {
        let data = DMatrix::from_element(100, 1, 10.0);
        let noisy = data.apply_uniform_noise(Strength::Absolute(0.25), Some(7));
        for (n, d) in noisy.iter().zip(data.iter()) {
            assert!((n - d).abs() <= 0.25);
        }
    }

    #[test]
    fn test_relative_strength_scales_with_spread() {
        // Population sdev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let data = DMatrix::from_row_slice(8, 1, &[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let noisy = data.apply_uniform_noise(Strength::Relative(0.5), Some(3));
        for (n, d) in noisy.iter().zip(data.iter()) {
            assert!((n - d).abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_relative_strength_on_flat_column() {
        let data = DMatrix::from_element(10, 1, 5.0);
        let noisy = data.apply_uniform_noise(Strength::Relative(0.1), Some(11));
        for (n, d) in noisy.iter().zip(data.iter()) {
            assert!((n - d).abs() <= 0.1 + 1e-12);
        }
    }
}
