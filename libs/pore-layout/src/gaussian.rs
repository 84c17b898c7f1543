//! Gaussian sampling via the Box-Muller transform.

use std::f64::consts::PI;

use glam::DVec3;
use rand::Rng;

/// Sample from N(mean, std_dev²).
///
/// `u1` is drawn from (0, 1] so the logarithm stays finite.
pub fn sample_gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

/// Sample a point with independent N(mean, std_dev²) coordinates.
pub fn sample_gaussian_point<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> DVec3 {
    DVec3::new(
        sample_gaussian(rng, mean, std_dev),
        sample_gaussian(rng, mean, std_dev),
        sample_gaussian(rng, mean, std_dev),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_gaussian_moments() {
        let mut rng = ChaChaRng::seed_from_u64(42);
        let n = 20_000;
        let samples: Vec<f64> = (0..n).map(|_| sample_gaussian(&mut rng, 3.0, 0.5)).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        assert!((mean - 3.0).abs() < 0.02, "mean drifted: {}", mean);
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std drifted: {}", var.sqrt());
    }

    #[test]
    fn test_zero_std_dev_is_constant() {
        let mut rng = ChaChaRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(sample_gaussian(&mut rng, 0.25, 0.0), 0.25);
        }
    }

    #[test]
    fn test_samples_are_finite() {
        let mut rng = ChaChaRng::seed_from_u64(9);
        for _ in 0..10_000 {
            assert!(sample_gaussian_point(&mut rng, 0.5, 0.15).is_finite());
        }
    }
}
