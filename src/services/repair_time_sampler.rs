use rand::Rng;
use rand_distr::{Distribution, Open01};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeibullParamError {
    #[error("weibull shape must be a positive finite number, got {0}")]
    Shape(f64),
    #[error("weibull scale must be a positive finite number, got {0}")]
    Scale(f64),
}

/// Draws how many whole days a broken-down vehicle stays off the road.
pub trait RepairTimeSampler {
    fn sample_days<R: Rng + ?Sized>(&self, rng: &mut R) -> u64;
}

/// Weibull distributed repair time, sampled by inverting the CDF
/// `F(x) = 1 - exp(-(x / scale)^shape)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullRepairTime {
    scale: f64,
    inv_shape: f64,
}

impl WeibullRepairTime {
    pub fn new(shape: f64, scale: f64) -> Result<Self, WeibullParamError> {
        if !(shape.is_finite() && shape > 0.0) {
            return Err(WeibullParamError::Shape(shape));
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(WeibullParamError::Scale(scale));
        }
        Ok(Self {
            scale,
            inv_shape: 1.0 / shape,
        })
    }

    /// Continuous repair time for a uniform draw `u` in (0, 1).
    pub fn inverse_cdf(&self, u: f64) -> f64 {
        self.scale * (-(1.0 - u).ln()).powf(self.inv_shape)
    }
}

impl Distribution<f64> for WeibullRepairTime {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = Open01.sample(rng);
        self.inverse_cdf(u)
    }
}

impl RepairTimeSampler for WeibullRepairTime {
    fn sample_days<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        // Float to int casts saturate, so huge tails clamp to u64::MAX.
        Distribution::<f64>::sample(self, rng).round() as u64
    }
}
