use crate::config::EngineConfig;
use crate::model::AnalysisError;
use crate::parser::SiteHealthView;
use crate::scoring::{round_to, round_whole};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use serde_json::Value;

/// Source of zero-mean Gaussian noise for the traffic forecast.
pub trait NoiseSource {
    fn sample(&mut self, std_dev: f64) -> Result<f64, AnalysisError>;
}

/// Gaussian noise drawn from a random number generator.
pub struct GaussianNoise<R: Rng> {
    rng: R,
}

impl GaussianNoise<StdRng> {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> NoiseSource for GaussianNoise<R> {
    fn sample(&mut self, std_dev: f64) -> Result<f64, AnalysisError> {
        let normal = Normal::new(0.0, std_dev).map_err(|e| {
            AnalysisError::Noise(format!("standard deviation {}: {}", std_dev, e))
        })?;
        Ok(normal.sample(&mut self.rng))
    }
}

/// Noise source that always returns zero.
#[cfg(test)]
pub struct NoNoise;

#[cfg(test)]
impl NoiseSource for NoNoise {
    fn sample(&mut self, _std_dev: f64) -> Result<f64, AnalysisError> {
        Ok(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficTrend {
    Upward,
    Downward,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub month: u32,
    pub predicted_traffic: i64,
    pub lower_bound: i64,
    pub upper_bound: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficForecast {
    pub forecast: Vec<ForecastPoint>,
    pub trend: TrafficTrend,
    /// Monthly growth in percent.
    pub growth_rate: f64,
}

/// Compounds a health-derived monthly growth rate over the forecast horizon.
/// Only `predicted_traffic` carries noise; the bounds are deterministic.
pub fn forecast_traffic(
    report: &Value,
    config: &EngineConfig,
    noise: &mut dyn NoiseSource,
) -> Result<TrafficForecast, AnalysisError> {
    let health = SiteHealthView::from_report(report)?.score()?;
    let growth_rate = (health - 50.0) / 100.0;

    let mut forecast = Vec::with_capacity(config.forecast_months as usize);
    for month in 1..=config.forecast_months {
        let traffic = config.base_traffic * (1.0 + growth_rate).powi(month as i32);
        let jitter = noise.sample(traffic * config.noise_ratio)?;
        forecast.push(ForecastPoint {
            month,
            predicted_traffic: round_whole(traffic + jitter).max(0),
            lower_bound: round_whole(traffic * 0.8).max(0),
            upper_bound: round_whole(traffic * 1.2),
        });
    }

    let trend = if growth_rate > 0.0 {
        TrafficTrend::Upward
    } else {
        TrafficTrend::Downward
    };
    Ok(TrafficForecast {
        forecast,
        trend,
        growth_rate: round_to(growth_rate * 100.0, 2),
    })
}
