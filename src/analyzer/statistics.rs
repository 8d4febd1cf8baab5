use crate::model::AnalysisError;
use crate::parser::SiteHealthView;
use crate::scoring::round_to;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticalInsights {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: i64,
    pub max: i64,
    pub range: i64,
    /// `None` when the sample has no spread.
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
}

/// Descriptive statistics over the error, warning and notice counts.
pub fn issue_count_statistics(report: &Value) -> Result<StatisticalInsights, AnalysisError> {
    let site = SiteHealthView::from_report(report)?;
    let counts = [site.errors()?, site.warnings()?, site.notices()?];
    describe(&counts)
}

/// Population statistics of a non-empty sample. Skewness is the biased
/// moment ratio and kurtosis is Fisher's excess kurtosis.
pub fn describe(values: &[i64]) -> Result<StatisticalInsights, AnalysisError> {
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return Err(AnalysisError::EmptySample);
    };

    let samples: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let central_moment =
        |power: i32| samples.iter().map(|v| (v - mean).powi(power)).sum::<f64>() / count;

    let variance = central_moment(2);
    let (skewness, kurtosis) = if variance > 0.0 {
        (
            Some(round_to(central_moment(3) / variance.powf(1.5), 2)),
            Some(round_to(central_moment(4) / variance.powi(2) - 3.0, 2)),
        )
    } else {
        (None, None)
    };

    Ok(StatisticalInsights {
        mean: round_to(mean, 2),
        median: round_to(median(&samples), 2),
        std_dev: round_to(variance.sqrt(), 2),
        variance: round_to(variance, 2),
        min,
        max,
        range: max.saturating_sub(min),
        skewness,
        kurtosis,
    })
}

fn median(samples: &[f64]) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn describes_issue_counts() {
        let report = json!({"siteHealth": {"errors": 10, "warnings": 5, "notices": 3}});
        let stats = issue_count_statistics(&report).unwrap();
        assert_eq!(stats.mean, 6.0);
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.min, 3);
        assert_eq!(stats.max, 10);
        assert_eq!(stats.range, 7);
        assert_eq!(stats.variance, 8.67);
        assert_eq!(stats.std_dev, 2.94);
        assert_eq!(stats.skewness, Some(0.47));
        assert_eq!(stats.kurtosis, Some(-1.5));
    }

    #[test]
    fn constant_sample_has_no_shape_statistics() {
        let stats = describe(&[4, 4, 4]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.skewness, None);
        assert_eq!(stats.kurtosis, None);
        assert!(serde_json::to_value(&stats).unwrap()["skewness"].is_null());
    }

    #[test]
    fn even_sample_median_averages_middle_pair() {
        let stats = describe(&[1, 7, 3, 4]).unwrap();
        assert_eq!(stats.median, 3.5);
        assert_eq!(stats.range, 6);
    }

    #[test]
    fn extreme_counts_do_not_overflow_range() {
        let stats = describe(&[i64::MIN, 0, i64::MAX]).unwrap();
        assert_eq!(stats.range, i64::MAX);
        assert_eq!(stats.median, 0.0);
    }

    #[test]
    fn empty_sample_is_an_error() {
        assert!(matches!(describe(&[]), Err(AnalysisError::EmptySample)));
    }

    #[test]
    fn requires_notices() {
        let report = json!({"siteHealth": {"errors": 1, "warnings": 2}});
        assert_eq!(
            issue_count_statistics(&report).unwrap_err().to_string(),
            "missing field `siteHealth.notices`"
        );
    }
}
