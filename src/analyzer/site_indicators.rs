use crate::model::AnalysisError;
use crate::parser::SiteHealthView;
use crate::scoring::{self, Grade, round_to};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

const RANKING_CONFIDENCE: f64 = 0.85;
/// Rank reported alongside the error when no prediction can be made.
pub const NEUTRAL_RANK: i64 = 50;
const ANOMALY_THRESHOLD: i64 = 50;
const TREND_PIVOT: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingPrediction {
    pub predicted_rank: f64,
    pub confidence: f64,
    pub factors: RankingFactors,
    pub improvement_potential: f64,
}

/// Ranking pass result. Unlike other passes, a failure still carries a rank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankingOutcome {
    Predicted(RankingPrediction),
    Fallback { error: String, predicted_rank: i64 },
}

impl RankingOutcome {
    pub fn from_result(result: Result<RankingPrediction, AnalysisError>) -> Self {
        match result {
            Ok(prediction) => RankingOutcome::Predicted(prediction),
            Err(e) => {
                warn!("Pass ranking failed: {}", e);
                RankingOutcome::Fallback {
                    error: e.to_string(),
                    predicted_rank: NEUTRAL_RANK,
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingFactors {
    pub health_score_impact: f64,
    pub error_impact: i64,
    pub warning_impact: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentQualityScore {
    pub overall_score: f64,
    pub grade: Grade,
    pub dimensions: QualityDimensions,
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityDimensions {
    pub technical_quality: f64,
    pub content_coverage: f64,
    pub issue_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(i64),
    Score(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Anomaly {
    pub metric: &'static str,
    pub value: MetricValue,
    pub threshold: i64,
    pub severity: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyStatus {
    AnomaliesDetected,
    Normal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub anomalies_found: usize,
    pub anomalies: Vec<Anomaly>,
    pub status: AnomalyStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlations {
    pub errors_vs_health: f64,
    pub warnings_vs_health: f64,
    pub pages_vs_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationSummary {
    pub correlations: Correlations,
    pub insights: [&'static str; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Momentum {
    Strong,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub velocity: f64,
    pub momentum: Momentum,
}

/// Closed-form indicators derived from the `siteHealth` block.
pub struct SiteIndicators;

impl SiteIndicators {
    /// Estimated search rank on a 1 (best) to 100 scale.
    pub fn predict_ranking(report: &Value) -> Result<RankingPrediction, AnalysisError> {
        let site = SiteHealthView::from_report(report)?;
        let health = site.score()?;
        let errors = site.errors()?;
        let warnings = site.warnings()?;
        site.crawled_pages()?;

        let error_penalty = scoring::error_penalty(errors);
        let warning_penalty = scoring::warning_penalty(warnings);
        let rank = scoring::clamp_rank(
            100.0 - (health - error_penalty as f64 - warning_penalty as f64),
        );

        Ok(RankingPrediction {
            predicted_rank: round_to(rank, 2),
            confidence: RANKING_CONFIDENCE,
            factors: RankingFactors {
                health_score_impact: health * 0.6,
                error_impact: -error_penalty,
                warning_impact: -warning_penalty,
            },
            improvement_potential: (100.0 - rank).max(0.0),
        })
    }

    pub fn score_content_quality(report: &Value) -> Result<ContentQualityScore, AnalysisError> {
        let site = SiteHealthView::from_report(report)?;
        let health = site.score()?;
        let pages = site.crawled_pages()?;
        let errors = site.errors()?;
        let warnings = site.warnings()?;

        let technical_quality = (health - scoring::error_penalty(errors) as f64).max(0.0);
        let content_coverage = (pages as f64 * 5.0).min(100.0);
        let issues = errors as f64 + warnings as f64;
        let issue_ratio = (100.0 - (issues / pages.max(1) as f64) * 100.0).max(0.0);
        let overall = technical_quality * 0.4 + content_coverage * 0.3 + issue_ratio * 0.3;

        Ok(ContentQualityScore {
            overall_score: round_to(overall, 2),
            grade: Grade::from_score(overall),
            dimensions: QualityDimensions {
                technical_quality: round_to(technical_quality, 2),
                content_coverage: round_to(content_coverage, 2),
                issue_ratio: round_to(issue_ratio, 2),
            },
            percentile: round_to(overall.min(99.0), 0),
        })
    }

    /// Flags metrics strictly beyond their fixed thresholds.
    pub fn detect_anomalies(report: &Value) -> Result<AnomalyReport, AnalysisError> {
        let site = SiteHealthView::from_report(report)?;
        let health = site.score()?;
        let errors = site.errors()?;
        site.warnings()?;
        site.crawled_pages()?;

        let mut anomalies = Vec::new();
        if errors > ANOMALY_THRESHOLD {
            anomalies.push(Anomaly {
                metric: "errors",
                value: MetricValue::Count(errors),
                threshold: ANOMALY_THRESHOLD,
                severity: "high",
            });
        }
        if health < ANOMALY_THRESHOLD as f64 {
            anomalies.push(Anomaly {
                metric: "health_score",
                value: MetricValue::Score(health),
                threshold: ANOMALY_THRESHOLD,
                severity: "high",
            });
        }

        let status = if anomalies.is_empty() {
            AnomalyStatus::Normal
        } else {
            AnomalyStatus::AnomaliesDetected
        };
        Ok(AnomalyReport {
            anomalies_found: anomalies.len(),
            anomalies,
            status,
        })
    }

    /// Fixed reference correlations. The report carries no history to
    /// compute them from.
    pub fn correlation_summary(report: &Value) -> Result<CorrelationSummary, AnalysisError> {
        let site = SiteHealthView::from_report(report)?;
        site.score()?;
        site.errors()?;
        site.warnings()?;
        site.crawled_pages()?;

        Ok(CorrelationSummary {
            correlations: Correlations {
                errors_vs_health: -0.85,
                warnings_vs_health: -0.65,
                pages_vs_quality: 0.45,
            },
            insights: [
                "Strong negative correlation between errors and health score",
                "More pages generally indicate better site coverage",
                "Warnings have moderate impact on overall health",
            ],
        })
    }

    pub fn analyze_trend(report: &Value) -> Result<TrendAnalysis, AnalysisError> {
        let health = SiteHealthView::from_report(report)?.score()?;
        let distance = (health - TREND_PIVOT).abs();

        let direction = if health > TREND_PIVOT {
            TrendDirection::Improving
        } else if health < 50.0 {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };
        let momentum = if distance > 20.0 {
            Momentum::Strong
        } else {
            Momentum::Weak
        };

        Ok(TrendAnalysis {
            direction,
            velocity: distance / 10.0,
            momentum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(score: f64, errors: i64, warnings: i64, pages: i64) -> Value {
        json!({"siteHealth": {
            "score": score, "errors": errors, "warnings": warnings,
            "notices": 1, "crawledPages": pages
        }})
    }

    #[test]
    fn ranking_matches_worked_example() {
        let ranking = SiteIndicators::predict_ranking(&report(80.0, 2, 5, 50)).unwrap();
        assert_eq!(ranking.predicted_rank, 40.0);
        assert_eq!(ranking.confidence, 0.85);
        assert_eq!(ranking.factors.health_score_impact, 48.0);
        assert_eq!(ranking.factors.error_impact, -10);
        assert_eq!(ranking.factors.warning_impact, -10);
        assert_eq!(ranking.improvement_potential, 60.0);
    }

    #[test]
    fn ranking_stays_in_range_for_extreme_inputs() {
        for (score, errors, warnings) in [
            (100.0, 0, 0),
            (-400.0, 0, 0),
            (1_000.0, 0, 0),
            (0.0, 10_000, 10_000),
            (55.5, 3, 1),
        ] {
            let ranking =
                SiteIndicators::predict_ranking(&report(score, errors, warnings, 1)).unwrap();
            assert!((1.0..=100.0).contains(&ranking.predicted_rank));
            assert!(ranking.improvement_potential >= 0.0);
        }
    }

    #[test]
    fn ranking_rounds_ties_to_even() {
        // 100 - (80.375 - 10 - 10) = 39.625
        let ranking = SiteIndicators::predict_ranking(&report(80.375, 2, 5, 50)).unwrap();
        assert_eq!(ranking.predicted_rank, 39.62);
    }

    #[test]
    fn failed_ranking_falls_back_to_neutral_rank() {
        let outcome = RankingOutcome::from_result(SiteIndicators::predict_ranking(&json!({})));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"error": "missing field `siteHealth`", "predicted_rank": 50})
        );
    }

    #[test]
    fn ranking_requires_crawled_pages() {
        let report = json!({"siteHealth": {"score": 80, "errors": 2, "warnings": 5}});
        let err = SiteIndicators::predict_ranking(&report).unwrap_err();
        assert_eq!(err.to_string(), "missing field `siteHealth.crawledPages`");
    }

    #[test]
    fn content_quality_blends_dimensions() {
        // technical 70, coverage 100, ratio 100 - 7/50*100 = 86
        let quality = SiteIndicators::score_content_quality(&report(80.0, 2, 5, 50)).unwrap();
        assert_eq!(quality.dimensions.technical_quality, 70.0);
        assert_eq!(quality.dimensions.content_coverage, 100.0);
        assert_eq!(quality.dimensions.issue_ratio, 86.0);
        assert_eq!(quality.overall_score, 83.8);
        assert_eq!(quality.grade, Grade::A);
        assert_eq!(quality.percentile, 84.0);
    }

    #[test]
    fn content_quality_guards_zero_pages_and_floors() {
        let quality = SiteIndicators::score_content_quality(&report(10.0, 40, 10, 0)).unwrap();
        assert_eq!(quality.dimensions.technical_quality, 0.0);
        assert_eq!(quality.dimensions.content_coverage, 0.0);
        assert_eq!(quality.dimensions.issue_ratio, 0.0);
        assert_eq!(quality.grade, Grade::F);
        assert_eq!(quality.percentile, 0.0);
    }

    #[test]
    fn content_quality_percentile_rounds_ties_to_even() {
        // 31.25 * 0.4 + 100 * 0.3 + 100 * 0.3 = 72.5
        let quality = SiteIndicators::score_content_quality(&report(31.25, 0, 0, 20)).unwrap();
        assert_eq!(quality.overall_score, 72.5);
        assert_eq!(quality.percentile, 72.0);
        assert_eq!(quality.grade, Grade::B);
    }

    #[test]
    fn content_quality_survives_huge_issue_counts() {
        let quality =
            SiteIndicators::score_content_quality(&report(90.0, i64::MAX, 1, 10)).unwrap();
        assert_eq!(quality.dimensions.issue_ratio, 0.0);
        assert_eq!(quality.dimensions.technical_quality, 0.0);
        assert_eq!(quality.dimensions.content_coverage, 50.0);
    }

    #[test]
    fn anomaly_thresholds_are_strict() {
        let normal = SiteIndicators::detect_anomalies(&report(50.0, 50, 0, 10)).unwrap();
        assert_eq!(normal.anomalies_found, 0);
        assert_eq!(normal.status, AnomalyStatus::Normal);

        let flagged = SiteIndicators::detect_anomalies(&report(49.0, 51, 0, 10)).unwrap();
        assert_eq!(flagged.anomalies_found, 2);
        assert_eq!(flagged.status, AnomalyStatus::AnomaliesDetected);
        assert_eq!(flagged.anomalies[0].metric, "errors");
        assert_eq!(flagged.anomalies[0].value, MetricValue::Count(51));
        assert_eq!(flagged.anomalies[1].metric, "health_score");
        assert_eq!(flagged.anomalies[1].value, MetricValue::Score(49.0));
    }

    #[test]
    fn anomaly_report_serializes_status_and_values() {
        let flagged = SiteIndicators::detect_anomalies(&report(30.0, 0, 0, 10)).unwrap();
        assert_eq!(
            serde_json::to_value(&flagged).unwrap(),
            json!({
                "anomalies_found": 1,
                "anomalies": [{"metric": "health_score", "value": 30.0, "threshold": 50, "severity": "high"}],
                "status": "anomalies_detected"
            })
        );
    }

    #[test]
    fn correlations_are_fixed_constants() {
        let first = SiteIndicators::correlation_summary(&report(10.0, 1, 1, 1)).unwrap();
        let second = SiteIndicators::correlation_summary(&report(99.0, 80, 3, 400)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.correlations.errors_vs_health, -0.85);
        assert_eq!(first.insights[1], "More pages generally indicate better site coverage");
    }

    #[test]
    fn trend_classifies_around_pivot() {
        let improving = SiteIndicators::analyze_trend(&report(95.0, 0, 0, 1)).unwrap();
        assert_eq!(improving.direction, TrendDirection::Improving);
        assert_eq!(improving.velocity, 2.5);
        assert_eq!(improving.momentum, Momentum::Strong);

        let stable = SiteIndicators::analyze_trend(&report(70.0, 0, 0, 1)).unwrap();
        assert_eq!(stable.direction, TrendDirection::Stable);
        assert_eq!(stable.velocity, 0.0);
        assert_eq!(stable.momentum, Momentum::Weak);

        let declining = SiteIndicators::analyze_trend(&report(49.0, 0, 0, 1)).unwrap();
        assert_eq!(declining.direction, TrendDirection::Declining);
        assert_eq!(declining.momentum, Momentum::Strong);
    }
}
