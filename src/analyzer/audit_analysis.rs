use crate::analyzer::clustering::{ClusterAnalysis, cluster_top_issues};
use crate::analyzer::forecast::{NoiseSource, TrafficForecast, forecast_traffic};
use crate::analyzer::prioritizer::{IssuePrioritization, prioritize_issues};
use crate::analyzer::recommendations::{Recommendation, generate_recommendations};
use crate::analyzer::site_indicators::{
    AnomalyReport, ContentQualityScore, CorrelationSummary, RankingPrediction, SiteIndicators,
    TrendAnalysis,
};
use crate::analyzer::statistics::{StatisticalInsights, issue_count_statistics};
use crate::config::EngineConfig;
use crate::model::AnalysisError;
use serde_json::Value;

/// Trait defining the interface for an audit report analyzer.
///
/// Every pass reads the raw report independently and never calls another
/// pass, so one malformed field only fails the passes that depend on it.
pub trait Analyzer {
    fn predict_ranking(&self, report: &Value) -> Result<RankingPrediction, AnalysisError>;
    /// Needs `&mut self` because it draws from the noise source.
    fn forecast_traffic(&mut self, report: &Value) -> Result<TrafficForecast, AnalysisError>;
    fn prioritize_issues(&self, report: &Value) -> Result<IssuePrioritization, AnalysisError>;
    fn score_content_quality(&self, report: &Value)
    -> Result<ContentQualityScore, AnalysisError>;
    fn detect_anomalies(&self, report: &Value) -> Result<AnomalyReport, AnalysisError>;
    fn cluster_issues(&self, report: &Value) -> Result<ClusterAnalysis, AnalysisError>;
    fn statistical_analysis(&self, report: &Value)
    -> Result<StatisticalInsights, AnalysisError>;
    fn correlation_analysis(&self, report: &Value) -> Result<CorrelationSummary, AnalysisError>;
    fn analyze_trends(&self, report: &Value) -> Result<TrendAnalysis, AnalysisError>;
    fn recommendations(&self, report: &Value) -> Result<Vec<Recommendation>, AnalysisError>;
}

/// Implementation of the audit analyzer.
pub struct AnalyzerImpl<N: NoiseSource> {
    config: EngineConfig,
    noise: N,
}

impl<N: NoiseSource> AnalyzerImpl<N> {
    pub fn new(config: EngineConfig, noise: N) -> Self {
        Self { config, noise }
    }
}

impl<N: NoiseSource> Analyzer for AnalyzerImpl<N> {
    fn predict_ranking(&self, report: &Value) -> Result<RankingPrediction, AnalysisError> {
        SiteIndicators::predict_ranking(report)
    }

    fn forecast_traffic(&mut self, report: &Value) -> Result<TrafficForecast, AnalysisError> {
        forecast_traffic(report, &self.config, &mut self.noise)
    }

    fn prioritize_issues(&self, report: &Value) -> Result<IssuePrioritization, AnalysisError> {
        prioritize_issues(report, self.config.max_prioritized_issues)
    }

    fn score_content_quality(
        &self,
        report: &Value,
    ) -> Result<ContentQualityScore, AnalysisError> {
        SiteIndicators::score_content_quality(report)
    }

    fn detect_anomalies(&self, report: &Value) -> Result<AnomalyReport, AnalysisError> {
        SiteIndicators::detect_anomalies(report)
    }

    fn cluster_issues(&self, report: &Value) -> Result<ClusterAnalysis, AnalysisError> {
        cluster_top_issues(report)
    }

    fn statistical_analysis(
        &self,
        report: &Value,
    ) -> Result<StatisticalInsights, AnalysisError> {
        issue_count_statistics(report)
    }

    fn correlation_analysis(&self, report: &Value) -> Result<CorrelationSummary, AnalysisError> {
        SiteIndicators::correlation_summary(report)
    }

    fn analyze_trends(&self, report: &Value) -> Result<TrendAnalysis, AnalysisError> {
        SiteIndicators::analyze_trend(report)
    }

    fn recommendations(&self, report: &Value) -> Result<Vec<Recommendation>, AnalysisError> {
        generate_recommendations(report)
    }
}
