//! Runs either every analysis pass or one named pass over a single input.

use crate::analyzer::Analyzer;
use crate::analyzer::clustering::ClusterAnalysis;
use crate::analyzer::forecast::TrafficForecast;
use crate::analyzer::prioritizer::IssuePrioritization;
use crate::analyzer::recommendations::Recommendation;
use crate::analyzer::site_indicators::{
    AnomalyReport, ContentQualityScore, CorrelationSummary, RankingOutcome, TrendAnalysis,
};
use crate::analyzer::statistics::StatisticalInsights;
use crate::model::Fragment;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Actions accepted in single-action mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PredictRanking,
    ForecastTraffic,
    ClassifyIssues,
    ScoreContent,
    DetectAnomalies,
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "predict_ranking" => Ok(Action::PredictRanking),
            "forecast_traffic" => Ok(Action::ForecastTraffic),
            "classify_issues" => Ok(Action::ClassifyIssues),
            "score_content" => Ok(Action::ScoreContent),
            "detect_anomalies" => Ok(Action::DetectAnomalies),
            _ => Err(()),
        }
    }
}

/// Composite result of full mode. Field order is the output key order.
#[derive(Debug, Serialize)]
pub struct CompleteAnalysis {
    pub ranking_prediction: RankingOutcome,
    pub traffic_forecast: Fragment<TrafficForecast>,
    pub issue_prioritization: Fragment<IssuePrioritization>,
    pub content_quality_score: Fragment<ContentQualityScore>,
    pub anomaly_detection: Fragment<AnomalyReport>,
    pub cluster_analysis: Fragment<ClusterAnalysis>,
    pub statistical_insights: Fragment<StatisticalInsights>,
    pub correlation_matrix: Fragment<CorrelationSummary>,
    pub trend_analysis: Fragment<TrendAnalysis>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutput {
    Complete(Box<CompleteAnalysis>),
    Ranking(RankingOutcome),
    Forecast(Fragment<TrafficForecast>),
    Issues(Fragment<IssuePrioritization>),
    Content(Fragment<ContentQualityScore>),
    Anomalies(Fragment<AnomalyReport>),
    Rejected { error: String },
}

/// Selects the mode from the presence of an `action` key.
pub fn dispatch<A: Analyzer>(analyzer: &mut A, input: &Value) -> AnalysisOutput {
    match input.as_object().and_then(|obj| obj.get("action")) {
        Some(action) => {
            let empty = Value::Object(Map::new());
            let data = input.get("data").unwrap_or(&empty);
            run_action(analyzer, action, data)
        }
        None => AnalysisOutput::Complete(Box::new(analyze_complete(analyzer, input))),
    }
}

pub fn analyze_complete<A: Analyzer>(analyzer: &mut A, report: &Value) -> CompleteAnalysis {
    info!("Running complete analysis...");
    let analysis = CompleteAnalysis {
        ranking_prediction: RankingOutcome::from_result(analyzer.predict_ranking(report)),
        traffic_forecast: Fragment::from_result("forecast", analyzer.forecast_traffic(report)),
        issue_prioritization: Fragment::from_result(
            "prioritization",
            analyzer.prioritize_issues(report),
        ),
        content_quality_score: Fragment::from_result(
            "content_quality",
            analyzer.score_content_quality(report),
        ),
        anomaly_detection: Fragment::from_result("anomalies", analyzer.detect_anomalies(report)),
        cluster_analysis: Fragment::from_result("clustering", analyzer.cluster_issues(report)),
        statistical_insights: Fragment::from_result(
            "statistics",
            analyzer.statistical_analysis(report),
        ),
        correlation_matrix: Fragment::from_result(
            "correlation",
            analyzer.correlation_analysis(report),
        ),
        trend_analysis: Fragment::from_result("trend", analyzer.analyze_trends(report)),
        // Recommendations degrade to an empty list instead of an error object.
        recommendations: analyzer.recommendations(report).unwrap_or_else(|e| {
            warn!("Pass recommendations failed: {}", e);
            Vec::new()
        }),
    };
    debug!("Complete analysis assembled");
    analysis
}

fn run_action<A: Analyzer>(analyzer: &mut A, action: &Value, data: &Value) -> AnalysisOutput {
    let name = match action {
        Value::String(s) => s.clone(),
        other => literal(other),
    };
    info!("Running action: {}", name);

    let Ok(action) = name.parse::<Action>() else {
        warn!("Unknown action: {}", name);
        return AnalysisOutput::Rejected {
            error: format!("Unknown action: {}", name),
        };
    };

    match action {
        Action::PredictRanking => {
            AnalysisOutput::Ranking(RankingOutcome::from_result(analyzer.predict_ranking(data)))
        }
        Action::ForecastTraffic => AnalysisOutput::Forecast(Fragment::from_result(
            "forecast",
            analyzer.forecast_traffic(data),
        )),
        Action::ClassifyIssues => AnalysisOutput::Issues(Fragment::from_result(
            "prioritization",
            analyzer.prioritize_issues(data),
        )),
        Action::ScoreContent => AnalysisOutput::Content(Fragment::from_result(
            "content_quality",
            analyzer.score_content_quality(data),
        )),
        Action::DetectAnomalies => AnalysisOutput::Anomalies(Fragment::from_result(
            "anomalies",
            analyzer.detect_anomalies(data),
        )),
    }
}

/// Renders a non-string action as a literal: `None`, `True`, `[1, 2]`,
/// `{'k': 'v'}`.
fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("'{}': {}", k, literal(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}
