use crate::model::AnalysisError;
use crate::parser::audit_parser::top_issues;
use serde::Serialize;
use serde_json::Value;

const MIN_ISSUES: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueClusters {
    pub critical: Vec<String>,
    pub moderate: Vec<String>,
    pub minor: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClusterAnalysis {
    Clustered {
        clusters: IssueClusters,
        cluster_count: usize,
        interpretation: &'static str,
    },
    InsufficientData {
        message: &'static str,
    },
}

/// Buckets top issues by occurrence count: critical above 10, moderate
/// above 5, minor otherwise.
pub fn cluster_top_issues(report: &Value) -> Result<ClusterAnalysis, AnalysisError> {
    let issues = top_issues(report)?;
    if issues.len() < MIN_ISSUES {
        return Ok(ClusterAnalysis::InsufficientData {
            message: "Not enough data for clustering",
        });
    }

    let mut clusters = IssueClusters::default();
    for issue in issues {
        let bucket = if issue.count > 10.0 {
            &mut clusters.critical
        } else if issue.count > 5.0 {
            &mut clusters.moderate
        } else {
            &mut clusters.minor
        };
        bucket.push(issue.title);
    }

    Ok(ClusterAnalysis::Clustered {
        clusters,
        cluster_count: 3,
        interpretation: "Issues grouped by severity and frequency",
    })
}
