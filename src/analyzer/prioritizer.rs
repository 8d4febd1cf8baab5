use crate::model::{AnalysisError, IssueRecord};
use crate::normalizer::normalize_all;
use crate::scoring::{Impact, priority_score};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrioritizedIssue {
    #[serde(flatten)]
    pub issue: IssueRecord,
    pub priority_score: f64,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssuePrioritization {
    pub prioritized_issues: Vec<PrioritizedIssue>,
    pub total_issues: usize,
    pub high_priority_count: usize,
}

/// Ranks every categorized issue by priority score, highest first.
///
/// The sort is stable: issues with equal scores keep their scan order
/// (errors, then warnings, then notices; input order within a category).
/// `total_issues` and `high_priority_count` cover the full set, only the
/// returned list is truncated to `limit`.
pub fn prioritize_issues(
    report: &Value,
    limit: usize,
) -> Result<IssuePrioritization, AnalysisError> {
    let mut issues: Vec<PrioritizedIssue> = normalize_all(report)?
        .into_iter()
        .map(|issue| {
            let score = priority_score(&issue.severity, issue.count);
            PrioritizedIssue {
                issue,
                priority_score: score,
                impact: Impact::from_priority(score),
            }
        })
        .collect();

    issues.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));

    let total_issues = issues.len();
    let high_priority_count = issues
        .iter()
        .filter(|i| i.impact == Impact::High)
        .count();
    issues.truncate(limit);

    Ok(IssuePrioritization {
        prioritized_issues: issues,
        total_issues,
        high_priority_count,
    })
}
