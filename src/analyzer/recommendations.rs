use crate::model::AnalysisError;
use crate::parser::SiteHealthView;
use crate::scoring::round_to;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub priority: u8,
    pub action: &'static str,
    pub expected_impact: &'static str,
    pub estimated_improvement: f64,
}

/// Rule-based recommendations in evaluation order (not sorted by priority).
pub fn generate_recommendations(report: &Value) -> Result<Vec<Recommendation>, AnalysisError> {
    let site = SiteHealthView::from_report(report)?;
    let health = site.score()?;
    let errors = site.errors()?;
    let warnings = site.warnings()?;

    let mut recommendations = Vec::new();
    if errors > 10 {
        recommendations.push(Recommendation {
            priority: 1,
            action: "Fix critical errors immediately",
            expected_impact: "High",
            estimated_improvement: round_to(errors as f64 * 0.5, 1),
        });
    }
    if warnings > 20 {
        recommendations.push(Recommendation {
            priority: 2,
            action: "Address warning-level issues",
            expected_impact: "Medium",
            estimated_improvement: round_to(warnings as f64 * 0.2, 1),
        });
    }
    if health < 70.0 {
        recommendations.push(Recommendation {
            priority: 1,
            action: "Improve overall site health",
            expected_impact: "High",
            estimated_improvement: round_to((70.0 - health) * 0.7, 1),
        });
    }
    Ok(recommendations)
}
