// Field access into the raw audit report
use crate::model::AnalysisError;
use serde_json::{Map, Value};

const SITE_HEALTH: &str = "siteHealth";
const TOP_ISSUES: &str = "topIssues";

/// Borrowed view over the `siteHealth` block.
///
/// Fields are read on demand so that each pass only fails on the fields it
/// actually uses.
pub struct SiteHealthView<'a> {
    block: &'a Map<String, Value>,
}

impl<'a> SiteHealthView<'a> {
    pub fn from_report(report: &'a Value) -> Result<Self, AnalysisError> {
        let report = as_report(report)?;
        let block = report
            .get(SITE_HEALTH)
            .ok_or_else(|| AnalysisError::MissingField(SITE_HEALTH.into()))?
            .as_object()
            .ok_or_else(|| AnalysisError::invalid(SITE_HEALTH, "an object"))?;
        Ok(Self { block })
    }

    pub fn score(&self) -> Result<f64, AnalysisError> {
        let path = field_path("score");
        self.field("score")?
            .as_f64()
            .ok_or_else(|| AnalysisError::invalid(path, "a number"))
    }

    pub fn errors(&self) -> Result<i64, AnalysisError> {
        self.count("errors")
    }

    pub fn warnings(&self) -> Result<i64, AnalysisError> {
        self.count("warnings")
    }

    pub fn notices(&self) -> Result<i64, AnalysisError> {
        self.count("notices")
    }

    pub fn crawled_pages(&self) -> Result<i64, AnalysisError> {
        self.count("crawledPages")
    }

    fn count(&self, key: &str) -> Result<i64, AnalysisError> {
        integer_value(self.field(key)?, &field_path(key))
    }

    fn field(&self, key: &str) -> Result<&'a Value, AnalysisError> {
        self.block
            .get(key)
            .ok_or_else(|| AnalysisError::MissingField(field_path(key)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopIssue {
    pub title: String,
    pub count: f64,
}

/// Reads `topIssues`; an absent list is treated as empty.
pub fn top_issues(report: &Value) -> Result<Vec<TopIssue>, AnalysisError> {
    let report = as_report(report)?;
    let Some(list) = report.get(TOP_ISSUES) else {
        return Ok(Vec::new());
    };
    let list = list
        .as_array()
        .ok_or_else(|| AnalysisError::invalid(TOP_ISSUES, "an array"))?;

    list.iter()
        .enumerate()
        .map(|(i, entry)| -> Result<TopIssue, AnalysisError> {
            let path = format!("{}[{}]", TOP_ISSUES, i);
            let entry = entry
                .as_object()
                .ok_or_else(|| AnalysisError::invalid(path.clone(), "an object"))?;
            let title = entry
                .get("title")
                .ok_or_else(|| AnalysisError::MissingField(format!("{}.title", path)))?
                .as_str()
                .ok_or_else(|| AnalysisError::invalid(format!("{}.title", path), "a string"))?;
            let count = entry
                .get("count")
                .ok_or_else(|| AnalysisError::MissingField(format!("{}.count", path)))?
                .as_f64()
                .ok_or_else(|| AnalysisError::invalid(format!("{}.count", path), "a number"))?;
            Ok(TopIssue {
                title: title.to_string(),
                count,
            })
        })
        .collect()
}

pub fn as_report(report: &Value) -> Result<&Map<String, Value>, AnalysisError> {
    report
        .as_object()
        .ok_or_else(|| AnalysisError::invalid("report", "an object"))
}

// 2^63, the first float above the i64 range
const I64_FLOAT_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Accepts JSON integers and floats without a fractional part, as long as
/// they fit in an `i64`.
pub fn integer_value(value: &Value, path: &str) -> Result<i64, AnalysisError> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && (-I64_FLOAT_LIMIT..I64_FLOAT_LIMIT).contains(&f) => {
            Ok(f as i64)
        }
        _ => Err(AnalysisError::invalid(path, "an integer")),
    }
}

fn field_path(key: &str) -> String {
    format!("{}.{}", SITE_HEALTH, key)
}
