use crate::model::{AnalysisError, IssueCategory, IssueRecord};
use crate::parser::audit_parser::{as_report, integer_value};
use serde_json::{Map, Value};

const DEFAULT_SEVERITY: &str = "low";

/// Collects issue records from the `errors`, `warnings` and `notices`
/// mappings, in category order and then input order.
pub fn normalize_all(report: &Value) -> Result<Vec<IssueRecord>, AnalysisError> {
    let report = as_report(report)?;
    let mut issues = Vec::new();

    for category in IssueCategory::ALL {
        let mapping = match report.get(category.key()) {
            None => continue,
            Some(Value::Object(map)) => map,
            Some(_) => return Err(AnalysisError::invalid(category.key(), "an object")),
        };
        normalize_category(category, mapping, &mut issues)?;
    }

    Ok(issues)
}

fn normalize_category(
    category: IssueCategory,
    mapping: &Map<String, Value>,
    issues: &mut Vec<IssueRecord>,
) -> Result<(), AnalysisError> {
    for (key, entry) in mapping {
        // Plain counters (`{"missing_alt": 3}`) carry no issue record.
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let Some(count) = entry.get("count") else {
            continue;
        };
        let path = format!("{}.{}", category.key(), key);
        let count = integer_value(count, &format!("{}.count", path))?;
        let name = optional_str(entry, "type", &path)?.unwrap_or(key.as_str());
        let severity = optional_str(entry, "severity", &path)?.unwrap_or(DEFAULT_SEVERITY);

        issues.push(IssueRecord {
            name: name.to_string(),
            count,
            severity: severity.to_string(),
            category,
        });
    }
    Ok(())
}

fn optional_str<'a>(
    entry: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>, AnalysisError> {
    match entry.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(AnalysisError::invalid(
            format!("{}.{}", path, key),
            "a string",
        )),
    }
}
