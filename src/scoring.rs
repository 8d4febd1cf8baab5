// Shared scoring formulas
use serde::Serialize;

/// Rounds `value` to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Rounds to the nearest whole number, ties to even.
pub fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

pub fn error_penalty(errors: i64) -> i64 {
    errors.saturating_mul(5)
}

pub fn warning_penalty(warnings: i64) -> i64 {
    warnings.saturating_mul(2)
}

/// Keeps a rank inside the 1..=100 scale.
pub fn clamp_rank(rank: f64) -> f64 {
    rank.max(1.0).min(100.0)
}

/// Weight of a severity label; unknown labels weigh like a warning.
pub fn severity_weight(severity: &str) -> f64 {
    match severity {
        "critical" => 100.0,
        "high" => 75.0,
        "error" => 70.0,
        "medium" => 50.0,
        "warning" => 30.0,
        "low" => 10.0,
        "notice" => 5.0,
        _ => 30.0,
    }
}

pub fn frequency_score(count: i64) -> f64 {
    (count as f64 * 10.0).min(100.0)
}

/// Blended severity/frequency score in 0..=100.
pub fn priority_score(severity: &str, count: i64) -> f64 {
    round_to(
        severity_weight(severity) * 0.6 + frequency_score(count) * 0.4,
        2,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn from_priority(score: f64) -> Self {
        if score > 70.0 {
            Impact::High
        } else if score > 40.0 {
            Impact::Medium
        } else {
            Impact::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::APlus,
            s if s >= 80.0 => Grade::A,
            s if s >= 70.0 => Grade::B,
            s if s >= 60.0 => Grade::C,
            s if s >= 50.0 => Grade::D,
            _ => Grade::F,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_handles_two_and_zero_places() {
        assert_eq!(round_to(8.666_666, 2), 8.67);
        assert_eq!(round_to(-1.499_9, 2), -1.5);
        assert_eq!(round_to(72.4, 0), 72.0);
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(round_to(72.5, 0), 72.0);
        assert_eq!(round_to(73.5, 0), 74.0);
        assert_eq!(round_to(39.625, 2), 39.62);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_whole(12.5), 12);
        assert_eq!(round_whole(13.5), 14);
        assert_eq!(round_whole(-2.5), -2);
    }

    #[test]
    fn clamp_rank_bounds_both_sides() {
        assert_eq!(clamp_rank(-500.0), 1.0);
        assert_eq!(clamp_rank(40.0), 40.0);
        assert_eq!(clamp_rank(250.0), 100.0);
    }

    #[test]
    fn unknown_severity_defaults_to_thirty() {
        assert_eq!(severity_weight("blocker"), 30.0);
        assert_eq!(severity_weight("notice"), 5.0);
    }

    #[test]
    fn priority_score_blends_severity_and_frequency() {
        // 100 * 0.6 + min(100, 3 * 10) * 0.4
        assert_eq!(priority_score("critical", 3), 72.0);
        assert_eq!(priority_score("low", 50), 46.0);
        assert_eq!(Impact::from_priority(72.0), Impact::High);
        assert_eq!(Impact::from_priority(70.0), Impact::Medium);
        assert_eq!(Impact::from_priority(40.0), Impact::Low);
    }

    #[test]
    fn grade_bands_are_monotonic() {
        assert_eq!(Grade::from_score(95.0), Grade::APlus);
        assert_eq!(Grade::from_score(90.0), Grade::APlus);
        assert_eq!(Grade::from_score(89.99), Grade::A);
        assert_eq!(Grade::from_score(70.0), Grade::B);
        assert_eq!(Grade::from_score(60.0), Grade::C);
        assert_eq!(Grade::from_score(50.0), Grade::D);
        assert_eq!(Grade::from_score(-3.0), Grade::F);

        let mut previous = Grade::from_score(120.0);
        for step in (0..=1200).rev() {
            let grade = Grade::from_score(step as f64 / 10.0);
            assert!(grade >= previous);
            previous = grade;
        }
    }
}
