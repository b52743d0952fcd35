//! Reliability scoring for literature sources
//!
//! Deterministic function of publication year and sample size:
//!
//! | age (years) | points |   | sample size | points |
//! |-------------|--------|---|-------------|--------|
//! | ≤ 5         | 3      |   | ≥ 1000      | 3      |
//! | ≤ 10        | 2      |   | ≥ 200       | 2      |
//! | ≤ 20        | 1      |   | ≥ 50        | 1      |
//! | older       | 0      |   | else/none   | 0      |
//!
//! Total ≥ 5 is `High`, ≥ 3 is `Moderate`, anything else `Low`.

use crate::Reliability;
use chrono::Datelike;

/// Age assigned when the publication year is unknown
pub const UNKNOWN_AGE: i32 = 999;

/// Total points needed for `High`
pub const HIGH_THRESHOLD: u8 = 5;

/// Total points needed for `Moderate`
pub const MODERATE_THRESHOLD: u8 = 3;

/// Outcome of scoring one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliabilityScore {
    /// Final grade
    pub reliability: Reliability,
    /// Points from recency
    pub recency_points: u8,
    /// Points from sample size
    pub size_points: u8,
    /// Human-readable explanation
    pub rationale: String,
}

impl ReliabilityScore {
    /// Sum of both point components
    pub fn total(&self) -> u8 {
        self.recency_points + self.size_points
    }
}

/// The current calendar year (local clock)
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Recency points for a publication year
///
/// Missing or zero years count as maximally old. Future years count as age 0.
pub fn recency_points(year: Option<i32>, current_year: i32) -> u8 {
    let age = match year {
        Some(y) if y != 0 => (current_year - y).max(0),
        _ => UNKNOWN_AGE,
    };
    match age {
        0..=5 => 3,
        6..=10 => 2,
        11..=20 => 1,
        _ => 0,
    }
}

/// Sample-size points
pub fn size_points(sample_size: Option<u64>) -> u8 {
    match sample_size {
        Some(n) if n >= 1000 => 3,
        Some(n) if n >= 200 => 2,
        Some(n) if n >= 50 => 1,
        _ => 0,
    }
}

/// Map a point total onto a grade
pub fn grade(total: u8) -> Reliability {
    if total >= HIGH_THRESHOLD {
        Reliability::High
    } else if total >= MODERATE_THRESHOLD {
        Reliability::Moderate
    } else {
        Reliability::Low
    }
}

/// Score a source against an explicit current year
pub fn score_reliability(
    year: Option<i32>,
    sample_size: Option<u64>,
    current_year: i32,
) -> ReliabilityScore {
    let recency = recency_points(year, current_year);
    let size = size_points(sample_size);

    let year_text = match year {
        Some(y) if y != 0 => y.to_string(),
        _ => "unknown".to_string(),
    };
    let n_text = match sample_size {
        Some(n) if n != 0 => n.to_string(),
        _ => "unknown".to_string(),
    };

    ReliabilityScore {
        reliability: grade(recency + size),
        recency_points: recency,
        size_points: size,
        rationale: format!(
            "Scored mainly by year ({}) and sample size (n={}).",
            year_text, n_text
        ),
    }
}

/// Score a source against the current calendar year
pub fn reliability_from_year_and_n(year: Option<i32>, sample_size: Option<u64>) -> ReliabilityScore {
    score_reliability(year, sample_size, current_year())
}
