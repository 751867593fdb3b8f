//! Core data types flowing through the pipeline.

use serde::{Deserialize, Serialize};

/// Status of a lab result relative to its reference range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// Below the reference range.
    Low,
    /// Within the reference range (endpoints included).
    Normal,
    /// Above the reference range.
    High,
    /// Not yet resolved.
    Unknown,
}

impl TestStatus {
    /// Parse one of the three status words, case-insensitively.
    ///
    /// Anything else (including "unknown") yields `None`.
    pub fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "low" => Some(TestStatus::Low),
            "normal" => Some(TestStatus::Normal),
            "high" => Some(TestStatus::High),
            _ => None,
        }
    }

    /// Lowercase label, as used in summaries and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Low => "low",
            TestStatus::Normal => "normal",
            TestStatus::High => "high",
            TestStatus::Unknown => "unknown",
        }
    }

    /// Capitalized label ("Low", "Normal", ...).
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Low => "Low",
            TestStatus::Normal => "Normal",
            TestStatus::High => "High",
            TestStatus::Unknown => "Unknown",
        }
    }

    /// Whether the status is one of low/normal/high.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, TestStatus::Unknown)
    }

    /// Whether the result falls outside its reference range.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, TestStatus::Low | TestStatus::High)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinically normal interval for a test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefRange {
    pub low: f64,
    pub high: f64,
}

impl RefRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Classify a value against the range. Both endpoints count as normal.
    pub fn classify(&self, value: f64) -> TestStatus {
        if value < self.low {
            TestStatus::Low
        } else if value > self.high {
            TestStatus::High
        } else {
            TestStatus::Normal
        }
    }
}

/// A parsed but not yet normalized test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTest {
    /// Lowercased name as it appeared in the input.
    pub name: String,
    /// Finite measured value.
    pub value: f64,
    /// Raw unit token, possibly empty.
    pub unit: String,
    pub status: TestStatus,
}

impl CandidateTest {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            status,
        }
    }

    /// Structural identity used for deduplication: `name-value-unit`.
    pub fn dedupe_key(&self) -> String {
        format!("{}-{}-{}", self.name, self.value, self.unit)
    }
}

/// A test after alias resolution, unit canonicalization and status resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTest {
    /// Canonical name in display casing (e.g. "Hemoglobin", "WBC").
    pub name: String,
    pub value: f64,
    /// Canonical unit, or the literal "unknown".
    #[serde(default)]
    pub unit: String,
    pub status: TestStatus,
    /// Reference range, `None` when the name has no catalog entry.
    #[serde(default)]
    pub ref_range: Option<RefRange>,
}
