//! Raw test string and record parser.

use once_cell::sync::Lazy;
use regex::Regex;

use super::record::{RawTestInput, RecordValue, StructuredRecord};
use crate::model::{CandidateTest, TestStatus};

/// Name run, numeric token, optional unit, optional parenthesized status.
///
/// The name group is greedy over letters and whitespace, so trailing words
/// before the number end up in the name.
static TEST_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([a-z\s]+)\s+([0-9.]+)\s*([a-z/%]*)\s*\(?\s*(low|high|normal)?\s*\)?")
        .expect("test line pattern is valid")
});

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Status given to inputs that carry no status word.
    ///
    /// `Normal` by default. Set to `Unknown` to let the normalizer derive
    /// the status from the reference range instead.
    pub missing_status: TestStatus,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            missing_status: TestStatus::Normal,
        }
    }
}

/// Turns raw test strings and loose records into candidate tests.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse one input. `None` means the input is noise and should be skipped.
    pub fn parse(&self, input: &RawTestInput) -> Option<CandidateTest> {
        let parsed = match input {
            RawTestInput::Text(line) => self.parse_line(line),
            RawTestInput::Record(record) => self.parse_record(record),
        };
        if parsed.is_none() {
            tracing::debug!(input = ?input, "Dropping unparseable test input");
        }
        parsed
    }

    /// Parse a batch, dropping inputs that yield nothing.
    pub fn parse_all(&self, inputs: &[RawTestInput]) -> Vec<CandidateTest> {
        inputs.iter().filter_map(|input| self.parse(input)).collect()
    }

    /// Parse a free-text line such as `"Hemoglobin 9.5 g/dL (low)"`.
    pub fn parse_line(&self, line: &str) -> Option<CandidateTest> {
        let caps = TEST_LINE.captures(line)?;

        let name = caps.get(1)?.as_str().trim().to_lowercase();
        if name.is_empty() {
            return None;
        }
        let value = parse_leading_number(caps.get(2)?.as_str())?;
        let unit = caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();
        let status = caps
            .get(4)
            .and_then(|m| TestStatus::parse(m.as_str()))
            .unwrap_or(self.config.missing_status);

        Some(CandidateTest::new(name, value, unit, status))
    }

    /// Accept a structured record directly.
    ///
    /// An unrecognized status word marks the record as unresolved.
    pub fn parse_record(&self, record: &StructuredRecord) -> Option<CandidateTest> {
        let name = record.name.to_lowercase();
        if name.trim().is_empty() {
            return None;
        }
        let value = match &record.value {
            RecordValue::Number(n) if n.is_finite() => *n,
            RecordValue::Number(_) => return None,
            RecordValue::Text(s) => parse_signed_number(s)?,
        };
        let unit = record.unit.clone().unwrap_or_default();
        let status = match record.status.as_deref().map(str::trim) {
            None | Some("") => self.config.missing_status,
            Some(word) => TestStatus::parse(word).unwrap_or(TestStatus::Unknown),
        };

        Some(CandidateTest::new(name, value, unit, status))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the longest numeric prefix of a digits-and-dots token.
///
/// `"9.5.1"` reads as 9.5; a token without digits (e.g. `"."`) is rejected.
pub(crate) fn parse_leading_number(token: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (i, ch) in token.char_indices() {
        match ch {
            '0'..='9' => {
                seen_digit = true;
                end = i + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    token[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient parse with an optional sign and surrounding whitespace.
fn parse_signed_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(text)),
    };
    parse_leading_number(rest).map(|v| sign * v)
}
