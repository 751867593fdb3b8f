//! Reference catalog of lab tests.
//!
//! A single ordered table maps each canonical test key (e.g. `"wbc"`) to
//! everything the pipeline knows about that test: aliases, reference range,
//! declared unit, display forms and explanation templates.
//!
//! Declaration order matters. Alias resolution and substring range lookup
//! both return the *first* matching entry, so an ordered map is used rather
//! than a hash map. Aliases are expected to be non-overlapping; where they do
//! overlap (e.g. the single-letter `"k"` alias of potassium), the earlier
//! entry wins.
//!
//! # Example
//!
//! ```
//! use labscribe::ReferenceCatalog;
//!
//! let catalog = ReferenceCatalog::shared();
//! assert_eq!(catalog.resolve_alias("hgb"), Some("hemoglobin"));
//! assert_eq!(catalog.find_range("wbc").map(|r| r.high), Some(11000.0));
//! ```

mod builtin;

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{LabscribeError, Result};
use crate::model::{RefRange, TestStatus};

static BUILTIN: Lazy<Arc<ReferenceCatalog>> = Lazy::new(|| Arc::new(builtin::catalog()));

/// Plain-language explanation per status for one test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplanationTemplates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
}

impl ExplanationTemplates {
    pub fn new(low: impl Into<String>, normal: impl Into<String>, high: impl Into<String>) -> Self {
        Self {
            low: Some(low.into()),
            normal: Some(normal.into()),
            high: Some(high.into()),
        }
    }

    /// Template for a status; `Unknown` never has one.
    pub fn for_status(&self, status: TestStatus) -> Option<&str> {
        match status {
            TestStatus::Low => self.low.as_deref(),
            TestStatus::Normal => self.normal.as_deref(),
            TestStatus::High => self.high.as_deref(),
            TestStatus::Unknown => None,
        }
    }
}

/// Everything known about one canonical test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Alternate spellings matched by substring containment.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Clinically normal interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<RefRange>,
    /// Declared unit, used when the input carries none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Display casing of the canonical name (e.g. "WBC").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Long-form name used in summaries (e.g. "white blood cell count").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Short form substituted into explanations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanations: Option<ExplanationTemplates>,
}

impl ReferenceEntry {
    /// Create an entry with a reference range and no other metadata.
    pub fn new(low: f64, high: f64) -> Self {
        Self {
            aliases: Vec::new(),
            range: Some(RefRange::new(low, high)),
            unit: None,
            display_name: None,
            full_name: None,
            short_name: None,
            explanations: None,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set display casing, long-form name and short form together.
    pub fn with_names(
        mut self,
        display: impl Into<String>,
        full: impl Into<String>,
        short: impl Into<String>,
    ) -> Self {
        self.display_name = Some(display.into());
        self.full_name = Some(full.into());
        self.short_name = Some(short.into());
        self
    }

    pub fn with_explanations(mut self, templates: ExplanationTemplates) -> Self {
        self.explanations = Some(templates);
        self
    }
}

/// Ordered, immutable table of reference entries plus unit synonyms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceCatalog {
    /// Entries keyed by lowercase canonical key, in declaration order.
    pub entries: IndexMap<String, ReferenceEntry>,
    /// Lowercase unit spelling → canonical unit.
    #[serde(default)]
    pub unit_synonyms: IndexMap<String, String>,
}

impl ReferenceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog, initialized once per process.
    pub fn shared() -> Arc<ReferenceCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| LabscribeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog: ReferenceCatalog = serde_json::from_str(&contents)?;
        catalog.validate()?;
        tracing::info!(entries = catalog.len(), path = %path.display(), "Loaded reference catalog");
        Ok(catalog)
    }

    /// Append an entry. Keys are stored lowercase.
    pub fn with_entry(mut self, key: impl Into<String>, entry: ReferenceEntry) -> Self {
        self.entries.insert(key.into().to_lowercase(), entry);
        self
    }

    /// Register a unit synonym (matched case-insensitively).
    pub fn with_unit_synonym(mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Self {
        self.unit_synonyms
            .insert(raw.into().to_lowercase(), canonical.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by canonical key (case-insensitive).
    pub fn lookup(&self, key: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&key.to_lowercase())
    }

    /// Resolve a name to a canonical key when it contains any alias.
    ///
    /// Entries are scanned in declaration order; the first hit wins.
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|(_, entry)| entry.aliases.iter().any(|alias| lower.contains(alias.as_str())))
            .map(|(key, _)| key.as_str())
    }

    /// Reference range for a name: exact key first, then the first key the
    /// name contains.
    pub fn find_range(&self, name: &str) -> Option<RefRange> {
        let lower = name.to_lowercase();
        if let Some(entry) = self.entries.get(&lower) {
            if entry.range.is_some() {
                return entry.range;
            }
        }
        self.entries
            .iter()
            .find(|(key, entry)| entry.range.is_some() && lower.contains(key.as_str()))
            .and_then(|(_, entry)| entry.range)
    }

    /// Display casing for a canonical key.
    ///
    /// Unknown keys get the first letter capitalized and the rest lowercased.
    pub fn display_name(&self, key: &str) -> String {
        self.lookup(key)
            .and_then(|e| e.display_name.clone())
            .unwrap_or_else(|| capitalize_first(&key.to_lowercase()))
    }

    /// Entry for a test name as it appears on a normalized test.
    ///
    /// Tries the canonical key, then the entry whose display name matches
    /// case-insensitively.
    pub fn entry_for_name(&self, name: &str) -> Option<&ReferenceEntry> {
        self.lookup(name).or_else(|| {
            self.entries.values().find(|entry| {
                entry
                    .display_name
                    .as_deref()
                    .is_some_and(|display| display.eq_ignore_ascii_case(name))
            })
        })
    }

    /// Long-form name used in summaries; the name itself when unknown.
    pub fn full_name(&self, name: &str) -> String {
        self.entry_for_name(name)
            .and_then(|e| e.full_name.clone())
            .unwrap_or_else(|| name.to_string())
    }

    /// Short display form used in explanations; the name itself when unknown.
    pub fn short_name(&self, name: &str) -> String {
        self.entry_for_name(name)
            .and_then(|e| e.short_name.clone())
            .unwrap_or_else(|| name.to_string())
    }

    /// Explanation template for a test name and status.
    pub fn template(&self, name: &str, status: TestStatus) -> Option<&str> {
        self.entry_for_name(name)
            .and_then(|e| e.explanations.as_ref())
            .and_then(|t| t.for_status(status))
    }

    /// Canonicalize a unit.
    ///
    /// Order: synonym table, the raw unit itself when non-empty, the catalog
    /// unit for `key`, then the literal `"unknown"`.
    pub fn normalize_unit(&self, raw: &str, key: &str) -> String {
        let raw = raw.trim();
        if let Some(canonical) = self.unit_synonyms.get(&raw.to_lowercase()) {
            return canonical.clone();
        }
        if !raw.is_empty() {
            return raw.to_string();
        }
        self.lookup(key)
            .and_then(|e| e.unit.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Declared unit of the first entry whose key the name contains.
    pub fn infer_unit(&self, name: &str) -> Option<&str> {
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, entry)| entry.unit.is_some() && lower.contains(key.as_str()))
            .and_then(|(_, entry)| entry.unit.as_deref())
    }

    /// Classify a value by the first range whose key the name contains.
    ///
    /// Returns `None` when no entry applies.
    pub fn infer_status(&self, name: &str, value: f64) -> Option<TestStatus> {
        let lower = name.to_lowercase();
        self.entries
            .iter()
            .find(|(key, entry)| entry.range.is_some() && lower.contains(key.as_str()))
            .and_then(|(_, entry)| entry.range)
            .map(|range| range.classify(value))
    }

    /// Reject catalogs with empty keys or aliases, or inverted ranges.
    fn validate(&self) -> Result<()> {
        for (key, entry) in &self.entries {
            if key.trim().is_empty() {
                return Err(LabscribeError::Catalog("empty canonical key".to_string()));
            }
            if entry.aliases.iter().any(|a| a.is_empty()) {
                return Err(LabscribeError::Catalog(format!(
                    "entry '{}' has an empty alias",
                    key
                )));
            }
            if let Some(range) = entry.range {
                if !(range.low <= range.high) {
                    return Err(LabscribeError::Catalog(format!(
                        "entry '{}' has an inverted range ({} > {})",
                        key, range.low, range.high
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Uppercase the first character and lowercase the rest.
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_declaration_order() {
        let catalog = ReferenceCatalog::shared();
        let keys: Vec<&str> = catalog.entries.keys().map(|k| k.as_str()).take(5).collect();
        assert_eq!(keys, vec!["hemoglobin", "wbc", "rbc", "platelet", "glucose"]);
        assert_eq!(catalog.len(), 28);
    }

    #[test]
    fn test_resolve_alias_by_containment() {
        let catalog = ReferenceCatalog::shared();
        assert_eq!(catalog.resolve_alias("hgb"), Some("hemoglobin"));
        assert_eq!(catalog.resolve_alias("White Blood Cell"), Some("wbc"));
        assert_eq!(catalog.resolve_alias("total bilirubin"), Some("bilirubin"));
        assert_eq!(catalog.resolve_alias("sgpt"), Some("alt"));
        // "wbc" alone is not an alias of anything
        assert_eq!(catalog.resolve_alias("wbc"), None);
    }

    #[test]
    fn test_resolve_alias_first_entry_wins() {
        // "creatinine" contains "cr" (creatinine) but nothing earlier.
        let catalog = ReferenceCatalog::shared();
        assert_eq!(catalog.resolve_alias("creatinine"), Some("creatinine"));

        let custom = ReferenceCatalog::new()
            .with_entry("first", ReferenceEntry::new(0.0, 1.0).with_aliases(&["ab"]))
            .with_entry("second", ReferenceEntry::new(0.0, 1.0).with_aliases(&["abc"]));
        assert_eq!(custom.resolve_alias("abc"), Some("first"));
    }

    #[test]
    fn test_find_range_exact_then_substring() {
        let catalog = ReferenceCatalog::shared();
        assert_eq!(catalog.find_range("hemoglobin"), Some(RefRange::new(12.0, 15.0)));
        assert_eq!(catalog.find_range("Triglycerides"), Some(RefRange::new(0.0, 150.0)));
        assert_eq!(catalog.find_range("serum sodium level"), Some(RefRange::new(135.0, 145.0)));
        assert_eq!(catalog.find_range("cortisol"), None);
    }

    #[test]
    fn test_display_name() {
        let catalog = ReferenceCatalog::shared();
        assert_eq!(catalog.display_name("wbc"), "WBC");
        assert_eq!(catalog.display_name("hemoglobin"), "Hemoglobin");
        assert_eq!(catalog.display_name("sodium"), "Sodium");
        assert_eq!(catalog.display_name("vitamin D"), "Vitamin d");
    }

    #[test]
    fn test_entry_for_display_name() {
        let catalog = ReferenceCatalog::new().with_entry(
            "wbc",
            ReferenceEntry::new(4000.0, 11000.0).with_names(
                "White Blood Cells",
                "white blood cell count",
                "WBC",
            ),
        );

        assert!(catalog.entry_for_name("wbc").is_some());
        assert!(catalog.entry_for_name("White Blood Cells").is_some());
        assert!(catalog.entry_for_name("white blood cells").is_some());
        assert!(catalog.entry_for_name("Cortisol").is_none());
        assert_eq!(catalog.full_name("White Blood Cells"), "white blood cell count");
        assert_eq!(catalog.short_name("White Blood Cells"), "WBC");
        assert_eq!(catalog.full_name("Cortisol"), "Cortisol");
    }

    #[test]
    fn test_normalize_unit() {
        let catalog = ReferenceCatalog::shared();
        assert_eq!(catalog.normalize_unit("G/DL", "hemoglobin"), "g/dL");
        assert_eq!(catalog.normalize_unit("cells/ul", "wbc"), "/uL");
        assert_eq!(catalog.normalize_unit("mmol/L", "glucose"), "mmol/L");
        assert_eq!(catalog.normalize_unit("", "rbc"), "million/uL");
        assert_eq!(catalog.normalize_unit("", "sodium"), "unknown");
    }

    #[test]
    fn test_infer_status_uses_catalog_ranges() {
        let catalog = ReferenceCatalog::shared();
        assert_eq!(catalog.infer_status("Hemoglobin", 9.5), Some(TestStatus::Low));
        assert_eq!(catalog.infer_status("Glucose", 100.0), Some(TestStatus::Normal));
        assert_eq!(catalog.infer_status("Cortisol", 10.0), None);
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("alt"), "Alt");
        assert_eq!(capitalize_first("T3"), "T3");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_json_roundtrip_preserves_order() {
        let catalog = ReferenceCatalog::shared();
        let json = serde_json::to_string(catalog.as_ref()).unwrap();

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = ReferenceCatalog::from_json_file(file.path()).unwrap();
        let original: Vec<&String> = catalog.entries.keys().collect();
        let reloaded: Vec<&String> = loaded.entries.keys().collect();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = r#"{"entries": {"bad": {"range": {"low": 5.0, "high": 1.0}}}}"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let err = ReferenceCatalog::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, LabscribeError::Catalog(_)));
    }
}
