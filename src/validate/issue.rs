//! Validation issue records and their display summaries.
//!
//! Issues are plain values. Checks return them, they never panic or abort a
//! batch, and callers decide what to do with the list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of entries [`summarize`] keeps.
pub const DEFAULT_SUMMARY_MAX: usize = 8;

// ============================================================================
// Severity
// ============================================================================

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    Error,
    Warn,
    Info,
}

impl IssueLevel {
    /// Sort rank, higher is more severe.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            IssueLevel::Error => 3,
            IssueLevel::Warn => 2,
            IssueLevel::Info => 1,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueLevel::Error => "error",
            IssueLevel::Warn => "warn",
            IssueLevel::Info => "info",
        }
    }
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Issue Codes
// ============================================================================

/// Stable machine-readable code identifying the failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    RequiredMissing,
    SkuEmpty,
    SkuLayerMissing,
    SkuLayerInvalid,
    RevEmpty,
    RevRuleInvalid,
    RevFormat,
    StatusEmpty,
    StatusInvalid,
    AltSkuEmpty,
    AltInterchangeInvalid,
    BomQtyInvalid,
    BomCritInvalid,
    SupplierStatusInvalid,
    SupplierScoreRange,
}

impl IssueCode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::RequiredMissing => "REQUIRED_MISSING",
            IssueCode::SkuEmpty => "SKU_EMPTY",
            IssueCode::SkuLayerMissing => "SKU_LAYER_MISSING",
            IssueCode::SkuLayerInvalid => "SKU_LAYER_INVALID",
            IssueCode::RevEmpty => "REV_EMPTY",
            IssueCode::RevRuleInvalid => "REV_RULE_INVALID",
            IssueCode::RevFormat => "REV_FORMAT",
            IssueCode::StatusEmpty => "STATUS_EMPTY",
            IssueCode::StatusInvalid => "STATUS_INVALID",
            IssueCode::AltSkuEmpty => "ALT_SKU_EMPTY",
            IssueCode::AltInterchangeInvalid => "ALT_INTERCHANGE_INVALID",
            IssueCode::BomQtyInvalid => "BOM_QTY_INVALID",
            IssueCode::BomCritInvalid => "BOM_CRIT_INVALID",
            IssueCode::SupplierStatusInvalid => "SUPPLIER_STATUS_INVALID",
            IssueCode::SupplierScoreRange => "SUPPLIER_SCORE_RANGE",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Issues
// ============================================================================

/// One validation finding against one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub level: IssueLevel,
    pub code: IssueCode,
    pub message: String,
    /// Field name, set for required-field findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Which record the issue belongs to, e.g. `Supplier SUP-001`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Check-specific key=value payload, e.g. `layer=XXX allowed=PLT|SUB`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Issue {
    /// Create an error-level issue. Every built-in check reports at this
    /// level; `warn`/`info` exist for callers layering their own findings.
    #[must_use]
    pub fn error(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            code,
            message: message.into(),
            field: None,
            context: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ============================================================================
// Summaries
// ============================================================================

/// A display-ready digest of one issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSummary {
    /// `LEVEL • CODE • message`.
    pub title: String,
    /// Context, field and details joined with ` • `; empty when none are set.
    pub meta: String,
}

/// Reduce an issue list to its most severe entries, display-ready.
///
/// Sorts by severity rank descending, keeping the original relative order
/// within each rank, then truncates to `max` (default
/// [`DEFAULT_SUMMARY_MAX`]).
#[must_use]
pub fn summarize(issues: &[Issue], max: Option<usize>) -> Vec<IssueSummary> {
    let max = max.unwrap_or(DEFAULT_SUMMARY_MAX);

    let mut ranked: Vec<&Issue> = issues.iter().collect();
    ranked.sort_by(|a, b| b.level.rank().cmp(&a.level.rank()));
    ranked.truncate(max);

    ranked
        .into_iter()
        .map(|issue| {
            let title = format!(
                "{} • {} • {}",
                issue.level.as_str().to_uppercase(),
                issue.code,
                issue.message
            );

            let mut meta = Vec::new();
            if let Some(context) = issue.context.as_deref() {
                if !context.is_empty() {
                    meta.push(context.to_string());
                }
            }
            if let Some(field) = issue.field.as_deref() {
                if !field.is_empty() {
                    meta.push(format!("field={field}"));
                }
            }
            if let Some(details) = issue.details.as_deref() {
                if !details.is_empty() {
                    meta.push(details.to_string());
                }
            }

            IssueSummary {
                title,
                meta: meta.join(" • "),
            }
        })
        .collect()
}
