//! Record checks driven by the rule document.
//!
//! [`RecordValidator`] compiles rule patterns once, then applies every check
//! for a record kind independently, so one record can accumulate several
//! issues. A bad rule pattern is itself reported as an issue on the record
//! being checked, never as a crash of the whole run.

use regex::Regex;
use serde::Serialize;

use super::issue::{Issue, IssueCode, IssueLevel};
use crate::model::{coerce, BomNode, DatasetBundle, Part, RecordKind, Supplier};
use crate::rules::defaults::DEFAULT_REVISION_PATTERN;
use crate::rules::RuleConfig;

// ============================================================================
// Validator
// ============================================================================

/// Applies the rule document to individual records.
///
/// Construction compiles the revision pattern; a pattern that does not
/// compile is remembered and reported as [`IssueCode::RevRuleInvalid`] on
/// each record whose revision would have been matched.
pub struct RecordValidator<'a> {
    rules: &'a RuleConfig,
    revision_pattern: Result<Regex, String>,
}

impl<'a> RecordValidator<'a> {
    #[must_use]
    pub fn new(rules: &'a RuleConfig) -> Self {
        // An empty pattern string means "not configured", same as absent.
        let pattern = if rules.revision.pattern.is_empty() {
            DEFAULT_REVISION_PATTERN
        } else {
            rules.revision.pattern.as_str()
        };
        let revision_pattern = Regex::new(pattern).map_err(|e| e.to_string());

        Self {
            rules,
            revision_pattern,
        }
    }

    /// Run every part check: required fields, SKU layer, revision format,
    /// lifecycle status, and alternates.
    #[must_use]
    pub fn validate_part(&self, part: &Part) -> Vec<Issue> {
        let mut issues = Vec::new();

        check_required(
            &self.rules.parts.required_fields,
            "Part",
            |f| part.field_text(f),
            &mut issues,
        );
        self.check_sku_layer(&part.sku, &mut issues);
        self.check_revision(&part.revision, &mut issues);
        self.check_status(&part.status, &mut issues);
        self.check_alternates(part, &mut issues);

        issues
    }

    /// Run every BOM node check: required fields, quantity, criticality,
    /// SKU layer, and revision format.
    #[must_use]
    pub fn validate_bom_node(&self, node: &BomNode) -> Vec<Issue> {
        let mut issues = Vec::new();

        check_required(
            &self.rules.bom.required_fields,
            "BOM Node",
            |f| node.field_text(f),
            &mut issues,
        );

        match node.qty_number() {
            Some(qty) if qty > 0.0 => {}
            _ => {
                issues.push(
                    Issue::error(IssueCode::BomQtyInvalid, "BOM qty must be a positive number")
                        .with_details(format!("qty={}", coerce::to_text(&node.qty))),
                );
            }
        }

        let allowed = &self.rules.bom.criticality;
        if !node.criticality.is_empty()
            && !allowed.is_empty()
            && !allowed.iter().any(|c| c == &node.criticality)
        {
            issues.push(
                Issue::error(
                    IssueCode::BomCritInvalid,
                    "Criticality is not allowed by the rules file",
                )
                .with_details(format!("criticality={}", node.criticality)),
            );
        }

        self.check_sku_layer(&node.sku, &mut issues);
        self.check_revision(&node.revision, &mut issues);

        issues
    }

    /// Run every supplier check: required fields, status, and score ranges.
    #[must_use]
    pub fn validate_supplier(&self, supplier: &Supplier) -> Vec<Issue> {
        let mut issues = Vec::new();

        check_required(
            &self.rules.suppliers.required_fields,
            "Supplier",
            |f| supplier.field_text(f),
            &mut issues,
        );

        let status = supplier.status.trim();
        let allowed = &self.rules.suppliers.status;
        if !status.is_empty() && !allowed.is_empty() && !allowed.iter().any(|s| s == status) {
            issues.push(
                Issue::error(
                    IssueCode::SupplierStatusInvalid,
                    "Supplier status is not allowed by the rules file",
                )
                .with_details(format!("status={status}")),
            );
        }

        let range = &self.rules.supplier_scoring.range;
        for (key, raw) in &supplier.scores {
            let in_range = coerce::to_number(raw)
                .map_or(false, |v| v >= range.min && v <= range.max);
            if !in_range {
                issues.push(
                    Issue::error(IssueCode::SupplierScoreRange, "Supplier score out of range")
                        .with_details(format!(
                            "key={key} value={} range={}..{}",
                            coerce::to_text(raw),
                            range.min,
                            range.max
                        )),
                );
            }
        }

        issues
    }

    // ------------------------------------------------------------------
    // Shared field checks
    // ------------------------------------------------------------------

    fn check_sku_layer(&self, sku: &str, issues: &mut Vec<Issue>) {
        if sku.trim().is_empty() {
            issues.push(Issue::error(IssueCode::SkuEmpty, "SKU is empty"));
            return;
        }

        // Layer is the second hyphen token: SB1-<LAYER>-...
        let layer = sku.split('-').nth(1).unwrap_or("");
        if layer.trim().is_empty() {
            issues.push(Issue::error(
                IssueCode::SkuLayerMissing,
                "SKU layer token is missing (expected SB1-<LAYER>-...)",
            ));
            return;
        }

        let allowed = &self.rules.sku_layers.allowed;
        if !allowed.is_empty() && !allowed.iter().any(|a| a == layer) {
            issues.push(
                Issue::error(
                    IssueCode::SkuLayerInvalid,
                    "SKU layer is not allowed by the rules file",
                )
                .with_details(format!("layer={layer} allowed={}", allowed.join("|"))),
            );
        }
    }

    fn check_revision(&self, revision: &str, issues: &mut Vec<Issue>) {
        let rev = revision.trim();
        if rev.is_empty() {
            issues.push(Issue::error(IssueCode::RevEmpty, "Revision is empty"));
            return;
        }

        match &self.revision_pattern {
            Ok(re) => {
                if !re.is_match(rev) {
                    issues.push(
                        Issue::error(
                            IssueCode::RevFormat,
                            "Revision does not match the configured pattern",
                        )
                        .with_details(format!("rev={rev} pattern={}", re.as_str())),
                    );
                }
            }
            Err(e) => {
                issues.push(
                    Issue::error(
                        IssueCode::RevRuleInvalid,
                        "Revision rule regex is invalid in the rules file",
                    )
                    .with_details(e.clone()),
                );
            }
        }
    }

    fn check_status(&self, status: &str, issues: &mut Vec<Issue>) {
        let status = status.trim();
        if status.is_empty() {
            issues.push(Issue::error(IssueCode::StatusEmpty, "Status is empty"));
            return;
        }

        let states = &self.rules.status_machine.states;
        if !states.is_empty() && !states.iter().any(|s| s == status) {
            issues.push(
                Issue::error(
                    IssueCode::StatusInvalid,
                    "Status is not a valid state per the rules file",
                )
                .with_details(format!("status={status} allowed={}", states.join("|"))),
            );
        }
    }

    fn check_alternates(&self, part: &Part, issues: &mut Vec<Issue>) {
        let allowed = &self.rules.alternates.interchangeability;

        for (idx, alternate) in part.alternates.iter().enumerate() {
            if alternate.sku.trim().is_empty() {
                issues.push(
                    Issue::error(IssueCode::AltSkuEmpty, "Alternate SKU is empty")
                        .with_details(format!("index={idx}")),
                );
            }
            if !allowed.iter().any(|a| a == &alternate.interchangeability) {
                issues.push(
                    Issue::error(
                        IssueCode::AltInterchangeInvalid,
                        "Alternate interchangeability is invalid",
                    )
                    .with_details(format!(
                        "index={idx} value={}",
                        alternate.interchangeability
                    )),
                );
            }
        }
    }
}

/// Required-field check shared by every record kind.
///
/// A field is missing when the record has no such field or its text form
/// trims to empty.
fn check_required<F>(fields: &[String], context: &str, field_text: F, issues: &mut Vec<Issue>)
where
    F: Fn(&str) -> Option<String>,
{
    for field in fields {
        let value = field_text(field).unwrap_or_default();
        if value.trim().is_empty() {
            issues.push(
                Issue::error(IssueCode::RequiredMissing, "Missing required field")
                    .with_field(field)
                    .with_context(context),
            );
        }
    }
}

// ============================================================================
// Batch Validation
// ============================================================================

/// Issues collected over one or more datasets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    /// Number of records the checks ran against.
    pub records_checked: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn count(&self, level: IssueLevel) -> usize {
        self.issues.iter().filter(|i| i.level == level).count()
    }

    #[must_use]
    pub fn error_count(&self) -> usize {
        self.count(IssueLevel::Error)
    }

    #[must_use]
    pub fn warn_count(&self) -> usize {
        self.count(IssueLevel::Warn)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validate every part, BOM node and supplier in the bundle.
///
/// Each issue's context is set to the record it came from, e.g.
/// `Supplier SUP-001`. Change records carry no checks and are not counted.
#[must_use]
pub fn validate_bundle(bundle: &DatasetBundle, rules: &RuleConfig) -> ValidationReport {
    let validator = RecordValidator::new(rules);
    let mut report = ValidationReport::default();

    collect_part_issues(&validator, &bundle.parts, &mut report);
    collect_bom_issues(&validator, &bundle.bom_nodes, &mut report);
    collect_supplier_issues(&validator, &bundle.suppliers, &mut report);

    report
}

/// Validate a single dataset out of the bundle.
///
/// Selecting [`RecordKind::Change`] yields an empty report since no checks
/// are defined for change records.
#[must_use]
pub fn validate_dataset(
    bundle: &DatasetBundle,
    rules: &RuleConfig,
    kind: RecordKind,
) -> ValidationReport {
    let validator = RecordValidator::new(rules);
    let mut report = ValidationReport::default();

    match kind {
        RecordKind::Part => collect_part_issues(&validator, &bundle.parts, &mut report),
        RecordKind::BomNode => collect_bom_issues(&validator, &bundle.bom_nodes, &mut report),
        RecordKind::Supplier => {
            collect_supplier_issues(&validator, &bundle.suppliers, &mut report);
        }
        RecordKind::Change => {}
    }

    report
}

fn collect_part_issues(validator: &RecordValidator, parts: &[Part], report: &mut ValidationReport) {
    for part in parts {
        let context = format!("Part {}", part.display_id());
        for issue in validator.validate_part(part) {
            report.issues.push(issue.with_context(context.clone()));
        }
        report.records_checked += 1;
    }
}

fn collect_bom_issues(
    validator: &RecordValidator,
    nodes: &[BomNode],
    report: &mut ValidationReport,
) {
    for node in nodes {
        let context = format!("BOM Node {}", node.display_id());
        for issue in validator.validate_bom_node(node) {
            report.issues.push(issue.with_context(context.clone()));
        }
        report.records_checked += 1;
    }
}

fn collect_supplier_issues(
    validator: &RecordValidator,
    suppliers: &[Supplier],
    report: &mut ValidationReport,
) {
    for supplier in suppliers {
        let context = format!("Supplier {}", supplier.display_id());
        for issue in validator.validate_supplier(supplier) {
            report.issues.push(issue.with_context(context.clone()));
        }
        report.records_checked += 1;
    }
}
