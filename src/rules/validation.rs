//! Rule document validation.
//!
//! These checks catch authoring mistakes in a rules file before it is applied
//! to data. They are advisory: record checks still run with whatever document
//! was loaded, and report rule problems (such as an invalid revision regex)
//! against the affected records.

use regex::Regex;

use super::types::*;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for rule document validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation, in wire spelling.
    pub field: String,
    /// Description of the validation error.
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable rule document sections.
pub trait Validatable {
    /// Validate the section, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the section is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

fn check_blank_entries(errors: &mut Vec<ConfigError>, field: &str, list: &[String]) {
    for (i, entry) in list.iter().enumerate() {
        if entry.trim().is_empty() {
            errors.push(ConfigError {
                field: format!("{field}[{i}]"),
                message: "entry must not be blank".to_string(),
            });
        }
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for RuleConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.parts.validate());
        errors.extend(self.bom.validate());
        errors.extend(self.suppliers.validate());
        errors.extend(self.supplier_scoring.validate());
        errors.extend(self.sku_layers.validate());
        errors.extend(self.revision.validate());
        errors.extend(self.status_machine.validate());
        errors.extend(self.alternates.validate());
        errors
    }
}

impl Validatable for PartsRules {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_blank_entries(&mut errors, "parts.requiredFields", &self.required_fields);
        errors
    }
}

impl Validatable for BomRules {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_blank_entries(&mut errors, "bom.requiredFields", &self.required_fields);
        check_blank_entries(&mut errors, "bom.criticality", &self.criticality);
        errors
    }
}

impl Validatable for SupplierRules {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_blank_entries(&mut errors, "suppliers.requiredFields", &self.required_fields);
        check_blank_entries(&mut errors, "suppliers.status", &self.status);
        errors
    }
}

impl Validatable for SupplierScoring {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.range.min.is_finite() || !self.range.max.is_finite() {
            errors.push(ConfigError {
                field: "supplierScoring.range".to_string(),
                message: "min and max must be finite numbers".to_string(),
            });
        } else if self.range.min >= self.range.max {
            errors.push(ConfigError {
                field: "supplierScoring.range".to_string(),
                message: format!(
                    "min must be below max, got {}..{}",
                    self.range.min, self.range.max
                ),
            });
        }

        for (dim, weight) in &self.weights {
            if !weight.is_finite() || *weight < 0.0 {
                errors.push(ConfigError {
                    field: format!("supplierScoring.weights.{dim}"),
                    message: format!("weight must be a non-negative number, got {weight}"),
                });
            }
        }

        errors
    }
}

impl Validatable for SkuLayerRules {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_blank_entries(&mut errors, "skuLayers.allowed", &self.allowed);
        errors
    }
}

impl Validatable for RevisionRule {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.pattern.trim().is_empty() {
            errors.push(ConfigError {
                field: "revision.pattern".to_string(),
                message: "pattern must not be empty".to_string(),
            });
        } else if let Err(err) = Regex::new(&self.pattern) {
            errors.push(ConfigError {
                field: "revision.pattern".to_string(),
                message: format!("invalid regex: {err}"),
            });
        }

        errors
    }
}

impl Validatable for StatusMachine {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_blank_entries(&mut errors, "statusMachine.states", &self.states);
        errors
    }
}

impl Validatable for AlternatesRules {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        check_blank_entries(
            &mut errors,
            "alternates.interchangeability",
            &self.interchangeability,
        );
        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
