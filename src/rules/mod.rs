//! Rule document handling.
//!
//! This module provides the rule document types, their defaults, file
//! loading with discovery, and advisory validation of authored documents.

pub mod defaults;
pub mod file;
pub mod types;
pub mod validation;

pub use file::{
    discover_rules_file, example_rules, generate_example_rules, load_or_default,
    load_rules_file, RulesFileError,
};
pub use types::{
    AlternatesRules, BomRules, PartsRules, RevisionRule, RuleConfig, RulesMeta, ScoreRange,
    SkuLayerRules, StatusMachine, SupplierRules, SupplierScoring,
};
pub use validation::{ConfigError, Validatable};

/// Generate a JSON schema for the rule document.
///
/// Useful for editor integration and document validation in CI.
#[must_use]
pub fn generate_rules_schema() -> String {
    let schema = schemars::schema_for!(RuleConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
