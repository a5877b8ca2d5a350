//! Rules file loading and discovery.
//!
//! Rule documents live next to the datasets as `rules.json`, with YAML
//! accepted for teams that prefer commented rules.

use std::path::{Path, PathBuf};

use crate::error::{PlmToolsError, RulesErrorKind};

use super::types::{RuleConfig, RulesMeta};

// ============================================================================
// Rules File Discovery
// ============================================================================

/// Standard rules file names to search for.
const RULES_FILE_NAMES: &[&str] = &["rules.json", "rules.yaml", "rules.yml"];

/// SKU layer tokens used in the example document.
const EXAMPLE_SKU_LAYERS: &[&str] = &["PLT", "SUB", "ASM", "PRT", "CON", "TOL"];

/// Lifecycle states used in the example document.
const EXAMPLE_LIFECYCLE_STATES: &[&str] = &["Draft", "In Review", "Released", "Obsolete"];

/// Discover a rules file.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. The data directory
/// 3. Current directory
#[must_use]
pub fn discover_rules_file(explicit_path: Option<&Path>, data_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = find_rules_in_dir(data_dir) {
        return Some(path);
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_rules_in_dir(&cwd) {
            return Some(path);
        }
    }

    None
}

/// Find a rules file in a specific directory.
fn find_rules_in_dir(dir: &Path) -> Option<PathBuf> {
    for name in RULES_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

// ============================================================================
// Rules File Loading
// ============================================================================

/// Error type for rules file operations.
#[derive(Debug)]
pub enum RulesFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// JSON parsing error
    ParseJson(serde_json::Error),
    /// YAML parsing error
    ParseYaml(serde_yaml::Error),
    /// Extension is neither JSON nor YAML
    UnsupportedExtension(PathBuf),
}

impl std::fmt::Display for RulesFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Rules file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read rules file: {e}"),
            Self::ParseJson(e) => write!(f, "Failed to parse rules file: {e}"),
            Self::ParseYaml(e) => write!(f, "Failed to parse rules file: {e}"),
            Self::UnsupportedExtension(path) => write!(
                f,
                "Unsupported rules file extension: {} (expected .json, .yaml or .yml)",
                path.display()
            ),
        }
    }
}

impl std::error::Error for RulesFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) | Self::UnsupportedExtension(_) => None,
            Self::Io(e) => Some(e),
            Self::ParseJson(e) => Some(e),
            Self::ParseYaml(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RulesFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<RulesFileError> for PlmToolsError {
    fn from(err: RulesFileError) -> Self {
        match err {
            RulesFileError::NotFound(path) => {
                Self::rules("rules file missing", RulesErrorKind::NotFound(path))
            }
            RulesFileError::Io(source) => Self::from(source),
            RulesFileError::ParseJson(e) => Self::rules(
                "rules file is not valid JSON",
                RulesErrorKind::InvalidJson(e.to_string()),
            ),
            RulesFileError::ParseYaml(e) => Self::rules(
                "rules file is not valid YAML",
                RulesErrorKind::InvalidYaml(e.to_string()),
            ),
            RulesFileError::UnsupportedExtension(path) => Self::rules(
                "rules file has an unsupported extension",
                RulesErrorKind::UnsupportedExtension(path.display().to_string()),
            ),
        }
    }
}

/// Load a `RuleConfig` from a JSON or YAML file.
pub fn load_rules_file(path: &Path) -> Result<RuleConfig, RulesFileError> {
    if !path.exists() {
        return Err(RulesFileError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let content = std::fs::read_to_string(path)?;
    match extension.as_str() {
        "json" => serde_json::from_str(&content).map_err(RulesFileError::ParseJson),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(RulesFileError::ParseYaml),
        _ => Err(RulesFileError::UnsupportedExtension(path.to_path_buf())),
    }
}

/// Load rules from a discovered file, or return defaults.
///
/// Parse failures are logged and fall back to the default document so record
/// checks can still run.
#[must_use]
pub fn load_or_default(
    explicit_path: Option<&Path>,
    data_dir: &Path,
) -> (RuleConfig, Option<PathBuf>) {
    discover_rules_file(explicit_path, data_dir).map_or_else(
        || (RuleConfig::default(), None),
        |path| match load_rules_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load rules from {}: {}", path.display(), e);
                (RuleConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Rules Generation
// ============================================================================

/// A complete example rule document.
///
/// Unlike [`RuleConfig::default`], the example fills in the sections that
/// default to empty (SKU layers and lifecycle states) so a new program has
/// every check active from day one.
#[must_use]
pub fn example_rules() -> RuleConfig {
    let mut config = RuleConfig::default();
    config.meta = RulesMeta {
        last_updated: "2025-01-20".to_string(),
        version: "1.0".to_string(),
    };
    config.sku_layers.allowed = EXAMPLE_SKU_LAYERS.iter().map(|s| (*s).to_string()).collect();
    config.status_machine.states = EXAMPLE_LIFECYCLE_STATES
        .iter()
        .map(|s| (*s).to_string())
        .collect();
    config
}

/// Generate example rules file content as pretty JSON.
#[must_use]
pub fn generate_example_rules() -> String {
    let mut json = serde_json::to_string_pretty(&example_rules()).unwrap_or_default();
    json.push('\n');
    json
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_rules_in_dir() {
        let tmp = TempDir::new().unwrap();
        let rules_path = tmp.path().join("rules.json");
        std::fs::write(&rules_path, "{}").unwrap();

        let found = find_rules_in_dir(tmp.path());
        assert_eq!(found, Some(rules_path));
    }

    #[test]
    fn test_find_rules_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_rules_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_rules_file_json() {
        let tmp = TempDir::new().unwrap();
        let rules_path = tmp.path().join("rules.json");
        std::fs::write(
            &rules_path,
            r#"{"revision": {"pattern": "^R[0-9]+$"}, "skuLayers": {"allowed": ["ASM"]}}"#,
        )
        .unwrap();

        let config = load_rules_file(&rules_path).unwrap();
        assert_eq!(config.revision.pattern, "^R[0-9]+$");
        assert_eq!(config.sku_layers.allowed, ["ASM"]);
        // Untouched sections still default.
        assert_eq!(config.supplier_scoring.range.max, 5.0);
    }

    #[test]
    fn test_load_rules_file_yaml() {
        let tmp = TempDir::new().unwrap();
        let rules_path = tmp.path().join("rules.yaml");
        std::fs::write(
            &rules_path,
            "suppliers:\n  status:\n    - Preferred\n    - Probation\n",
        )
        .unwrap();

        let config = load_rules_file(&rules_path).unwrap();
        assert_eq!(config.suppliers.status, ["Preferred", "Probation"]);
    }

    #[test]
    fn test_load_rules_file_not_found() {
        let result = load_rules_file(Path::new("/nonexistent/rules.json"));
        assert!(matches!(result, Err(RulesFileError::NotFound(_))));
    }

    #[test]
    fn test_load_rules_file_unsupported_extension() {
        let tmp = TempDir::new().unwrap();
        let rules_path = tmp.path().join("rules.toml");
        std::fs::write(&rules_path, "").unwrap();

        let result = load_rules_file(&rules_path);
        assert!(matches!(result, Err(RulesFileError::UnsupportedExtension(_))));
    }

    #[test]
    fn test_load_rules_file_bad_json() {
        let tmp = TempDir::new().unwrap();
        let rules_path = tmp.path().join("rules.json");
        std::fs::write(&rules_path, "{not json").unwrap();

        let result = load_rules_file(&rules_path);
        assert!(matches!(result, Err(RulesFileError::ParseJson(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let tmp = TempDir::new().unwrap();
        let rules_path = tmp.path().join("rules.json");
        std::fs::write(&rules_path, "{broken").unwrap();

        let (config, loaded_from) = load_or_default(None, tmp.path());
        assert_eq!(loaded_from, None);
        assert_eq!(config.revision.pattern, "^[A-Z]$");
    }

    #[test]
    fn test_discover_explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let custom = tmp.path().join("custom-rules.yaml");
        std::fs::write(&custom, "meta:\n  version: '2'\n").unwrap();

        let discovered = discover_rules_file(Some(&custom), tmp.path());
        assert_eq!(discovered, Some(custom));
    }

    #[test]
    fn test_example_rules_fill_empty_sections() {
        let example = example_rules();
        assert!(!example.sku_layers.allowed.is_empty());
        assert!(!example.status_machine.states.is_empty());

        let json = generate_example_rules();
        assert!(json.contains("\"skuLayers\""));
        assert!(json.contains("\"statusMachine\""));
        assert!(json.ends_with('\n'));
    }
}
