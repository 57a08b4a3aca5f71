use anyhow::{Context, Result};
use nasiq_core::categories::CategoryBands;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional application configuration, read from `nasiq.yaml` in the
/// working directory. Command-line flags override anything set here.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub profile: Option<String>,
    pub data_dir: Option<PathBuf>,
    /// Band preset name (`standard`, `legacy`) or path to a bands YAML file.
    pub bands: Option<String>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML from {:?}", path))
    }
}

/// Resolves the category band table from a preset name or a YAML file path.
/// With no selector the canonical `standard` table is used.
pub fn resolve_bands(selector: Option<&str>) -> Result<CategoryBands> {
    let Some(selector) = selector else {
        return Ok(CategoryBands::standard());
    };
    if matches!(selector, "standard" | "legacy") {
        return Ok(CategoryBands::preset(selector)?);
    }
    let content = fs::read_to_string(selector)
        .with_context(|| format!("Failed to read bands file '{}'", selector))?;
    CategoryBands::from_yaml_str(&content)
        .with_context(|| format!("Invalid band table in '{}'", selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nasiq_schemas::category::Category;
    use std::io::Write;

    #[test]
    fn missing_config_file_yields_defaults() {
        let config = AppConfig::load(Path::new("does-not-exist.yaml")).unwrap();
        assert!(config.profile.is_none());
        assert!(config.bands.is_none());
    }

    #[test]
    fn presets_resolve_by_name() {
        let standard = resolve_bands(Some("standard")).unwrap();
        let legacy = resolve_bands(Some("legacy")).unwrap();
        assert_eq!(standard.categorize(250.0), Category::Daily);
        assert_eq!(legacy.categorize(250.0), Category::Economy);
    }

    #[test]
    fn bands_resolve_from_a_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
schema_version: "1.0"
bands:
  - category: economy
    min_price: 0.0
    max_price: 100.0
  - category: daily
    min_price: 100.0
    max_price: 200.0
  - category: premium
    min_price: 200.0
    max_price: 300.0
  - category: luxury
    min_price: 300.0
"#
        )
        .unwrap();
        let bands = resolve_bands(Some(file.path().to_str().unwrap())).unwrap();
        assert_eq!(bands.categorize(150.0), Category::Daily);
    }
}
