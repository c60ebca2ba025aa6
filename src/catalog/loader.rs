use crate::catalog::models::*;
use crate::catalog::validation::*;
use crate::units::error::{Result, UnitError};
use lazy_static::lazy_static;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const EMBEDDED_CATALOG: &str = include_str!("../../data/units.json");

lazy_static! {
    static ref DEFAULT_CATALOG: Catalog = load_catalog_from_str(EMBEDDED_CATALOG, CatalogFormat::Json)
        .map(|(catalog, _)| catalog)
        .expect("embedded unit catalog is well-formed");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(CatalogFormat::Json),
            Some("toml") => Ok(CatalogFormat::Toml),
            _ => Err(UnitError::InvalidCatalog {
                message: format!("Unsupported catalog file: {}", path.display()),
            }),
        }
    }
}

// TOML needs a table at the top level, so unit types live under [[unit_type]]
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(rename = "unit_type", default)]
    unit_types: Vec<UnitType>,
}

impl Catalog {
    /// Catalog embedded in the crate, parsed on first use
    pub fn global() -> &'static Catalog {
        &DEFAULT_CATALOG
    }
}

/// Parse and validate a catalog. Validation errors reject the catalog;
/// warnings are handed back to the caller.
pub fn load_catalog_from_str(
    content: &str,
    format: CatalogFormat,
) -> Result<(Catalog, ValidationResult)> {
    let unit_types: Vec<UnitType> = match format {
        CatalogFormat::Json => serde_json::from_str(content)?,
        CatalogFormat::Toml => toml::from_str::<TomlCatalog>(content)?.unit_types,
    };

    let catalog = Catalog::new(unit_types);
    let validation = validate_catalog(&catalog);

    if !validation.is_valid() {
        return Err(UnitError::InvalidCatalog {
            message: validation.to_string().trim_end().to_string(),
        });
    }

    debug!(
        "Loaded catalog with {} unit types ({} warnings)",
        catalog.unit_types().len(),
        validation.warnings.len()
    );

    Ok((catalog, validation))
}

pub fn load_catalog_from_file<P: AsRef<Path>>(path: P) -> Result<(Catalog, ValidationResult)> {
    let path = path.as_ref();
    let format = CatalogFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    load_catalog_from_str(&content, format)
}
