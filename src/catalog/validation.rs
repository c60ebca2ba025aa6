use crate::catalog::models::{Catalog, UnitType};
use std::fmt;

#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub message: String,
    pub location: Option<IssueLocation>,
}

/// Where in the catalog an issue was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueLocation {
    UnitType(String),
    Unit { unit_type: String, identifier: String },
    Bridge { unit_type: String, index: usize },
}

impl IssueLocation {
    pub fn unit_type(&self) -> &str {
        match self {
            IssueLocation::UnitType(name)
            | IssueLocation::Unit { unit_type: name, .. }
            | IssueLocation::Bridge { unit_type: name, .. } => name,
        }
    }

    fn unit(unit_type: &str, identifier: &str) -> Self {
        IssueLocation::Unit {
            unit_type: unit_type.to_string(),
            identifier: identifier.to_string(),
        }
    }
}

impl fmt::Display for IssueLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLocation::UnitType(name) => write!(f, "{}", name),
            IssueLocation::Unit {
                unit_type,
                identifier,
            } => write!(f, "{}/{}", unit_type, identifier),
            IssueLocation::Bridge { unit_type, index } => {
                write!(f, "{}/conversions[{}]", unit_type, index)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, message: String, location: Option<IssueLocation>) {
        self.errors.push(ValidationIssue {
            severity: IssueSeverity::Error,
            message,
            location,
        });
    }

    pub fn add_warning(&mut self, message: String, location: Option<IssueLocation>) {
        self.warnings.push(ValidationIssue {
            severity: IssueSeverity::Warning,
            message,
            location,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Errors and warnings raised against one unit type
    pub fn issues_for<'a>(
        &'a self,
        unit_type: &'a str,
    ) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |issue| {
                issue
                    .location
                    .as_ref()
                    .is_some_and(|loc| loc.unit_type() == unit_type)
            })
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, issues) in [("Errors", &self.errors), ("Warnings", &self.warnings)] {
            if issues.is_empty() {
                continue;
            }
            writeln!(f, "{}:", title)?;
            for issue in issues {
                match &issue.location {
                    Some(loc) => writeln!(f, "  [{}] {}", loc, issue.message)?,
                    None => writeln!(f, "  {}", issue.message)?,
                }
            }
        }
        Ok(())
    }
}

/// Check the catalog against the base-unit invariant and related
/// consistency rules
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut validation = ValidationResult::new();

    if catalog.is_empty() {
        validation.add_warning("Catalog defines no unit types".to_string(), None);
    }

    let mut seen_types: Vec<&str> = Vec::new();
    for unit_type in catalog.unit_types() {
        if seen_types.contains(&unit_type.name.as_str()) {
            validation.add_error(
                format!("Unit type '{}' is declared more than once", unit_type.name),
                Some(IssueLocation::UnitType(unit_type.name.clone())),
            );
        }
        seen_types.push(&unit_type.name);

        validate_unit_type(unit_type, &mut validation);
    }

    // Identifiers shared across types resolve to the first declaration
    for (idx, unit_type) in catalog.unit_types().iter().enumerate() {
        for unit in &unit_type.units {
            let shadowing = catalog.unit_types()[..idx]
                .iter()
                .find(|earlier| earlier.find(&unit.value).is_some());
            if let Some(earlier) = shadowing {
                validation.add_warning(
                    format!(
                        "Identifier '{}' is shadowed by unit type '{}'",
                        unit.value, earlier.name
                    ),
                    Some(IssueLocation::unit(&unit_type.name, &unit.value)),
                );
            }
        }
    }

    validation
}

fn validate_unit_type(unit_type: &UnitType, validation: &mut ValidationResult) {
    let name = &unit_type.name;

    for (idx, unit) in unit_type.units.iter().enumerate() {
        let location = Some(IssueLocation::unit(name, &unit.value));

        if unit_type.units[..idx].iter().any(|u| u.value == unit.value) {
            validation.add_error(
                format!("Duplicate identifier '{}'", unit.value),
                location.clone(),
            );
        }

        match (unit.base_unit, unit.conversion) {
            (true, Some(_)) => validation.add_error(
                "Base unit must not carry a conversion factor".to_string(),
                location,
            ),
            (false, None) => validation.add_error(
                "Missing conversion factor".to_string(),
                location,
            ),
            (false, Some(factor)) if !(factor.is_finite() && factor > 0.0) => validation
                .add_error(
                    format!("Conversion factor must be positive, got {}", factor),
                    location,
                ),
            _ => {}
        }
    }

    let systems = unit_type.systems();
    for system in &systems {
        let bases = unit_type
            .units
            .iter()
            .filter(|u| u.system == *system && u.base_unit)
            .count();
        if bases != 1 {
            validation.add_error(
                format!("Expected exactly one {} base unit, found {}", system, bases),
                Some(IssueLocation::UnitType(name.clone())),
            );
        }
    }

    for (idx, bridge) in unit_type.conversions.iter().enumerate() {
        let location = Some(IssueLocation::Bridge {
            unit_type: name.clone(),
            index: idx,
        });
        if !(bridge.factor.is_finite() && bridge.factor > 0.0) {
            validation.add_error(
                format!("Bridge factor must be positive, got {}", bridge.factor),
                location.clone(),
            );
        }
        if bridge.start == bridge.end {
            validation.add_error(
                format!("Bridge connects {} to itself", bridge.start),
                location.clone(),
            );
        }
        for system in [bridge.start, bridge.end] {
            if !systems.contains(&system) {
                validation.add_error(
                    format!("Bridge names {} but '{}' has no {} units", system, name, system),
                    location.clone(),
                );
            }
        }
    }

    for system in &systems {
        if systems.len() > 1 && unit_type.bridge_for(*system).is_none() {
            validation.add_warning(
                format!(
                    "No cross-system conversion from {}; such conversions yield zero",
                    system
                ),
                Some(IssueLocation::UnitType(name.clone())),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::{Bridge, System, UnitDefinition};

    fn unit(value: &str, system: System, conversion: Option<f64>, base_unit: bool) -> UnitDefinition {
        UnitDefinition {
            value: value.to_string(),
            text: value.to_uppercase(),
            system,
            conversion,
            base_unit,
        }
    }

    fn length() -> UnitType {
        UnitType {
            name: "length".to_string(),
            units: vec![
                unit("cm", System::Metric, None, true),
                unit("m", System::Metric, Some(100.0), false),
                unit("in", System::Imperial, None, true),
            ],
            conversions: vec![Bridge {
                start: System::Metric,
                end: System::Imperial,
                factor: 2.54,
            }],
        }
    }

    #[test]
    fn test_well_formed_catalog() {
        let result = validate_catalog(&Catalog::new(vec![length()]));
        assert!(result.is_valid());
        assert!(!result.has_issues(), "{}", result);
    }

    #[test]
    fn test_missing_base_unit() {
        let mut t = length();
        t.units.retain(|u| u.value != "cm");
        let result = validate_catalog(&Catalog::new(vec![t]));
        assert!(!result.is_valid());
        assert!(result.errors[0].message.contains("exactly one metric base unit"));
    }

    #[test]
    fn test_two_base_units() {
        let mut t = length();
        t.units.push(unit("mm", System::Metric, None, true));
        let result = validate_catalog(&Catalog::new(vec![t]));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].severity, IssueSeverity::Error);
    }

    #[test]
    fn test_bad_factors() {
        let mut t = length();
        t.units.push(unit("km", System::Metric, Some(0.0), false));
        t.units.push(unit("ft", System::Imperial, None, false));
        t.units[0].conversion = Some(1.0);
        let result = validate_catalog(&Catalog::new(vec![t]));
        assert_eq!(result.errors.len(), 3, "{}", result);
    }

    #[test]
    fn test_bridge_checks() {
        let mut t = length();
        t.conversions[0].factor = -1.0;
        t.units.retain(|u| u.system == System::Metric);
        let result = validate_catalog(&Catalog::new(vec![t]));
        // negative factor and a bridge to a system with no units
        assert_eq!(result.errors.len(), 2, "{}", result);
        for error in &result.errors {
            assert_eq!(
                error.location,
                Some(IssueLocation::Bridge {
                    unit_type: "length".to_string(),
                    index: 0,
                })
            );
        }
        assert!(result.to_string().contains("[length/conversions[0]]"));
    }

    #[test]
    fn test_missing_bridge_is_warning() {
        let mut t = length();
        t.conversions.clear();
        let result = validate_catalog(&Catalog::new(vec![t]));
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_shadowed_identifier() {
        let mut other = length();
        other.name = "distance".to_string();
        let result = validate_catalog(&Catalog::new(vec![length(), other]));
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(
            result.warnings[0].location,
            Some(IssueLocation::Unit {
                unit_type: "distance".to_string(),
                identifier: "cm".to_string(),
            })
        );
        assert_eq!(result.issues_for("distance").count(), 3);
        assert_eq!(result.issues_for("length").count(), 0);
        assert!(result.to_string().contains("[distance/cm]"));
        assert!(result.to_string().contains("Warnings:"));
    }
}
