use crate::catalog::{Catalog, System};
use crate::units::error::{Result, UnitError};
use crate::units::formatter::round2;
use crate::units::kind::ConversionKind;
use log::debug;
use serde::Serialize;

/// A unit identifier resolved against a catalog.
///
/// Identifiers missing from the catalog do not fail: the unit stays
/// unresolved, with no unit type, system or factor, and its text is the raw
/// identifier. Arithmetic on an unresolved unit yields NaN.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit<'a> {
    #[serde(skip)]
    catalog: &'a Catalog,
    value: String,
    text: String,
    unit_type: Option<&'a str>,
    system: Option<System>,
    conversion: Option<f64>,
    base_unit: bool,
}

impl Unit<'static> {
    /// Resolve against the embedded catalog
    pub fn new(identifier: &str) -> Self {
        Self::resolve_in(Catalog::global(), identifier)
    }
}

impl<'a> Unit<'a> {
    /// Resolve against `catalog`. The first unit type (in declaration order)
    /// defining the identifier wins.
    pub fn resolve_in(catalog: &'a Catalog, identifier: &str) -> Self {
        match catalog.find_unit(identifier) {
            Some((unit_type, def)) => Self {
                catalog,
                value: identifier.to_string(),
                text: def.text.clone(),
                unit_type: Some(unit_type.name.as_str()),
                system: Some(def.system),
                conversion: def.conversion,
                base_unit: def.base_unit,
            },
            None => {
                debug!("Unit '{}' not found in catalog", identifier);
                Self {
                    catalog,
                    value: identifier.to_string(),
                    text: identifier.to_string(),
                    unit_type: None,
                    system: None,
                    conversion: None,
                    base_unit: false,
                }
            }
        }
    }

    pub fn identifier(&self) -> &str {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn unit_type(&self) -> Option<&'a str> {
        self.unit_type
    }

    pub fn system(&self) -> Option<System> {
        self.system
    }

    pub fn conversion(&self) -> Option<f64> {
        self.conversion
    }

    pub fn is_base_unit(&self) -> bool {
        self.base_unit
    }

    pub fn is_resolved(&self) -> bool {
        self.unit_type.is_some()
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    fn factor(&self) -> f64 {
        self.conversion.unwrap_or(f64::NAN)
    }

    /// Express `value`, given in this unit, in the base unit of its system
    pub fn to_base(&self, kind: &ConversionKind, value: f64) -> f64 {
        if self.base_unit {
            return value;
        }

        match kind {
            ConversionKind::Cost => value / self.factor(),
            ConversionKind::Quantity => value * self.factor(),
            ConversionKind::Other(_) => value,
        }
    }

    /// Express a base-unit `value` in this unit. `round` rounds to two
    /// decimals on every branch; use `to_fixed` for the textual form.
    pub fn from_base(&self, kind: &ConversionKind, value: f64, round: bool) -> f64 {
        let converted = if self.base_unit {
            value
        } else {
            match kind {
                ConversionKind::Cost => value * self.factor(),
                ConversionKind::Quantity => value / self.factor(),
                ConversionKind::Other(_) => value,
            }
        };

        if round {
            round2(converted)
        } else {
            converted
        }
    }

    /// Identifier of the base unit sharing this unit's type and system
    pub fn base_unit_identifier(&self) -> Result<&'a str> {
        let (unit_type, system) = self
            .unit_type
            .zip(self.system)
            .ok_or_else(|| UnitError::UnresolvedUnit(self.value.clone()))?;

        self.catalog
            .base_unit(unit_type, system)
            .map(|def| def.value.as_str())
            .ok_or_else(|| UnitError::MissingBaseUnit {
                unit_type: unit_type.to_string(),
                system: system.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{UnitDefinition, UnitType};
    use crate::units::formatter::to_fixed;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolve_known_unit() {
        let unit = Unit::new("kg");
        assert!(unit.is_resolved());
        assert_eq!(unit.identifier(), "kg");
        assert_eq!(unit.text(), "Kilogram");
        assert_eq!(unit.unit_type(), Some("weight"));
        assert_eq!(unit.system(), Some(System::Metric));
        assert_eq!(unit.conversion(), Some(1000.0));
        assert!(!unit.is_base_unit());
    }

    #[test]
    fn test_resolve_unknown_unit() {
        let unit = Unit::new("bogus-unit");
        assert!(!unit.is_resolved());
        assert_eq!(unit.text(), "bogus-unit");
        assert_eq!(unit.unit_type(), None);
        assert_eq!(unit.system(), None);
        assert_eq!(unit.conversion(), None);
        assert!(!unit.is_base_unit());
    }

    #[test]
    fn test_to_base() {
        let kg = Unit::new("kg");
        assert_eq!(kg.to_base(&ConversionKind::Quantity, 2.0), 2000.0);
        assert_eq!(kg.to_base(&ConversionKind::Cost, 5.0), 0.005);
        assert_eq!(kg.to_base(&ConversionKind::from("volume"), 5.0), 5.0);

        let g = Unit::new("g");
        assert_eq!(g.to_base(&ConversionKind::Cost, 5.0), 5.0);
    }

    #[test]
    fn test_from_base() {
        let lb = Unit::new("lb");
        assert_eq!(lb.from_base(&ConversionKind::Quantity, 32.0, false), 2.0);
        assert_eq!(lb.from_base(&ConversionKind::Cost, 0.5, false), 8.0);
        assert_eq!(lb.from_base(&ConversionKind::from("other"), 0.5, false), 0.5);
    }

    #[test]
    fn test_from_base_rounding() {
        let oz = Unit::new("oz");
        let rounded = oz.from_base(&ConversionKind::Quantity, 3.1, true);
        assert_eq!(to_fixed(rounded), "3.10");

        let cup = Unit::new("cup");
        assert_eq!(cup.from_base(&ConversionKind::Quantity, 100.0, true), 2.08);

        // rounding never turns a finite value into infinity
        let g = Unit::new("g");
        assert_eq!(g.from_base(&ConversionKind::Quantity, 1e307, true), 1e307);
        let mg = Unit::new("mg");
        assert!(mg.from_base(&ConversionKind::Quantity, 1e300, true).is_finite());
    }

    #[test]
    fn test_round_trip() {
        for id in ["mg", "kg", "lb", "l", "gal", "tbsp", "mm", "km", "mi", "dozen"] {
            let unit = Unit::new(id);
            for kind in [ConversionKind::Cost, ConversionKind::Quantity] {
                for v in [0.25, 1.0, 17.5, 12345.678] {
                    let back = unit.from_base(&kind, unit.to_base(&kind, v), false);
                    assert_relative_eq!(back, v, max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_unresolved_arithmetic_is_nan() {
        let unit = Unit::new("bogus-unit");
        assert!(unit.to_base(&ConversionKind::Quantity, 3.0).is_nan());
        assert!(unit.from_base(&ConversionKind::Cost, 3.0, true).is_nan());
        assert_eq!(unit.to_base(&ConversionKind::from("other"), 3.0), 3.0);
    }

    #[test]
    fn test_base_unit_identifier() {
        assert_eq!(Unit::new("kg").base_unit_identifier().unwrap(), "g");
        assert_eq!(Unit::new("lb").base_unit_identifier().unwrap(), "oz");
        assert_eq!(Unit::new("tsp").base_unit_identifier().unwrap(), "tsp");
        assert_eq!(Unit::new("gross").base_unit_identifier().unwrap(), "ea");
    }

    #[test]
    fn test_base_unit_identifier_unresolved() {
        let result = Unit::new("bogus-unit").base_unit_identifier();
        assert!(matches!(result, Err(UnitError::UnresolvedUnit(id)) if id == "bogus-unit"));
    }

    #[test]
    fn test_base_unit_identifier_missing_base() {
        // Built directly, skipping validation
        let catalog = Catalog::new(vec![UnitType {
            name: "weight".to_string(),
            units: vec![UnitDefinition {
                value: "kg".to_string(),
                text: "Kilogram".to_string(),
                system: System::Metric,
                conversion: Some(1000.0),
                base_unit: false,
            }],
            conversions: vec![],
        }]);

        let unit = Unit::resolve_in(&catalog, "kg");
        match unit.base_unit_identifier() {
            Err(UnitError::MissingBaseUnit { unit_type, system }) => {
                assert_eq!(unit_type, "weight");
                assert_eq!(system, "metric");
            }
            other => panic!("Expected MissingBaseUnit, got {:?}", other),
        }
    }

    #[test]
    fn test_serialize_unit() {
        let json = serde_json::to_value(Unit::new("floz")).unwrap();
        assert_eq!(json["text"], "Fluid Ounce");
        assert_eq!(json["unitType"], "volume");
        assert_eq!(json["system"], "imperial");
        assert_eq!(json["baseUnit"], false);
        assert!(json.get("catalog").is_none());
    }
}
