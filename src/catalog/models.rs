use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurement convention a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    Metric,
    Imperial,
}

impl System {
    pub fn as_str(&self) -> &'static str {
        match self {
            System::Metric => "metric",
            System::Imperial => "imperial",
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UnitDefinition {
    /// Identifier, unique within its unit type (e.g. "kg")
    pub value: String,
    pub text: String,
    pub system: System,

    /// Number of base units in one of this unit. Absent for the base unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion: Option<f64>,

    #[serde(rename = "baseUnit", default)]
    pub base_unit: bool,
}

/// Bridge between the base units of two systems: one `end` base unit
/// equals `factor` `start` base units (28.3495 g per oz, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Bridge {
    pub start: System,
    pub end: System,
    pub factor: f64,
}

impl Bridge {
    pub fn touches(&self, system: System) -> bool {
        self.start == system || self.end == system
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnitType {
    pub name: String,

    #[serde(default)]
    pub units: Vec<UnitDefinition>,

    #[serde(default)]
    pub conversions: Vec<Bridge>,
}

impl UnitType {
    pub fn find(&self, identifier: &str) -> Option<&UnitDefinition> {
        self.units.iter().find(|u| u.value == identifier)
    }

    pub fn base_unit(&self, system: System) -> Option<&UnitDefinition> {
        self.units
            .iter()
            .find(|u| u.system == system && u.base_unit)
    }

    /// First bridge whose start or end is `system`, in declaration order
    pub fn bridge_for(&self, system: System) -> Option<&Bridge> {
        self.conversions.iter().find(|b| b.touches(system))
    }

    /// Systems used by this type's units, in first-seen order
    pub fn systems(&self) -> Vec<System> {
        let mut systems = Vec::new();
        for unit in &self.units {
            if !systems.contains(&unit.system) {
                systems.push(unit.system);
            }
        }
        systems
    }
}

/// Ordered, read-only table of unit types. Declaration order is the
/// tie-break when an identifier appears in more than one type.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    unit_types: Vec<UnitType>,
}

impl Catalog {
    pub fn new(unit_types: Vec<UnitType>) -> Self {
        Self { unit_types }
    }

    pub fn unit_types(&self) -> &[UnitType] {
        &self.unit_types
    }

    pub fn unit_type(&self, name: &str) -> Option<&UnitType> {
        self.unit_types.iter().find(|t| t.name == name)
    }

    pub fn units_in(&self, name: &str) -> &[UnitDefinition] {
        self.unit_type(name)
            .map(|t| t.units.as_slice())
            .unwrap_or_default()
    }

    pub fn find_unit(&self, identifier: &str) -> Option<(&UnitType, &UnitDefinition)> {
        self.unit_types
            .iter()
            .find_map(|t| t.find(identifier).map(|def| (t, def)))
    }

    pub fn base_unit(&self, unit_type: &str, system: System) -> Option<&UnitDefinition> {
        self.unit_type(unit_type)
            .and_then(|t| t.base_unit(system))
    }

    pub fn bridge(&self, unit_type: &str, system: System) -> Option<&Bridge> {
        self.unit_type(unit_type)
            .and_then(|t| t.bridge_for(system))
    }

    pub fn is_empty(&self) -> bool {
        self.unit_types.is_empty()
    }
}
