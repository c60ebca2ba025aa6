use crate::catalog::Catalog;
use crate::units::error::{Result, UnitError};
use crate::units::kind::ConversionKind;
use crate::units::unit::Unit;
use log::warn;

/// Converts values from a source unit to a target unit of the same type
#[derive(Debug, Clone)]
pub struct UnitConverter<'a> {
    source: Unit<'a>,
    target: Unit<'a>,
}

impl UnitConverter<'static> {
    /// Resolve both identifiers against the embedded catalog
    pub fn new(from: &str, to: &str) -> Self {
        Self::with_catalog(Catalog::global(), from, to)
    }
}

impl<'a> UnitConverter<'a> {
    pub fn with_catalog(catalog: &'a Catalog, from: &str, to: &str) -> Self {
        Self {
            source: Unit::resolve_in(catalog, from),
            target: Unit::resolve_in(catalog, to),
        }
    }

    pub fn source(&self) -> &Unit<'a> {
        &self.source
    }

    pub fn target(&self) -> &Unit<'a> {
        &self.target
    }

    /// Convert `value` from the source unit to the target unit.
    ///
    /// Never fails. Mismatched unit types log a warning and return `value`
    /// unchanged. A cross-system conversion with no bridge for the unit type
    /// logs a warning and converts from an intermediate base value of zero.
    pub fn convert(&self, kind: &ConversionKind, value: f64) -> f64 {
        if let Err(e) = self.check_unit_types() {
            warn!("{}", e);
            return value;
        }

        if value == 0.0 {
            return value;
        }

        if self.source.system() == self.target.system() {
            return self.same_system(kind, value);
        }

        let base = self.source.to_base(kind, value);
        let bridged = match self.bridge(kind, base) {
            Ok(bridged) => bridged,
            Err(e) => {
                warn!("{}", e);
                0.0
            }
        };

        self.target.from_base(kind, bridged, false)
    }

    /// Like `convert`, but mismatched unit types and missing bridges are
    /// errors instead of degraded results
    pub fn try_convert(&self, kind: &ConversionKind, value: f64) -> Result<f64> {
        self.check_unit_types()?;

        if value == 0.0 {
            return Ok(value);
        }

        if self.source.system() == self.target.system() {
            return Ok(self.same_system(kind, value));
        }

        let base = self.source.to_base(kind, value);
        let bridged = self.bridge(kind, base)?;
        Ok(self.target.from_base(kind, bridged, false))
    }

    pub fn convert_cost(&self, value: f64) -> f64 {
        self.convert(&ConversionKind::Cost, value)
    }

    pub fn convert_quantity(&self, value: f64) -> f64 {
        self.convert(&ConversionKind::Quantity, value)
    }

    fn check_unit_types(&self) -> Result<()> {
        if self.source.unit_type() == self.target.unit_type() {
            return Ok(());
        }

        Err(UnitError::MismatchedUnitTypes {
            from_type: self.source.unit_type().unwrap_or("unresolved").to_string(),
            from_text: self.source.text().to_string(),
            to_type: self.target.unit_type().unwrap_or("unresolved").to_string(),
            to_text: self.target.text().to_string(),
        })
    }

    fn same_system(&self, kind: &ConversionKind, value: f64) -> f64 {
        let base = self.source.to_base(kind, value);
        self.target.from_base(kind, base, false)
    }

    /// Move a source base value across to the target system's base unit.
    /// Kinds other than cost and quantity have no bridged value and give zero.
    fn bridge(&self, kind: &ConversionKind, base: f64) -> Result<f64> {
        let no_bridge = || UnitError::NoCrossSystemBridge {
            unit_type: self.source.unit_type().unwrap_or("unresolved").to_string(),
            from: system_name(&self.source),
            to: system_name(&self.target),
        };

        let (unit_type, system) = self
            .source
            .unit_type()
            .zip(self.source.system())
            .ok_or_else(no_bridge)?;

        let bridge = self
            .source
            .catalog()
            .bridge(unit_type, system)
            .ok_or_else(no_bridge)?;

        let bridged = if bridge.start == system {
            match kind {
                ConversionKind::Cost => base * bridge.factor,
                ConversionKind::Quantity => base / bridge.factor,
                ConversionKind::Other(_) => 0.0,
            }
        } else {
            match kind {
                ConversionKind::Cost => base / bridge.factor,
                ConversionKind::Quantity => base * bridge.factor,
                ConversionKind::Other(_) => 0.0,
            }
        };

        Ok(bridged)
    }
}

fn system_name(unit: &Unit<'_>) -> String {
    unit.system()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unresolved".to_string())
}
