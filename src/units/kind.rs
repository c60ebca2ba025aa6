use crate::units::error::UnitError;
use std::fmt;
use std::str::FromStr;

/// Selects how a factor is applied. Prices per unit and amounts of a unit
/// scale inversely when the unit size changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    /// Price per unit
    Cost,
    /// Amount of stuff
    Quantity,
    /// Any other kind; values pass through unchanged
    Other(String),
}

impl ConversionKind {
    pub fn as_str(&self) -> &str {
        match self {
            ConversionKind::Cost => "cost",
            ConversionKind::Quantity => "quantity",
            ConversionKind::Other(name) => name,
        }
    }
}

impl From<&str> for ConversionKind {
    fn from(name: &str) -> Self {
        match name {
            "cost" => ConversionKind::Cost,
            "quantity" => ConversionKind::Quantity,
            other => ConversionKind::Other(other.to_string()),
        }
    }
}

/// Strict parsing, for inputs where an unknown kind is a user mistake
impl FromStr for ConversionKind {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ConversionKind::from(s.trim().to_lowercase().as_str()) {
            ConversionKind::Other(name) => Err(UnitError::UnknownKind(name)),
            kind => Ok(kind),
        }
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
