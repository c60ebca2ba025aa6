use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnitError {
    #[error("Unresolved unit: {0}")]
    UnresolvedUnit(String),

    #[error("No base unit defined for {unit_type} ({system})")]
    MissingBaseUnit { unit_type: String, system: String },

    #[error("Cannot convert from {from_type}:{from_text} to {to_type}:{to_text}")]
    MismatchedUnitTypes {
        from_type: String,
        from_text: String,
        to_type: String,
        to_text: String,
    },

    #[error("No cross-system conversion for {unit_type} from {from} to {to}")]
    NoCrossSystemBridge {
        unit_type: String,
        from: String,
        to: String,
    },

    #[error("Unknown conversion kind: {0}")]
    UnknownKind(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, UnitError>;
