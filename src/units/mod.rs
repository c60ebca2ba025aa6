// Unit resolution and value conversion between units of one unit type

pub mod converter;
pub mod detector;
pub mod error;
pub mod formatter;
pub mod kind;
pub mod unit;


pub use converter::UnitConverter;
pub use detector::{looks_like_amount, parse_amount, parse_value};
pub use error::{Result, UnitError};
pub use formatter::{format_amount, round2, to_fixed};
pub use kind::ConversionKind;
pub use unit::Unit;
