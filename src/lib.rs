pub mod catalog;
pub mod units;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use catalog::{Catalog, System};
pub use units::{ConversionKind, Unit, UnitConverter, UnitError};
