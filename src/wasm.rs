// WebAssembly bindings for the converter
use crate::catalog::Catalog;
use crate::units::{ConversionKind, Unit, UnitConverter};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct UnitConverterWasm {
    inner: UnitConverter<'static>,
}

#[wasm_bindgen]
impl UnitConverterWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            inner: UnitConverter::new(from, to),
        }
    }

    /// Convert with a kind name; kinds other than "cost" and "quantity"
    /// pass the value through
    #[wasm_bindgen]
    pub fn convert(&self, kind: &str, value: f64) -> f64 {
        self.inner.convert(&ConversionKind::from(kind), value)
    }

    #[wasm_bindgen(js_name = convertCost)]
    pub fn convert_cost(&self, value: f64) -> f64 {
        self.inner.convert_cost(value)
    }

    #[wasm_bindgen(js_name = convertQuantity)]
    pub fn convert_quantity(&self, value: f64) -> f64 {
        self.inner.convert_quantity(value)
    }

    /// Strict conversion; mismatched unit types and missing bridges throw
    #[wasm_bindgen(js_name = tryConvert)]
    pub fn try_convert(&self, kind: &str, value: f64) -> Result<f64, JsValue> {
        self.inner
            .try_convert(&ConversionKind::from(kind), value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Resolved unit as a JSON string
#[wasm_bindgen(js_name = describeUnit)]
pub fn describe_unit(identifier: &str) -> Result<String, JsValue> {
    serde_json::to_string(&Unit::new(identifier))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize unit: {}", e)))
}

/// Base unit identifier for a unit, throwing for unresolved units
#[wasm_bindgen(js_name = baseUnit)]
pub fn base_unit(identifier: &str) -> Result<String, JsValue> {
    Unit::new(identifier)
        .base_unit_identifier()
        .map(|id| id.to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Identifiers of one unit type, in catalog order
#[wasm_bindgen(js_name = unitIdentifiers)]
pub fn unit_identifiers(unit_type: &str) -> js_sys::Array {
    Catalog::global()
        .units_in(unit_type)
        .iter()
        .map(|def| JsValue::from_str(&def.value))
        .collect()
}
