//! WASM bindings for financial document extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Text recognition happens on the JavaScript side; these bindings take the
//! recognized text and return plain JS objects.

use wasm_bindgen::prelude::*;

use fdx_core::address::{expand_street_type, parse_address_description};
use fdx_core::extract::rules::{classify, extract_amounts as find_amounts};
use fdx_core::extract::{DocumentExtractor, FinancialExtractor};
use fdx_core::survey::{boundary_measurements, Coordinate};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Extract a financial record from recognized document text.
///
/// Throws when the text holds no `$` amount.
#[wasm_bindgen]
pub fn extract_financial_record(
    text: &str,
    source_file_name: &str,
    external_reference_id: &str,
) -> Result<JsValue, JsValue> {
    let record = FinancialExtractor::new()
        .extract(text, source_file_name, external_reference_id)
        .map_err(to_js_error)?;

    to_js(&record)
}

/// Every `$` amount in the text, as decimal strings in order of appearance.
#[wasm_bindgen]
pub fn extract_amounts(text: &str) -> js_sys::Array {
    find_amounts(text)
        .iter()
        .map(|amount| JsValue::from_str(&amount.to_string()))
        .collect()
}

/// Document category: `invoice`, `receipt`, `quote`, `bill` or `unknown`.
#[wasm_bindgen]
pub fn classify_document(text: &str) -> String {
    classify(text).as_str().to_string()
}

/// Split a one-line address into its components.
#[wasm_bindgen]
pub fn parse_address(description: &str, expand: bool) -> Result<JsValue, JsValue> {
    let mut components = parse_address_description(description);
    if expand && !components.street_type.is_empty() {
        components.street_type = expand_street_type(&components.street_type);
    }
    to_js(&components)
}

/// Perimeter (metres) and area of a boundary given as `[[x, y], ...]`.
#[wasm_bindgen]
pub fn measure_boundary(points: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<[f64; 2]> = serde_wasm_bindgen::from_value(points).map_err(to_js_error)?;
    let points: Vec<Coordinate> = points.into_iter().map(Coordinate::from).collect();

    to_js(&boundary_measurements(&points))
}

/// Financial document extractor class for browser use.
#[wasm_bindgen]
pub struct FinancialDocumentExtractor {
    extractor: FinancialExtractor,
}

#[wasm_bindgen]
impl FinancialDocumentExtractor {
    /// Create an extractor with the default labels.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: FinancialExtractor::new(),
        }
    }

    /// Replace the vendor labels, highest priority first.
    #[wasm_bindgen]
    pub fn set_vendor_labels(&mut self, labels: JsValue) -> Result<(), JsValue> {
        let labels: Vec<String> = serde_wasm_bindgen::from_value(labels).map_err(to_js_error)?;
        self.extractor = self.extractor.clone().with_vendor_labels(labels);
        Ok(())
    }

    /// Replace the description labels, highest priority first.
    #[wasm_bindgen]
    pub fn set_description_labels(&mut self, labels: JsValue) -> Result<(), JsValue> {
        let labels: Vec<String> = serde_wasm_bindgen::from_value(labels).map_err(to_js_error)?;
        self.extractor = self.extractor.clone().with_description_labels(labels);
        Ok(())
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
    ) -> Result<JsValue, JsValue> {
        let record = self
            .extractor
            .extract(text, source_file_name, external_reference_id)
            .map_err(to_js_error)?;

        to_js(&record)
    }

    /// Extract a record with confidence, warnings and a reference number.
    #[wasm_bindgen]
    pub fn analyze(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
    ) -> Result<JsValue, JsValue> {
        let result = self
            .extractor
            .analyze(text, source_file_name, external_reference_id)
            .map_err(to_js_error)?;

        for warning in &result.warnings {
            web_sys::console::warn_1(&JsValue::from_str(warning));
        }

        to_js(&result)
    }
}

impl Default for FinancialDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
