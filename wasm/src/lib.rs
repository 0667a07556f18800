//! WebAssembly module for the Avicola Admin dashboard
//!
//! Provides client-side computation for:
//! - Batch totals and male/female auto-balancing
//! - Shrinkage (merma) previews
//! - Duplicate checks before inserting catalog entries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

use shared::{calculators, input};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("avicola-admin calculators loaded"));
}

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

// ============================================================================
// Bird batches
// ============================================================================

/// Raw inventory form fields as typed by the user
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchFormFields {
    #[serde(alias = "javas")]
    crates: Option<String>,
    #[serde(alias = "avesPorJava")]
    per_crate: Option<String>,
    #[serde(alias = "machos")]
    males: Option<String>,
    #[serde(alias = "hembras")]
    females: Option<String>,
}

/// Live figures shown while the inventory form is being filled in
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct BatchFigures {
    total: u32,
    suggested_females: u32,
    sum: u32,
    difference: i64,
    is_balanced: bool,
}

fn batch_figures(fields: &BatchFormFields) -> BatchFigures {
    let total = calculators::compute_total_raw(fields.crates.as_deref(), fields.per_crate.as_deref());
    let males = input::coerce_count(fields.males.as_deref());
    let suggested_females = calculators::compute_complementary_females(total, males);
    let females = match fields.females.as_deref().map(str::trim) {
        None | Some("") => suggested_females,
        Some(raw) => input::coerce_count(Some(raw)),
    };
    let reconciliation = calculators::reconcile(total, males, females);

    BatchFigures {
        total,
        suggested_females,
        sum: reconciliation.sum,
        difference: reconciliation.difference,
        is_balanced: reconciliation.is_balanced,
    }
}

/// Total birds from the crate and birds-per-crate fields
#[wasm_bindgen(js_name = computeTotal)]
pub fn compute_total(crates: &str, per_crate: &str) -> u32 {
    calculators::compute_total_raw(Some(crates), Some(per_crate))
}

/// Female count that balances the typed male count
#[wasm_bindgen(js_name = computeComplementaryFemales)]
pub fn compute_complementary_females(total: u32, males: &str) -> u32 {
    calculators::compute_complementary_females(total, input::coerce_count(Some(males)))
}

/// Whether males + females match the total of a non-empty batch
#[wasm_bindgen(js_name = isSexSplitBalanced)]
pub fn is_sex_split_balanced(total: u32, males: u32, females: u32) -> bool {
    calculators::reconcile(total, males, females).is_balanced
}

/// All live figures for the inventory form, as JSON
#[wasm_bindgen(js_name = previewBatch)]
pub fn preview_batch(form_json: &str) -> Result<String, JsValue> {
    let fields: BatchFormFields =
        serde_json::from_str(form_json).map_err(|e| js_error("Invalid batch form JSON", e))?;
    serde_json::to_string(&batch_figures(&fields)).map_err(|e| js_error("Serialization failed", e))
}

// ============================================================================
// Shrinkage
// ============================================================================

/// Shrinkage for a quantity, formatted with two decimals
#[wasm_bindgen(js_name = shrinkageForQuantity)]
pub fn shrinkage_for_quantity(shrinkage_kg: &str, quantity: u32) -> String {
    let kg = input::coerce_kg(Some(shrinkage_kg));
    format_kg(calculators::for_quantity(kg, quantity))
}

fn format_kg(value: Decimal) -> String {
    format!("{:.2}", value)
}

/// Preview card for a presentation, as JSON
#[wasm_bindgen(js_name = shrinkagePreview)]
pub fn shrinkage_preview(presentation_json: &str) -> Result<String, JsValue> {
    let presentation: PresentationType = serde_json::from_str(presentation_json)
        .map_err(|e| js_error("Invalid presentation JSON", e))?;
    serde_json::to_string(&calculators::preview(&presentation))
        .map_err(|e| js_error("Serialization failed", e))
}

// ============================================================================
// Catalog duplicates
// ============================================================================

/// Checkbox state of the bird type form after ticking one of its flags.
/// `flag` is "sex" or "variety"; ticking one clears the other.
#[wasm_bindgen(js_name = toggleBirdTypeFlag)]
pub fn toggle_bird_type_flag(flags_json: &str, flag: &str, checked: bool) -> Result<String, JsValue> {
    let flags: BirdTypeFlags =
        serde_json::from_str(flags_json).map_err(|e| js_error("Invalid flags JSON", e))?;
    let flags = apply_flag(flags, flag, checked).ok_or_else(|| js_error("Unknown flag", flag))?;
    serde_json::to_string(&flags).map_err(|e| js_error("Serialization failed", e))
}

fn apply_flag(flags: BirdTypeFlags, flag: &str, checked: bool) -> Option<BirdTypeFlags> {
    match flag {
        "sex" | "sexo" => Some(flags.select_sex(checked)),
        "variety" | "variedad" => Some(flags.select_variety(checked)),
        _ => None,
    }
}

/// Catalog rows as sent by the browser; only the fields the check needs
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "nombre")]
    name: String,
    #[serde(default, alias = "tipoAve", alias = "birdType")]
    bird_type: String,
}

fn parse_rows(rows_json: &str) -> Result<Vec<CatalogRow>, serde_json::Error> {
    serde_json::from_str(rows_json)
}

fn duplicate_bird_type(candidate: &str, rows: Vec<CatalogRow>) -> bool {
    let existing: Vec<BirdType> = rows.into_iter().map(|r| BirdType::new(r.name)).collect();
    calculators::is_duplicate_bird_type(candidate, &existing)
}

fn duplicate_presentation(candidate: &str, owner: &str, rows: Vec<CatalogRow>) -> bool {
    let existing: Vec<PresentationType> = rows
        .into_iter()
        .map(|r| PresentationType::new(r.bird_type, r.name, Decimal::ZERO))
        .collect();
    calculators::is_duplicate_presentation(candidate, owner, &existing)
}

/// Whether a bird type name is already taken
#[wasm_bindgen(js_name = isDuplicateBirdType)]
pub fn is_duplicate_bird_type(candidate: &str, types_json: &str) -> Result<bool, JsValue> {
    let rows = parse_rows(types_json).map_err(|e| js_error("Invalid bird types JSON", e))?;
    Ok(duplicate_bird_type(candidate, rows))
}

/// Whether a presentation name is already taken for the given bird type
#[wasm_bindgen(js_name = isDuplicatePresentation)]
pub fn is_duplicate_presentation(
    candidate: &str,
    owner: &str,
    presentations_json: &str,
) -> Result<bool, JsValue> {
    let rows =
        parse_rows(presentations_json).map_err(|e| js_error("Invalid presentations JSON", e))?;
    Ok(duplicate_presentation(candidate, owner, rows))
}
