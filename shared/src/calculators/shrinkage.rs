//! Shrinkage (merma) projections for product presentations

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PresentationType;

/// Sample sizes shown next to every presentation in the catalog
pub const PREVIEW_QUANTITIES: [u32; 2] = [100, 500];

/// Shrinkage for a single bird
pub fn per_bird(shrinkage_kg_per_bird: Decimal) -> Decimal {
    shrinkage_kg_per_bird
}

/// Shrinkage for `quantity` birds, rounded to 2 decimal places.
/// Overflow saturates toward the sign of the per-bird figure.
pub fn for_quantity(shrinkage_kg_per_bird: Decimal, quantity: u32) -> Decimal {
    let saturated = if shrinkage_kg_per_bird.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    shrinkage_kg_per_bird
        .checked_mul(Decimal::from(quantity))
        .unwrap_or(saturated)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Projected shrinkage at one sample size
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShrinkagePoint {
    pub quantity: u32,
    pub shrinkage_kg: Decimal,
}

/// Shrinkage figures for a presentation card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShrinkagePreview {
    pub presentation_id: Uuid,
    pub bird_type: String,
    pub presentation: String,
    pub per_bird_kg: Decimal,
    pub points: Vec<ShrinkagePoint>,
    /// Figures are nominal; actual shrinkage varies
    pub variable: bool,
}

/// Preview at the standard sample sizes
pub fn preview(presentation: &PresentationType) -> ShrinkagePreview {
    preview_at(presentation, &PREVIEW_QUANTITIES)
}

/// Preview at arbitrary sample sizes
pub fn preview_at(presentation: &PresentationType, quantities: &[u32]) -> ShrinkagePreview {
    ShrinkagePreview {
        presentation_id: presentation.id,
        bird_type: presentation.bird_type.clone(),
        presentation: presentation.name.clone(),
        per_bird_kg: per_bird(presentation.shrinkage_kg),
        points: quantities
            .iter()
            .map(|&quantity| ShrinkagePoint {
                quantity,
                shrinkage_kg: for_quantity(presentation.shrinkage_kg, quantity),
            })
            .collect(),
        variable: presentation.variable,
    }
}
