//! Duplicate-name detection for the bird type and presentation catalogs

use uuid::Uuid;

use crate::models::{BirdType, PresentationType};

/// Trim surrounding whitespace and lowercase
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn same_name(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Whether a bird type with this name already exists
pub fn is_duplicate_bird_type(candidate: &str, existing: &[BirdType]) -> bool {
    existing.iter().any(|t| same_name(&t.name, candidate))
}

/// Like [`is_duplicate_bird_type`], ignoring the entry being edited
pub fn is_duplicate_bird_type_except(candidate: &str, existing: &[BirdType], exclude: Uuid) -> bool {
    existing
        .iter()
        .filter(|t| t.id != exclude)
        .any(|t| same_name(&t.name, candidate))
}

/// Whether `owner` already has a presentation with this name.
///
/// The owner is matched exactly; only the presentation name is normalized.
pub fn is_duplicate_presentation(
    candidate: &str,
    owner: &str,
    existing: &[PresentationType],
) -> bool {
    existing
        .iter()
        .any(|p| p.belongs_to(owner) && same_name(&p.name, candidate))
}

/// Like [`is_duplicate_presentation`], ignoring the entry being edited
pub fn is_duplicate_presentation_except(
    candidate: &str,
    owner: &str,
    existing: &[PresentationType],
    exclude: Uuid,
) -> bool {
    existing
        .iter()
        .filter(|p| p.id != exclude)
        .any(|p| p.belongs_to(owner) && same_name(&p.name, candidate))
}
