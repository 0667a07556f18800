//! Catalog service for bird types and product presentations

use serde::Deserialize;
use shared::calculators::{self, ShrinkagePreview};
use shared::models::{BirdType, PresentationType};
use shared::types::ColorToken;
use shared::{input, validation};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::{self, Store};

/// Catalog service for managing bird types and their presentations
#[derive(Clone)]
pub struct CatalogService {
    store: Store,
    preview_quantities: Vec<u32>,
}

/// Input for creating or editing a bird type
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BirdTypeInput {
    #[validate(length(min = 1, max = 60, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub has_sex: bool,
    #[serde(default)]
    pub has_variety: bool,
    #[serde(default)]
    pub varieties: Vec<String>,
    #[serde(default)]
    pub color: ColorToken,
}

/// Input for creating or editing a presentation
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PresentationInput {
    #[validate(length(min = 1, message = "Bird type is required"))]
    pub bird_type: String,
    #[validate(length(min = 1, max = 60, message = "Name is required"))]
    pub name: String,
    /// Shrinkage per bird in kg, as typed
    pub shrinkage_kg: String,
    #[serde(default)]
    pub variable: bool,
}

/// Bird type fields after validation
struct CleanBirdType {
    name: String,
    has_sex: bool,
    has_variety: bool,
    varieties: Vec<String>,
    color: ColorToken,
}

impl BirdTypeInput {
    fn clean(self) -> AppResult<CleanBirdType> {
        self.validate()?;
        validation::validate_required(&self.name).map_err(|e| AppError::validation("name", e))?;

        let varieties: Vec<String> = self
            .varieties
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        validation::validate_bird_type_flags(self.has_variety, &varieties)
            .map_err(|e| AppError::validation("varieties", e))?;

        Ok(CleanBirdType {
            name: self.name.trim().to_string(),
            has_sex: self.has_sex,
            has_variety: self.has_variety,
            varieties,
            color: self.color,
        })
    }
}

/// Presentation fields after validation
struct CleanPresentation {
    bird_type: String,
    name: String,
    shrinkage_kg: rust_decimal::Decimal,
    variable: bool,
}

impl PresentationInput {
    fn clean(self) -> AppResult<CleanPresentation> {
        self.validate()?;
        validation::validate_required(&self.name).map_err(|e| AppError::validation("name", e))?;

        let shrinkage_kg = input::parse_kg(&self.shrinkage_kg)
            .map_err(|e| AppError::invalid_input("shrinkage_kg", e))?;
        validation::validate_shrinkage(shrinkage_kg)
            .map_err(|e| AppError::validation("shrinkage_kg", e))?;

        Ok(CleanPresentation {
            bird_type: self.bird_type.trim().to_string(),
            name: self.name.trim().to_string(),
            shrinkage_kg,
            variable: self.variable,
        })
    }
}

/// Resolve a bird type by name, ignoring case and surrounding whitespace
pub(crate) fn lookup_bird_type<'a>(types: &'a [BirdType], name: &str) -> Option<&'a BirdType> {
    let wanted = calculators::normalize_name(name);
    types
        .iter()
        .find(|t| calculators::normalize_name(&t.name) == wanted)
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(store: Store) -> Self {
        Self {
            store,
            preview_quantities: calculators::PREVIEW_QUANTITIES.to_vec(),
        }
    }

    /// Use custom sample sizes for shrinkage previews
    pub fn with_preview_quantities(mut self, quantities: Vec<u32>) -> Self {
        self.preview_quantities = quantities;
        self
    }

    // ========================================================================
    // Bird types
    // ========================================================================

    /// List bird types in catalog order
    pub fn list_bird_types(&self) -> AppResult<Vec<BirdType>> {
        self.store.read(|data| data.bird_types.clone())
    }

    /// Get a bird type by id
    pub fn get_bird_type(&self, id: Uuid) -> AppResult<BirdType> {
        self.store
            .read(|data| store::find(&data.bird_types, id, "Bird type").cloned())?
    }

    /// Find a bird type by name
    pub fn find_bird_type(&self, name: &str) -> AppResult<BirdType> {
        self.store
            .read(|data| lookup_bird_type(&data.bird_types, name).cloned())?
            .ok_or_else(|| AppError::NotFound("Bird type".to_string()))
    }

    /// Create a bird type; the name must not collide with an existing one
    pub fn create_bird_type(&self, input: BirdTypeInput) -> AppResult<BirdType> {
        let clean = input.clean()?;

        let bird_type = self.store.write(|data| {
            if calculators::is_duplicate_bird_type(&clean.name, &data.bird_types) {
                tracing::warn!(name = %clean.name, "Rejected duplicate bird type");
                return Err(AppError::DuplicateEntry("bird type".to_string()));
            }

            let bird_type = BirdType {
                id: Uuid::new_v4(),
                name: clean.name,
                has_sex: clean.has_sex,
                has_variety: clean.has_variety,
                varieties: clean.varieties,
                color: clean.color,
            };
            data.bird_types.push(bird_type.clone());
            Ok(bird_type)
        })?;

        tracing::info!(id = %bird_type.id, name = %bird_type.name, "Created bird type");
        Ok(bird_type)
    }

    /// Edit a bird type in place. A rename is carried over to its presentations
    /// and inventory batches, which reference the type by name. While batches
    /// reference it, its sex and variety flags are fixed and varieties those
    /// batches use cannot be dropped.
    pub fn update_bird_type(&self, id: Uuid, input: BirdTypeInput) -> AppResult<BirdType> {
        let clean = input.clean()?;

        let (bird_type, old_name) = self.store.write(|data| {
            if calculators::is_duplicate_bird_type_except(&clean.name, &data.bird_types, id) {
                tracing::warn!(name = %clean.name, "Rejected duplicate bird type");
                return Err(AppError::DuplicateEntry("bird type".to_string()));
            }

            let current = store::find(&data.bird_types, id, "Bird type")?;
            let flags_changed =
                current.has_sex != clean.has_sex || current.has_variety != clean.has_variety;
            let breaks_batches = data
                .batches
                .iter()
                .filter(|b| b.bird_type == current.name)
                .any(|b| {
                    flags_changed
                        || b.variety
                            .as_deref()
                            .is_some_and(|v| !clean.varieties.iter().any(|kept| kept == v))
                });
            if breaks_batches {
                tracing::warn!(id = %id, name = %current.name, "Rejected bird type change used by batches");
                return Err(AppError::InUse(format!("Bird type '{}'", current.name)));
            }

            let existing = store::find_mut(&mut data.bird_types, id, "Bird type")?;
            let old_name = std::mem::replace(&mut existing.name, clean.name);
            existing.has_sex = clean.has_sex;
            existing.has_variety = clean.has_variety;
            existing.varieties = clean.varieties;
            existing.color = clean.color;
            let updated = existing.clone();

            if old_name != updated.name {
                for presentation in data.presentations.iter_mut().filter(|p| p.belongs_to(&old_name)) {
                    presentation.bird_type = updated.name.clone();
                }
                for batch in data.batches.iter_mut().filter(|b| b.bird_type == old_name) {
                    batch.bird_type = updated.name.clone();
                }
            }
            Ok((updated, old_name))
        })?;

        tracing::info!(id = %id, old_name = %old_name, name = %bird_type.name, "Updated bird type");
        Ok(bird_type)
    }

    /// Delete a bird type and its presentations. Refused while inventory
    /// batches still reference it.
    pub fn delete_bird_type(&self, id: Uuid) -> AppResult<()> {
        let removed = self.store.write(|data| {
            let name = store::find(&data.bird_types, id, "Bird type")?.name.clone();
            if data.batches.iter().any(|b| b.bird_type == name) {
                return Err(AppError::InUse(format!("Bird type '{}'", name)));
            }

            let removed = store::remove(&mut data.bird_types, id, "Bird type")?;
            data.presentations.retain(|p| !p.belongs_to(&removed.name));
            Ok(removed)
        })?;

        tracing::info!(id = %id, name = %removed.name, "Deleted bird type");
        Ok(())
    }

    // ========================================================================
    // Presentations
    // ========================================================================

    /// List presentations, optionally only those of one bird type
    pub fn list_presentations(&self, bird_type: Option<&str>) -> AppResult<Vec<PresentationType>> {
        self.store.read(|data| {
            data.presentations
                .iter()
                .filter(|p| bird_type.map_or(true, |owner| p.belongs_to(owner)))
                .cloned()
                .collect()
        })
    }

    /// Get a presentation by id
    pub fn get_presentation(&self, id: Uuid) -> AppResult<PresentationType> {
        self.store
            .read(|data| store::find(&data.presentations, id, "Presentation").cloned())?
    }

    /// Create a presentation for an existing bird type
    pub fn create_presentation(&self, input: PresentationInput) -> AppResult<PresentationType> {
        let clean = input.clean()?;

        let presentation = self.store.write(|data| {
            let owner = lookup_bird_type(&data.bird_types, &clean.bird_type)
                .ok_or_else(|| AppError::NotFound("Bird type".to_string()))?
                .name
                .clone();

            if calculators::is_duplicate_presentation(&clean.name, &owner, &data.presentations) {
                tracing::warn!(bird_type = %owner, name = %clean.name, "Rejected duplicate presentation");
                return Err(AppError::DuplicateEntry("presentation".to_string()));
            }

            let presentation = PresentationType {
                id: Uuid::new_v4(),
                bird_type: owner,
                name: clean.name,
                shrinkage_kg: clean.shrinkage_kg,
                variable: clean.variable,
            };
            data.presentations.push(presentation.clone());
            Ok(presentation)
        })?;

        tracing::info!(
            id = %presentation.id,
            bird_type = %presentation.bird_type,
            name = %presentation.name,
            "Created presentation"
        );
        Ok(presentation)
    }

    /// Edit a presentation in place
    pub fn update_presentation(&self, id: Uuid, input: PresentationInput) -> AppResult<PresentationType> {
        let clean = input.clean()?;

        let presentation = self.store.write(|data| {
            let owner = lookup_bird_type(&data.bird_types, &clean.bird_type)
                .ok_or_else(|| AppError::NotFound("Bird type".to_string()))?
                .name
                .clone();

            if calculators::is_duplicate_presentation_except(&clean.name, &owner, &data.presentations, id) {
                tracing::warn!(bird_type = %owner, name = %clean.name, "Rejected duplicate presentation");
                return Err(AppError::DuplicateEntry("presentation".to_string()));
            }

            let existing = store::find_mut(&mut data.presentations, id, "Presentation")?;
            existing.bird_type = owner;
            existing.name = clean.name;
            existing.shrinkage_kg = clean.shrinkage_kg;
            existing.variable = clean.variable;
            Ok(existing.clone())
        })?;

        tracing::info!(id = %id, name = %presentation.name, "Updated presentation");
        Ok(presentation)
    }

    /// Delete a presentation
    pub fn delete_presentation(&self, id: Uuid) -> AppResult<()> {
        let removed = self
            .store
            .write(|data| store::remove(&mut data.presentations, id, "Presentation"))?;
        tracing::info!(id = %id, name = %removed.name, "Deleted presentation");
        Ok(())
    }

    // ========================================================================
    // Shrinkage previews
    // ========================================================================

    /// Shrinkage figures for one presentation at the configured sample sizes
    pub fn shrinkage_preview(&self, id: Uuid) -> AppResult<ShrinkagePreview> {
        let presentation = self.get_presentation(id)?;
        tracing::debug!(id = %id, "Computing shrinkage preview");
        Ok(calculators::preview_at(&presentation, &self.preview_quantities))
    }

    /// Shrinkage figures for every presentation, optionally of one bird type
    pub fn shrinkage_previews(&self, bird_type: Option<&str>) -> AppResult<Vec<ShrinkagePreview>> {
        Ok(self
            .list_presentations(bird_type)?
            .iter()
            .map(|p| calculators::preview_at(p, &self.preview_quantities))
            .collect())
    }
}
