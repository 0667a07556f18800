//! Inventory service for bird batches (Aves)

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::calculators::{self, Reconciliation};
use shared::models::{BirdBatch, BirdType, SexSplit};
use shared::input::{self, InputError};
use shared::validation;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::catalog::lookup_bird_type;
use crate::store::{self, Store};

/// Inventory service for registering and browsing bird batches
#[derive(Clone)]
pub struct BatchService {
    store: Store,
}

/// Inventory form as typed by the user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BatchForm {
    #[validate(length(min = 1, message = "Supplier is required"))]
    pub supplier: String,
    #[validate(length(min = 1, message = "Bird type is required"))]
    pub bird_type: String,
    pub variety: Option<String>,
    pub crates: String,
    pub birds_per_crate: String,
    pub males: Option<String>,
    /// Left blank, it is filled in from the total and the male count
    pub females: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub entry_time: Option<NaiveTime>,
}

/// Figures shown live while the form is being edited
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchPreview {
    pub total_birds: u32,
    /// Present when the bird type tracks sex
    pub suggested_females: Option<u32>,
    pub reconciliation: Option<Reconciliation>,
    pub requires_variety: bool,
    pub varieties: Vec<String>,
}

/// Inventory totals for one bird type
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InventoryByType {
    pub bird_type: String,
    pub batches: usize,
    pub crates: u64,
    pub birds: u64,
    pub males: u64,
    pub females: u64,
}

fn blank_to_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parsed and checked batch fields
struct CleanBatch {
    supplier: String,
    bird_type: String,
    variety: Option<String>,
    crates: u32,
    birds_per_crate: u32,
    total_birds: u32,
    split: Option<SexSplit>,
    entry_date: NaiveDate,
    entry_time: NaiveTime,
}

impl BatchForm {
    fn clean(&self, bird_type: &BirdType) -> AppResult<CleanBatch> {
        validation::validate_required(&self.supplier).map_err(|e| AppError::validation("supplier", e))?;

        let crates = input::parse_count(&self.crates).map_err(|e| AppError::invalid_input("crates", e))?;
        validation::validate_positive_count(crates).map_err(|e| AppError::validation("crates", e))?;

        let birds_per_crate = input::parse_count(&self.birds_per_crate)
            .map_err(|e| AppError::invalid_input("birds_per_crate", e))?;
        validation::validate_positive_count(birds_per_crate)
            .map_err(|e| AppError::validation("birds_per_crate", e))?;

        // Saturation is for live previews only; a stored total is exact
        let total_birds = crates
            .checked_mul(birds_per_crate)
            .ok_or_else(|| AppError::invalid_input("birds_per_crate", InputError::TooLarge))?;

        let males = input::parse_optional_count(self.males.as_deref())
            .map_err(|e| AppError::invalid_input("males", e))?;
        let females = input::parse_optional_count(self.females.as_deref())
            .map_err(|e| AppError::invalid_input("females", e))?;
        let split = match (males, females) {
            (Some(males), Some(females)) => Some(SexSplit { males, females }),
            (Some(males), None) => Some(SexSplit {
                males,
                females: calculators::compute_complementary_females(total_birds, males),
            }),
            (None, Some(_)) => {
                return Err(AppError::validation("males", "Male count is required"));
            }
            (None, None) => None,
        };

        let variety = blank_to_none(self.variety.as_deref()).map(str::to_string);
        validation::validate_batch_variety(bird_type, variety.as_deref())
            .map_err(|e| AppError::validation("variety", e))?;
        validation::validate_batch_sex_split(bird_type, total_birds, split)
            .map_err(|e| AppError::validation("males", e))?;

        let now = Local::now().naive_local();
        Ok(CleanBatch {
            supplier: self.supplier.trim().to_string(),
            bird_type: bird_type.name.clone(),
            variety,
            crates,
            birds_per_crate,
            total_birds,
            split,
            entry_date: self.entry_date.unwrap_or_else(|| now.date()),
            entry_time: self.entry_time.unwrap_or_else(|| now.time()),
        })
    }
}

impl CleanBatch {
    fn into_batch(self, id: Uuid) -> BirdBatch {
        BirdBatch {
            id,
            supplier: self.supplier,
            bird_type: self.bird_type,
            variety: self.variety,
            crates: self.crates,
            birds_per_crate: self.birds_per_crate,
            total_birds: self.total_birds,
            males: self.split.map(|s| s.males),
            females: self.split.map(|s| s.females),
            entry_date: self.entry_date,
            entry_time: self.entry_time,
        }
    }
}

impl BatchService {
    /// Create a new BatchService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Live figures for a partially filled form. Never fails on bad numbers:
    /// anything unparseable counts as zero.
    pub fn preview(&self, form: &BatchForm) -> AppResult<BatchPreview> {
        let bird_type = self
            .store
            .read(|data| lookup_bird_type(&data.bird_types, &form.bird_type).cloned())?;

        let total_birds = calculators::compute_total_raw(Some(&form.crates), Some(&form.birds_per_crate));
        let tracks_sex = bird_type.as_ref().map_or(false, |t| t.has_sex);

        let (suggested_females, reconciliation) = if tracks_sex {
            let males = input::coerce_count(form.males.as_deref());
            let suggested = calculators::compute_complementary_females(total_birds, males);
            let females = match blank_to_none(form.females.as_deref()) {
                Some(raw) => input::coerce_count(Some(raw)),
                None => suggested,
            };
            (Some(suggested), Some(calculators::reconcile(total_birds, males, females)))
        } else {
            (None, None)
        };

        tracing::debug!(bird_type = %form.bird_type, total_birds, "Computed batch preview");

        Ok(BatchPreview {
            total_birds,
            suggested_females,
            reconciliation,
            requires_variety: bird_type.as_ref().map_or(false, |t| t.has_variety),
            varieties: bird_type.map(|t| t.varieties).unwrap_or_default(),
        })
    }

    /// Register a new batch
    pub fn register(&self, form: BatchForm) -> AppResult<BirdBatch> {
        form.validate()?;

        // Bird type lookup and insert happen under one lock
        let batch = self
            .store
            .write(|data| {
                let bird_type = lookup_bird_type(&data.bird_types, &form.bird_type)
                    .ok_or_else(|| AppError::NotFound("Bird type".to_string()))?;
                let batch = form.clean(bird_type)?.into_batch(Uuid::new_v4());
                data.batches.push(batch.clone());
                Ok(batch)
            })
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected batch registration");
                e
            })?;

        tracing::info!(
            id = %batch.id,
            bird_type = %batch.bird_type,
            total_birds = batch.total_birds,
            "Registered batch"
        );
        Ok(batch)
    }

    /// Replace a batch's fields, recomputing its derived counts
    pub fn update(&self, id: Uuid, form: BatchForm) -> AppResult<BirdBatch> {
        form.validate()?;

        let batch = self
            .store
            .write(|data| {
                let bird_type = lookup_bird_type(&data.bird_types, &form.bird_type)
                    .ok_or_else(|| AppError::NotFound("Bird type".to_string()))?;
                let clean = form.clean(bird_type)?;
                let existing = store::find_mut(&mut data.batches, id, "Batch")?;
                *existing = clean.into_batch(id);
                Ok(existing.clone())
            })
            .map_err(|e| {
                tracing::warn!(id = %id, error = %e, "Rejected batch update");
                e
            })?;

        tracing::info!(id = %id, total_birds = batch.total_birds, "Updated batch");
        Ok(batch)
    }

    /// Delete a batch
    pub fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store
            .write(|data| store::remove(&mut data.batches, id, "Batch"))?;
        tracing::info!(id = %id, "Deleted batch");
        Ok(())
    }

    /// Get a batch by id
    pub fn get(&self, id: Uuid) -> AppResult<BirdBatch> {
        self.store
            .read(|data| store::find(&data.batches, id, "Batch").cloned())?
    }

    /// Batches, most recent entry first
    pub fn list(&self) -> AppResult<Vec<BirdBatch>> {
        let mut batches = self.store.read(|data| data.batches.clone())?;
        batches.sort_by(|a, b| (b.entry_date, b.entry_time).cmp(&(a.entry_date, a.entry_time)));
        Ok(batches)
    }

    /// Batches whose supplier, bird type or variety contains `text`, ignoring case
    pub fn search(&self, text: &str) -> AppResult<Vec<BirdBatch>> {
        let needle = text.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|b| {
                needle.is_empty()
                    || b.supplier.to_lowercase().contains(&needle)
                    || b.bird_type.to_lowercase().contains(&needle)
                    || b.variety
                        .as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Totals per bird type, ordered by name
    pub fn inventory_summary(&self) -> AppResult<Vec<InventoryByType>> {
        let batches = self.store.read(|data| data.batches.clone())?;

        let mut by_type: BTreeMap<String, InventoryByType> = BTreeMap::new();
        for batch in &batches {
            let entry = by_type
                .entry(batch.bird_type.clone())
                .or_insert_with(|| InventoryByType {
                    bird_type: batch.bird_type.clone(),
                    batches: 0,
                    crates: 0,
                    birds: 0,
                    males: 0,
                    females: 0,
                });
            entry.batches += 1;
            entry.crates += u64::from(batch.crates);
            entry.birds += u64::from(batch.total_birds);
            entry.males += u64::from(batch.males.unwrap_or(0));
            entry.females += u64::from(batch.females.unwrap_or(0));
        }

        Ok(by_type.into_values().collect())
    }
}
