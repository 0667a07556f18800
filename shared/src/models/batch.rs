//! Bird inventory batch models

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An inventory entry: birds received from a supplier in crates ("javas")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BirdBatch {
    pub id: Uuid,
    pub supplier: String,
    /// Referenced bird type, by name
    pub bird_type: String,
    /// Required iff the bird type has varieties
    pub variety: Option<String>,
    pub crates: u32,
    pub birds_per_crate: u32,
    /// `crates * birds_per_crate`, stored redundantly
    pub total_birds: u32,
    pub males: Option<u32>,
    pub females: Option<u32>,
    pub entry_date: NaiveDate,
    pub entry_time: NaiveTime,
}

/// Male/female split of a batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SexSplit {
    pub males: u32,
    pub females: u32,
}

impl SexSplit {
    pub fn sum(&self) -> u32 {
        self.males.saturating_add(self.females)
    }
}

impl BirdBatch {
    pub fn sex_split(&self) -> Option<SexSplit> {
        match (self.males, self.females) {
            (Some(males), Some(females)) => Some(SexSplit { males, females }),
            _ => None,
        }
    }

    /// Whether the stored total is exactly crates times birds per crate
    pub fn is_total_consistent(&self) -> bool {
        u64::from(self.crates) * u64::from(self.birds_per_crate) == u64::from(self.total_birds)
    }
}
