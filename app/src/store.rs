//! In-memory application state shared by every dashboard screen
//!
//! One owned store replaces per-screen component state. Services receive a
//! cloned [`Store`] handle; calculators only ever see snapshots.

use std::sync::{Arc, RwLock};

use shared::models::{BirdBatch, BirdType, Collector, CompletedOrder, PaymentQrCode, PresentationType};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Records kept by the dashboard, in insertion order
#[derive(Debug, Default, Clone)]
pub struct StoreData {
    pub bird_types: Vec<BirdType>,
    pub presentations: Vec<PresentationType>,
    pub batches: Vec<BirdBatch>,
    pub orders: Vec<CompletedOrder>,
    pub collectors: Vec<Collector>,
    pub qr_codes: Vec<PaymentQrCode>,
}

/// Cloneable handle to the shared store
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<StoreData>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a read-locked view of the data
    pub fn read<T>(&self, f: impl FnOnce(&StoreData) -> T) -> AppResult<T> {
        let guard = self
            .inner
            .read()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))?;
        Ok(f(&guard))
    }

    /// Run `f` against a write-locked view of the data
    pub fn write<T>(&self, f: impl FnOnce(&mut StoreData) -> AppResult<T>) -> AppResult<T> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))?;
        f(&mut guard)
    }

    /// Copy of the current data
    pub fn snapshot(&self) -> AppResult<StoreData> {
        self.read(StoreData::clone)
    }
}

/// Records addressable by id
pub trait Identified {
    fn id(&self) -> Uuid;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> Uuid {
                self.id
            }
        })*
    };
}

identified!(BirdType, PresentationType, BirdBatch, CompletedOrder, Collector, PaymentQrCode);

/// Find a record by id, or `NotFound(what)`
pub fn find<'a, T: Identified>(records: &'a [T], id: Uuid, what: &str) -> AppResult<&'a T> {
    records
        .iter()
        .find(|r| r.id() == id)
        .ok_or_else(|| AppError::NotFound(what.to_string()))
}

/// Mutable variant of [`find`]
pub fn find_mut<'a, T: Identified>(
    records: &'a mut [T],
    id: Uuid,
    what: &str,
) -> AppResult<&'a mut T> {
    records
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| AppError::NotFound(what.to_string()))
}

/// Remove a record by id and return it
pub fn remove<T: Identified>(records: &mut Vec<T>, id: Uuid, what: &str) -> AppResult<T> {
    let index = records
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| AppError::NotFound(what.to_string()))?;
    Ok(records.remove(index))
}
