//! Avicola Admin - application state and form services
//!
//! Back office for a small poultry distributor: bird inventory, the bird
//! type and presentation catalog, income from completed orders, and the
//! collections roster with its payment QR codes.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod seed;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult, ErrorDetail};
pub use store::Store;

use services::{BatchService, CatalogService, CollectionsService, FinanceService};

/// Application state shared across screens
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Store::new(),
            config: Arc::new(config),
        }
    }

    /// State with the example records loaded when seeding is enabled
    pub fn bootstrap(config: Config) -> AppResult<Self> {
        let state = Self::new(config);
        if state.config.seed.enabled {
            seed::seed_store(&state.store)?;
        }
        Ok(state)
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.store.clone())
            .with_preview_quantities(self.config.preview.sample_quantities.clone())
    }

    pub fn batches(&self) -> BatchService {
        BatchService::new(self.store.clone())
    }

    pub fn finance(&self) -> FinanceService {
        FinanceService::new(self.store.clone()).with_currency(self.config.finance.currency.clone())
    }

    pub fn collections(&self) -> CollectionsService {
        CollectionsService::new(self.store.clone())
    }
}
