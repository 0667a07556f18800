//! Shared types and calculators for the Avicola Admin dashboard
//!
//! This crate contains the domain models and the pure derived-quantity
//! calculators shared between the application store, the browser (via WASM),
//! and any other component of the system.

pub mod calculators;
pub mod input;
pub mod models;
pub mod types;
pub mod validation;

pub use calculators::*;
pub use input::*;
pub use models::*;
pub use types::*;
pub use validation::*;
