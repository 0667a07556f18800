//! Derived-quantity and reconciliation calculators
//!
//! Pure functions used by the inventory and catalog forms. None of them hold
//! state or fail: malformed input degrades to a safe default.

pub mod batch;
pub mod shrinkage;
pub mod uniqueness;

pub use batch::*;
pub use shrinkage::*;
pub use uniqueness::*;
