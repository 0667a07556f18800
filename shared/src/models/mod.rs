//! Domain models for the Avicola Admin dashboard

mod batch;
mod catalog;
mod collections;
mod finance;

pub use batch::*;
pub use catalog::*;
pub use collections::*;
pub use finance::*;
