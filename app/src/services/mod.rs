//! Form-submission services, one per dashboard screen

pub mod batch;
pub mod catalog;
pub mod collections;
pub mod finance;

pub use batch::BatchService;
pub use catalog::CatalogService;
pub use collections::CollectionsService;
pub use finance::FinanceService;
