//! Vendor catalog search

pub mod query;
pub mod vendor;

pub use query::{EmployeeRange, VendorQuery};
pub use vendor::{sample_vendors, CatalogError, Vendor};
