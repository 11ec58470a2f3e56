//! Vendor records and the bundled sample catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::asset_str;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog asset not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog data: {0}")]
    Parse(String),
}

/// A business listed in the vendor catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
    pub employees: u32,
    pub founded: String,
    pub price_range: String,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub description: String,
    pub projects_completed: u32,
    pub response_time: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub featured: bool,
}

/// Load the sample vendors shipped with the binary
pub fn sample_vendors() -> Result<Vec<Vendor>, CatalogError> {
    let content = asset_str("vendors.yaml")
        .ok_or_else(|| CatalogError::NotFound("vendors.yaml".to_string()))?;
    parse_vendors(&content)
}

pub fn parse_vendors(content: &str) -> Result<Vec<Vendor>, CatalogError> {
    serde_yml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))
}
