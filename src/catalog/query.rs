//! Vendor search predicates

use clap::ValueEnum;
use std::cmp::Ordering;

use crate::catalog::vendor::Vendor;

/// Company size bands offered by the search filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmployeeRange {
    #[value(name = "1-10")]
    Micro,
    #[value(name = "11-50")]
    Small,
    #[value(name = "51+")]
    Larger,
}

impl EmployeeRange {
    pub fn contains(&self, employees: u32) -> bool {
        match self {
            EmployeeRange::Micro => employees <= 10,
            EmployeeRange::Small => (11..=50).contains(&employees),
            EmployeeRange::Larger => employees > 50,
        }
    }
}

/// Search criteria; empty criteria match every vendor
#[derive(Debug, Clone, Default)]
pub struct VendorQuery {
    /// Case-insensitive substring of name, description or a specialization
    pub text: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub min_rating: f64,
    pub employees: Option<EmployeeRange>,
    /// Vendor must offer at least one of these
    pub specializations: Vec<String>,
    pub verified_only: bool,
    pub featured_only: bool,
}

impl VendorQuery {
    pub fn matches(&self, vendor: &Vendor) -> bool {
        self.matches_text(vendor)
            && self
                .industry
                .as_ref()
                .map_or(true, |industry| vendor.industry.eq_ignore_ascii_case(industry))
            && self
                .location
                .as_ref()
                .map_or(true, |location| vendor.location.eq_ignore_ascii_case(location))
            && vendor.rating >= self.min_rating
            && self.employees.map_or(true, |range| range.contains(vendor.employees))
            && (self.specializations.is_empty()
                || self
                    .specializations
                    .iter()
                    .any(|wanted| {
                        vendor
                            .specializations
                            .iter()
                            .any(|spec| spec.trim().eq_ignore_ascii_case(wanted.trim()))
                    }))
            && (!self.verified_only || vendor.verified)
            && (!self.featured_only || vendor.featured)
    }

    fn matches_text(&self, vendor: &Vendor) -> bool {
        let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let needle = text.to_lowercase();
        vendor.name.to_lowercase().contains(&needle)
            || vendor.description.to_lowercase().contains(&needle)
            || vendor
                .specializations
                .iter()
                .any(|spec| spec.to_lowercase().contains(&needle))
    }

    /// Filter vendors, featured first, then by rating (highest first)
    pub fn run<'a>(&self, vendors: &'a [Vendor]) -> Vec<&'a Vendor> {
        let mut found: Vec<&Vendor> = vendors.iter().filter(|v| self.matches(v)).collect();
        found.sort_by(|a, b| {
            b.featured.cmp(&a.featured).then_with(|| {
                b.rating
                    .partial_cmp(&a.rating)
                    .unwrap_or(Ordering::Equal)
            })
        });
        found
    }
}
