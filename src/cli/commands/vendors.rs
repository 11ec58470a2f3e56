//! `bizc vendors` - search the vendor catalog

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::{sample_vendors, EmployeeRange, Vendor, VendorQuery};
use crate::cli::helpers::truncate_str;
use crate::cli::table::{print_list, Table};
use crate::cli::GlobalOpts;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct VendorsArgs {
    /// Text to find in names, descriptions or specializations
    pub search: Option<String>,

    /// Filter by industry (exact, case-insensitive)
    #[arg(long, short = 'i')]
    pub industry: Option<String>,

    /// Filter by location (exact, case-insensitive)
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Minimum rating (0-5)
    #[arg(long, default_value_t = 0.0)]
    pub min_rating: f64,

    /// Company size band
    #[arg(long, value_enum)]
    pub employees: Option<EmployeeRange>,

    /// Require at least one of these specializations (repeatable)
    #[arg(long = "specialization", short = 's')]
    pub specializations: Vec<String>,

    /// Only verified vendors
    #[arg(long)]
    pub verified: bool,

    /// Only featured vendors
    #[arg(long)]
    pub featured: bool,

    /// Show at most N results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl VendorsArgs {
    fn query(&self) -> VendorQuery {
        VendorQuery {
            text: self.search.clone(),
            industry: self.industry.clone(),
            location: self.location.clone(),
            min_rating: self.min_rating,
            employees: self.employees,
            specializations: self.specializations.clone(),
            verified_only: self.verified,
            featured_only: self.featured,
        }
    }
}

pub fn run(args: VendorsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = global.output_format(config.default_format.as_deref());

    let vendors = sample_vendors().into_diagnostic()?;
    let mut results: Vec<Vendor> = args.query().run(&vendors).into_iter().cloned().collect();
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    if results.is_empty() {
        if !global.quiet {
            eprintln!("{} No vendors match the filters", style("!").yellow());
        }
        return Ok(());
    }

    print_list(&results, format, |items| {
        let mut table = Table::new(&[
            "id",
            "name",
            "industry",
            "location",
            "rating",
            "employees",
            "verified",
            "specializations",
        ]);
        for v in items {
            table.push_row(vec![
                v.id.clone(),
                v.name.clone(),
                v.industry.clone(),
                v.location.clone(),
                format!("{:.1} ({})", v.rating, v.review_count),
                v.employees.to_string(),
                if v.verified { "yes" } else { "no" }.to_string(),
                truncate_str(&v.specializations.join(", "), 40),
            ]);
        }
        table
    })
}
