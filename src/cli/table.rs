//! List output in the tabular formats (auto, tsv, csv, md, id)
//!
//! Structured formats (yaml, json) serialize the records themselves and
//! are handled by [`print_list`] before a table is ever built.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

/// A column-oriented table of display strings
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Render in a tabular format; the first column doubles as the ID
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Csv => self.format_csv(),
            OutputFormat::Tsv => Ok(self.format_tsv()),
            OutputFormat::Md => Ok(format!(
                "{}\n",
                self.builder().build().with(Style::markdown())
            )),
            OutputFormat::Id => Ok(self
                .rows
                .iter()
                .filter_map(|row| row.first())
                .map(|id| format!("{}\n", id))
                .collect()),
            OutputFormat::Auto | OutputFormat::Yaml | OutputFormat::Json => Ok(format!(
                "{}\n",
                self.builder().build().with(Style::rounded())
            )),
        }
    }

    fn builder(&self) -> Builder {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().copied());
        for row in &self.rows {
            builder.push_record(row.iter().map(String::as_str));
        }
        builder
    }

    fn format_tsv(&self) -> String {
        let mut out = self.headers.join("\t");
        out.push('\n');
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.replace(['\t', '\n'], " "))
                .collect();
            out.push_str(&cells.join("\t"));
            out.push('\n');
        }
        out
    }

    fn format_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            writer.write_record(row).into_diagnostic()?;
        }
        let bytes = writer.into_inner().into_diagnostic()?;
        String::from_utf8(bytes).into_diagnostic()
    }
}

/// Print records as yaml/json, or as a table built from them
pub fn print_list<T, F>(items: &[T], format: OutputFormat, table: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&[T]) -> Table,
{
    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(items).into_diagnostic()?),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items).into_diagnostic()?)
        }
        _ => print!("{}", table(items).render(format)?),
    }
    Ok(())
}
