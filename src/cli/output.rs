//! Output formatting utilities
//!
//! Provides table and JSON output formatting for single-tick reports.

use crate::cli::args::OutputFormat;
use crate::domain::{Reading, TrackedResource};
use serde::Serialize;
use std::io::{self, Write};

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;
}

/// One resource's sampled values for display
#[derive(Debug, Clone, Serialize)]
pub struct ReadingRow {
    /// Resource token
    pub resource: String,
    /// Primary utilization ratio, if available
    pub value: Option<f64>,
    /// Swap pressure ratio (RAM only), if available
    pub swap: Option<f64>,
}

impl ReadingRow {
    /// Build a row from one resource's reading
    pub fn new(resource: TrackedResource, reading: &Reading) -> Self {
        Self {
            resource: resource.to_string(),
            value: reading.primary.value(),
            swap: reading.secondary.and_then(|s| s.value()),
        }
    }

    fn format_ratio(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.1}%", v * 100.0),
            None => "n/a".to_string(),
        }
    }
}

impl TableDisplay for ReadingRow {
    fn to_table(&self) -> String {
        let mut line = format!("{:<6} {:>7}", self.resource, Self::format_ratio(self.value));
        if self.swap.is_some() {
            line.push_str(&format!("  (swap {})", Self::format_ratio(self.swap)));
        }
        line
    }
}

/// A full single-tick report
#[derive(Debug, Clone, Serialize)]
pub struct ReadingReport {
    /// One row per sampled resource
    pub readings: Vec<ReadingRow>,
}

impl ReadingReport {
    /// Build a report from sampled readings
    pub fn new(readings: &[(TrackedResource, Reading)]) -> Self {
        Self {
            readings: readings
                .iter()
                .map(|(resource, reading)| ReadingRow::new(*resource, reading))
                .collect(),
        }
    }
}

impl TableDisplay for ReadingReport {
    fn to_table(&self) -> String {
        let mut output = String::new();
        for row in &self.readings {
            output.push_str(&row.to_table());
            output.push('\n');
        }
        output.pop();
        output
    }
}
