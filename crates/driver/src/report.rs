//! Comparison report
//!
//! Two formats:
//! - `human` → result and timing lines for each side, then the speed-up
//! - `json` → one JSON object with the same fields
//!
//! The speed-up is left out whenever the native time reads as `0.0000`.

use crate::bench::Comparison;
use crate::error::DriverError;
use serde::{Deserialize, Serialize};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Human,
    Json,
}

/// Flattened report fields
#[derive(Debug, Serialize)]
pub struct ReportData<'a> {
    pub elements: usize,
    pub runs: u32,
    pub host_result: &'a str,
    pub host_seconds: f64,
    pub native_result: &'a str,
    pub native_seconds: f64,
    pub results_match: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_up: Option<f64>,
}

impl<'a> From<&'a Comparison> for ReportData<'a> {
    fn from(c: &'a Comparison) -> Self {
        ReportData {
            elements: c.elements,
            runs: c.runs,
            host_result: &c.host.result,
            host_seconds: c.host.seconds,
            native_result: &c.native.result,
            native_seconds: c.native.seconds,
            results_match: c.agree(),
            speed_up: c.speed_up(),
        }
    }
}

/// Render `comparison` in `format`
pub fn render(comparison: &Comparison, format: ReportFormat) -> Result<String, DriverError> {
    match format {
        ReportFormat::Human => Ok(format_human(comparison)),
        ReportFormat::Json => format_json(comparison),
    }
}

fn format_human(c: &Comparison) -> String {
    let mut out = String::new();
    out.push_str(&format!("Host Result: {}\n", c.host.result));
    out.push_str(&format!("Host Time: {} seconds\n", c.host.display_seconds()));
    out.push('\n');
    out.push_str(&format!("Native Result: {}\n", c.native.result));
    out.push_str(&format!(
        "Native Time: {} seconds\n",
        c.native.display_seconds()
    ));

    if !c.agree() {
        out.push_str("\nWarning: host and native results differ\n");
    }

    if let Some(speed_up) = c.speed_up() {
        out.push_str(&format!(
            "\nPerformance Improvement: native is {:.2} times faster than host.\n",
            speed_up
        ));
    }
    out
}

fn format_json(c: &Comparison) -> Result<String, DriverError> {
    let mut out = serde_json::to_string_pretty(&ReportData::from(c))?;
    out.push('\n');
    Ok(out)
}
