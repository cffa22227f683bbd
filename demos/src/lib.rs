//! Aquila demo suite
//!
//! Shared output helpers and configuration loading for the demo binaries:
//!
//! - **demo-credit-risk**: loss distribution, VaR and CVaR of a credit
//!   portfolio, simulated or enumerated classically
//! - **demo-stock-data**: price series and statistics from Quandl

use std::fs;
use std::path::Path;

use anyhow::Context;
use aquila_core::QuantumInstanceConfig;
use aquila_finance::CreditRiskConfig;
use console::style;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Contents of a credit-risk demo configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditRiskDemoConfig {
    /// Model, losses and confidence level.
    pub credit_risk: CreditRiskConfig,
    /// Backend to run on; absent for classical runs.
    #[serde(default)]
    pub quantum_instance: Option<QuantumInstanceConfig>,
}

impl CreditRiskDemoConfig {
    /// Parse a YAML document.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml_ng::from_str(yaml).context("Failed to parse credit-risk configuration")
    }

    /// Read and parse a YAML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::from_yaml(&yaml)
    }
}

/// Install the fmt subscriber; `-v` counts map to info, debug and trace.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Horizontal bar of `width` cells scaled by `fraction`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}
