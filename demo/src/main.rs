//! Aethelgard Hospital ERP: Demo CLI
//!
//! Runs each dashboard action without the terminal UI. Advisory commands
//! call the model once and print whatever text comes back; without a
//! credential they print the degraded-mode message instead.
//!
//! Usage:
//!   API_KEY=... cargo run -p demo -- forecast
//!   cargo run -p demo -- clinical --patient-id P-1002
//!   cargo run -p demo -- anomalies
//!   cargo run -p demo -- inventory
//!   cargo run -p demo -- export-ledger --out ledger.json
//!   cargo run -p demo -- --config config/advisory.toml forecast

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aethelgard_advisory::{AdvisoryClient, AdvisoryConfig};
use aethelgard_contracts::error::{AethelgardError, AethelgardResult};
use aethelgard_ref_hospital::{
    context::{ledger_context, patient_context, OCCUPANCY_SUMMARY},
    mock_data,
    views::{FinanceView, InventoryView},
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Aethelgard hospital ERP dashboard demo.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Aethelgard hospital ERP demo",
    long_about = "Runs the dashboard's advisory actions and dataset reports from the command line.\n\
                  The model credential is read from API_KEY, or from api_key in --config."
)]
struct Cli {
    /// TOML file with model, endpoint, and optionally api_key.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Seven-day bed occupancy forecast with a staffing recommendation.
    Forecast,
    /// Clinical summary for one patient from the EHR roster.
    Clinical {
        /// Medical record number, e.g. P-1001.
        #[arg(long, default_value = "P-1001")]
        patient_id: String,
    },
    /// Anomaly scan over the ledger.
    Anomalies,
    /// Stock report with low-stock and predicted-shortage flags.
    Inventory,
    /// Write the ledger to a JSON file.
    ExportLedger {
        #[arg(long, default_value = "ledger.json")]
        out: PathBuf,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::Forecast => run_forecast(cli.config),
        Command::Clinical { patient_id } => run_clinical(cli.config, &patient_id),
        Command::Anomalies => run_anomalies(cli.config),
        Command::Inventory => run_inventory(),
        Command::ExportLedger { out } => run_export(out),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Command dispatch ──────────────────────────────────────────────────────────

fn load_client(config_path: Option<PathBuf>) -> AethelgardResult<AdvisoryClient> {
    let config = match config_path {
        Some(path) => AdvisoryConfig::from_file(&path)?.with_env_overrides(),
        None => AdvisoryConfig::from_env(),
    };
    if config.credential().is_none() {
        warn!("API_KEY not configured; advisory output will be the fallback message");
    }
    AdvisoryClient::gemini(config)
}

fn run_forecast(config: Option<PathBuf>) -> AethelgardResult<()> {
    let client = load_client(config)?;
    println!("  Occupancy forecast");
    println!("  Summary: {}", OCCUPANCY_SUMMARY);
    println!("  Model:   {}", client.config().model);
    println!();
    println!("{}", client.forecast_bed_occupancy(OCCUPANCY_SUMMARY));
    println!();
    Ok(())
}

fn run_clinical(config: Option<PathBuf>, patient_id: &str) -> AethelgardResult<()> {
    info!(patient_id, "clinical summary requested");
    let patient = mock_data::patients()
        .into_iter()
        .find(|p| p.id == patient_id)
        .ok_or_else(|| AethelgardError::NotFound {
            kind: "patient".to_string(),
            id: patient_id.to_string(),
        })?;

    let client = load_client(config)?;
    let context = patient_context(&patient);
    println!("  Clinical assistant: {} ({})", patient.name, patient.id);
    for line in context.lines() {
        println!("    {}", line);
    }
    println!();
    println!("{}", client.generate_clinical_insight(&context));
    println!();
    Ok(())
}

fn run_anomalies(config: Option<PathBuf>) -> AethelgardResult<()> {
    let client = load_client(config)?;
    let view = FinanceView::new();
    println!("  AI fraud audit over {} ledger entries", view.transactions().len());
    println!();
    println!("{}", client.detect_financial_anomalies(&ledger_context(view.transactions())));
    println!();
    Ok(())
}

fn run_inventory() -> AethelgardResult<()> {
    let view = InventoryView::new();
    println!("  {:<22} {:<12} {:>8} {:>8} {:>8}  {}", "Item", "SKU", "Stock", "Min", "Demand", "Flag");
    for item in view.items() {
        let demand = item
            .predicted_demand
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<22} {:<12} {:>8} {:>8} {:>8}  {}",
            item.name,
            item.sku,
            item.stock_level,
            item.min_threshold,
            demand,
            item.alert().unwrap_or("")
        );
    }
    println!();
    println!("  Low stock: {}", view.low_stock().len());
    println!("  Predicted shortages: {}", view.predicted_shortages().len());
    println!();
    Ok(())
}

fn run_export(out: PathBuf) -> AethelgardResult<()> {
    let written = FinanceView::new().export_ledger(&out)?;
    println!("  Exported {} ledger entries to {}", written, out.display());
    println!();
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Aethelgard Hospital ERP");
    println!("=======================");
    println!();
}
