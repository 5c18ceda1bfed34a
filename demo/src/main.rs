//! ClaimGuard — Demo CLI
//!
//! Scores a claim file against reference tables, or runs the built-in
//! reference scenarios.
//!
//! Usage:
//!   cargo run -p demo -- score claim.json --registry faskes.json --model-score 5
//!   cargo run -p demo -- score claim.json --model weights.json --ledger results.jsonl
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- clean-claim
//!   cargo run -p demo -- missing-identity
//!   cargo run -p demo -- unregistered-facility
//!   cargo run -p demo -- duplicate-contact

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use claimguard_contracts::{
    config::ScoringConfig,
    error::{ClaimError, ClaimResult},
    claim::ClaimId,
    result::{ClaimEntry, ClaimScoreResult, ClaimSummary},
    subject::LookupTables,
};
use claimguard_core::{
    traits::{ModelInference, ResultSink},
    ClaimProcessor, ScoreAggregator,
};
use claimguard_intake::ClaimExtractor;
use claimguard_ledger::{FileClaimLedger, InMemoryClaimLedger};
use claimguard_model::{FallbackModel, FixedModel, HeuristicModel, ModelFile};
use claimguard_policy::{config, ThresholdPolicy};
use claimguard_ref::scenarios::{
    self, clean_claim, duplicate_contact, missing_identity, unregistered_facility,
};

/// Weights file consulted when `--model` is not given.
const DEFAULT_MODEL_PATH: &str = "models/fraud_model.json";

/// Ledger id used for every results store the CLI opens.
const LEDGER_ID: &str = "claimguard-demo";

// ── CLI definition ────────────────────────────────────────────────────────────

/// ClaimGuard — healthcare claim fraud scoring.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "ClaimGuard claim fraud scoring demo",
    long_about = "Scores healthcare reimbursement claims for fraud risk: patient and\n\
                  facility checklists, a model score, a threshold decision and a\n\
                  hash-chained results ledger."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one claim JSON file and print the result.
    Score(ScoreArgs),
    /// Run all four reference scenarios in sequence.
    RunAll,
    /// Scenario 1: clean claim, auto-accepted.
    CleanClaim,
    /// Scenario 2: missing identity number, auto-rejected.
    MissingIdentity,
    /// Scenario 3: unregistered facility, rejected for any model score.
    UnregisteredFacility,
    /// Scenario 4: shared phone and address, manual review.
    DuplicateContact,
}

#[derive(Args)]
struct ScoreArgs {
    /// Claim JSON file.
    claim: PathBuf,
    /// JSON array of previously registered patients.
    #[arg(long)]
    patient_history: Option<PathBuf>,
    /// JSON array of registered facilities.
    #[arg(long)]
    registry: Option<PathBuf>,
    /// JSON array of facility fraud-history records.
    #[arg(long)]
    fraud_history: Option<PathBuf>,
    /// TOML scoring configuration. Built-in defaults when absent.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use this model score (0-100) instead of running a model.
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    model_score: Option<u32>,
    /// Seed for the heuristic fallback.
    #[arg(long)]
    seed: Option<u64>,
    /// Logistic model weights (JSON).
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,
    /// Append the result to this JSON Lines ledger instead of an in-memory one.
    #[arg(long)]
    ledger: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-check output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Score(args) => score(&args),
        Command::RunAll => {
            print_banner();
            scenarios::run_all()
        }
        Command::CleanClaim => {
            print_banner();
            clean_claim::run_scenario()
        }
        Command::MissingIdentity => {
            print_banner();
            missing_identity::run_scenario()
        }
        Command::UnregisteredFacility => {
            print_banner();
            unregistered_facility::run_scenario()
        }
        Command::DuplicateContact => {
            print_banner();
            duplicate_contact::run_scenario()
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ── Score command ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ScoreOutput<'a> {
    claim_id: &'a ClaimId,
    summary: ClaimSummary,
    result: &'a ClaimScoreResult,
}

fn score(args: &ScoreArgs) -> ClaimResult<()> {
    let config = match &args.config {
        Some(path) => config::from_file(path)?,
        None => ScoringConfig::default(),
    };
    let tables = LookupTables {
        patients: load_table(args.patient_history.as_deref(), "patient history")?,
        facilities: load_table(args.registry.as_deref(), "facility registry")?,
        violations: load_table(args.fraud_history.as_deref(), "fraud history")?,
    };

    let raw = read_claim(&args.claim)?;
    let claim = ClaimExtractor::new()?.extract(&raw)?;

    let (sink, ledger) = open_ledger(args.ledger.as_deref())?;
    let processor = ClaimProcessor::new(
        ScoreAggregator::new(&config, Box::new(ThresholdPolicy::from_config(&config))),
        build_model(args)?,
        sink,
    );
    let result = processor.process(&claim, &tables)?;

    let output = ScoreOutput {
        claim_id: &claim.claim_id,
        summary: ClaimSummary::new(&claim, &result),
        result: &result,
    };
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render result: {e}"),
    }

    println!();
    println!(
        "Ledger integrity: {} ({} entr{} in chain)",
        if ledger.verify_integrity() { "VERIFIED" } else { "FAILED" },
        ledger.len(),
        if ledger.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}

/// An injected score when `--model-score` is given, otherwise the weights
/// file with the heuristic as fallback.
fn build_model(args: &ScoreArgs) -> ClaimResult<Box<dyn ModelInference>> {
    if let Some(score) = args.model_score {
        info!(score, "using injected model score");
        return Ok(Box::new(FixedModel::new(score)?));
    }
    let heuristic = match args.seed {
        Some(seed) => HeuristicModel::seeded(seed),
        None => HeuristicModel::new(),
    };
    Ok(Box::new(FallbackModel::new(
        Box::new(ModelFile::new(&args.model)),
        Box::new(heuristic),
    )))
}

fn read_claim(path: &Path) -> ClaimResult<Value> {
    let contents = std::fs::read_to_string(path).map_err(|e| ClaimError::MalformedClaim {
        reason: format!("failed to read claim '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&contents).map_err(|e| ClaimError::MalformedClaim {
        reason: format!("claim '{}' is not valid JSON: {}", path.display(), e),
    })
}

/// Read a JSON array table. A missing file is an empty table.
fn load_table<T: DeserializeOwned>(path: Option<&Path>, name: &str) -> ClaimResult<Vec<T>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(table = name, path = %path.display(), "table file not found, using empty table");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(ClaimError::ConfigError {
                reason: format!("failed to read {} '{}': {}", name, path.display(), e),
            })
        }
    };
    let rows: Vec<T> = serde_json::from_str(&contents).map_err(|e| ClaimError::ConfigError {
        reason: format!("failed to parse {} '{}': {}", name, path.display(), e),
    })?;
    info!(table = name, rows = rows.len(), "table loaded");
    Ok(rows)
}

// ── Ledger handles ────────────────────────────────────────────────────────────

/// Inspectable view of whichever ledger the processor writes to.
enum LedgerHandle {
    Memory(InMemoryClaimLedger),
    File(Arc<FileClaimLedger>),
}

impl LedgerHandle {
    fn verify_integrity(&self) -> bool {
        match self {
            LedgerHandle::Memory(ledger) => ledger.verify_integrity(),
            LedgerHandle::File(ledger) => ledger.verify_integrity(),
        }
    }

    fn len(&self) -> usize {
        match self {
            LedgerHandle::Memory(ledger) => ledger.len(),
            LedgerHandle::File(ledger) => ledger.export_log().map(|log| log.events.len()).unwrap_or(0),
        }
    }
}

/// Lets an `Arc<FileClaimLedger>` be handed to the processor as
/// `Box<dyn ResultSink>` while the CLI keeps a handle for verification.
struct ArcLedger(Arc<FileClaimLedger>);

impl ResultSink for ArcLedger {
    fn append(&self, entry: &ClaimEntry) -> ClaimResult<()> {
        self.0.append(entry)
    }
}

fn open_ledger(path: Option<&Path>) -> ClaimResult<(Box<dyn ResultSink>, LedgerHandle)> {
    match path {
        Some(path) => {
            let ledger = Arc::new(FileClaimLedger::open(LEDGER_ID, path)?);
            Ok((
                Box::new(ArcLedger(Arc::clone(&ledger))),
                LedgerHandle::File(ledger),
            ))
        }
        None => {
            let ledger = InMemoryClaimLedger::new(LEDGER_ID);
            Ok((Box::new(ledger.clone()), LedgerHandle::Memory(ledger)))
        }
    }
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("ClaimGuard — Claim Fraud Scoring");
    println!("Reference Scenarios");
    println!("================================");
    println!();
    println!("Scoring pipeline per claim:");
    println!("  [1] Claim validated against JSON Schema, patient and facility extracted");
    println!("  [2] Model scores the medical data (0-100)");
    println!("  [3] Patient checklist: crucial identity checks, then duplicate contacts");
    println!("  [4] Facility checklist: crucial registration check, then fraud history");
    println!("  [5] Threshold decision: ACCEPTED / NEEDS_REVIEW / REJECTED");
    println!("  [6] Result appended to the SHA-256 hash-chained ledger");
    println!();
}
