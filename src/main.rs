//! DiagnosAI - command line entry point
//!
//! Trains every disease model at startup, then runs one command.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use diagnosai_core::api;
use diagnosai_core::constants::{APP_NAME, APP_VERSION};
use diagnosai_core::logic::features::{disease_ids, Disease};
use diagnosai_core::{Config, DiagnosticReport, DiseasePredictor, ReportStore, Result};

#[derive(Debug, Parser)]
#[command(name = "diagnosai", version, about = "Disease risk prediction from symptoms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List diseases, or the features of one disease
    Schema { disease: Option<String> },

    /// Predict from `name=value` pairs and save the report
    Predict {
        disease: String,
        #[arg(value_name = "NAME=VALUE")]
        symptoms: Vec<String>,
    },

    /// Answer a JSON request: {"disease_type": ..., "symptoms": {...}}
    Api { body: String },

    /// Show saved reports, newest first
    History {
        /// Only High risk reports
        #[arg(long)]
        high_risk: bool,
    },

    /// Show the trained models
    Status,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env();

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Schema { disease } => {
            print_schema(disease.as_deref())?;
        }
        Command::History { high_risk } => {
            let store = ReportStore::open(&config.database_path)?;
            let reports = if high_risk { store.high_risk()? } else { store.all()? };
            for report in reports {
                println!(
                    "#{} {} {} - {} ({:.2}%, {})",
                    report.id.unwrap_or_default(),
                    report.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    report.disease_type,
                    report.prediction_result,
                    report.confidence,
                    report.tier()
                );
            }
        }
        Command::Predict { disease, symptoms } => {
            let predictor = train(config)?;
            let form = parse_pairs(&symptoms);
            let symptom_map = api::collect_form_symptoms(&disease, &form);
            let result = predictor.predict(&disease, &symptom_map);

            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.is_error() {
                let store = ReportStore::open(&config.database_path)?;
                let mut report = DiagnosticReport::new(&disease, &symptom_map, &result);
                store.save(&mut report)?;
            }
        }
        Command::Api { body } => {
            let predictor = train(config)?;
            let response = api::predict_json(&predictor, &body);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Status => {
            let predictor = train(config)?;
            let status = api::engine_status(predictor.registry());
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}

fn train(config: &Config) -> Result<DiseasePredictor> {
    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);
    DiseasePredictor::from_config(&config.training)
}

fn print_schema(disease: Option<&str>) -> Result<()> {
    match disease {
        Some(id) => match api::schema_info(id) {
            Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
            None => {
                log::warn!("Unknown disease: {}", id);
                println!("Known diseases: {}", disease_ids().join(", "));
            }
        },
        None => {
            for disease in Disease::ALL {
                println!("{:<16} {}", disease.id(), disease.features().join(", "));
            }
        }
    }
    Ok(())
}

/// `name=value` arguments into form fields
fn parse_pairs(pairs: &[String]) -> HashMap<String, String> {
    pairs
        .iter()
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
