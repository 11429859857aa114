//! TRAFO-DGA - Transformer Oil Diagnostics
//!
//! Command-line front end for the diagnostic engine. Every subcommand prints
//! its result as JSON on stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Duval analysis from measured gases (ppm)
//! trafo-dga dga --h2 200 --ch4 60 --c2h6 30 --c2h4 10 --c2h2 0.5 --co 540
//!
//! # Operator-confirmed zones
//! trafo-dga manual --t1 T2 --t4 S --co 420
//!
//! # Dielectric strength, six readings in kV
//! trafo-dga breakdown --class B 52 48 55 51 49 50
//!
//! # Persist a result and list history
//! trafo-dga --save --id-trafo TR-04 co 650
//! trafo-dga history --limit 5
//! ```
//!
//! # Environment Variables
//!
//! - `TRAFO_DGA_CONFIG`: Path to the engine TOML config
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use trafo_dga::config::ConfigProvenance;
use trafo_dga::storage::{save_and_notify, HistoryPayload, TracingNotifier};
use trafo_dga::types::DataClassification;
use trafo_dga::{
    analyze, analyze_breakdown, analyze_co_level_with, analyze_manual_with, diagram,
    EngineConfig, FaultCode, GasConcentration, HistoryRecord, ManualTriangleInput, ReportHeader, ResultSink,
    SledHistory, TransformerClass, TriangleFault, TriangleMethod,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "trafo-dga")]
#[command(about = "Transformer oil diagnostics: Duval triangles, breakdown voltage and CO screening")]
#[command(version)]
struct CliArgs {
    /// Path to an engine TOML config (overrides TRAFO_DGA_CONFIG and ./trafo_dga.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Store the result in the local history database
    #[arg(long, global = true)]
    save: bool,

    /// Transformer identifier recorded with saved results
    #[arg(long, global = true, default_value = "")]
    id_trafo: String,

    /// Sampling date recorded with saved results
    #[arg(long, global = true, default_value = "")]
    sampling_date: String,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Classify a dissolved-gas sample on Duval Triangles 1, 4 and 5
    Dga {
        #[command(flatten)]
        gases: GasArgs,
    },

    /// Aggregate operator-selected zones without computing positions
    Manual {
        /// Zone confirmed on Triangle 1 (PD, D1, D2, T1, T2, T3, DT)
        #[arg(long)]
        t1: Option<String>,
        /// Zone confirmed on Triangle 4 (PD, ND, C, S, DT, D2)
        #[arg(long)]
        t4: Option<String>,
        /// Zone confirmed on Triangle 5 (T2, T3, C, S, O, ND)
        #[arg(long)]
        t5: Option<String>,
        /// Sample data classification, 1 to 8
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=8))]
        data: u8,
        /// Carbon monoxide (ppm), screened for Data 1 samples
        #[arg(long)]
        co: Option<f64>,
    },

    /// Rate six dielectric-strength readings against a transformer class
    Breakdown {
        /// Transformer class: O, A, B or C
        #[arg(long)]
        class: TransformerClass,
        /// Breakdown voltages in kV
        #[arg(required = true, num_args = 1..)]
        readings: Vec<f64>,
    },

    /// Screen a carbon-monoxide level
    Co {
        /// CO concentration in ppm
        ppm: f64,
    },

    /// Print boundary segments and label anchors of a triangle
    Diagram {
        /// Triangle number: 1, 4 or 5
        #[arg(value_parser = parse_triangle)]
        triangle: TriangleMethod,
    },

    /// List saved results, newest first
    History {
        /// Number of records to show (default from config)
        #[arg(long)]
        limit: Option<usize>,
        /// Delete records older than this many days before listing
        #[arg(long, value_name = "DAYS")]
        prune_days: Option<u32>,
    },

    /// Print the effective configuration as TOML, or check a config file
    Config {
        /// Validate this file and exit
        #[arg(long, value_name = "FILE")]
        check: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct GasArgs {
    /// Hydrogen (ppm)
    #[arg(long)]
    h2: Option<f64>,
    /// Methane (ppm)
    #[arg(long)]
    ch4: Option<f64>,
    /// Ethane (ppm)
    #[arg(long)]
    c2h6: Option<f64>,
    /// Ethylene (ppm)
    #[arg(long)]
    c2h4: Option<f64>,
    /// Acetylene (ppm)
    #[arg(long)]
    c2h2: Option<f64>,
    /// Carbon monoxide (ppm)
    #[arg(long)]
    co: Option<f64>,
}

impl From<&GasArgs> for GasConcentration {
    fn from(args: &GasArgs) -> Self {
        GasConcentration {
            h2: args.h2,
            ch4: args.ch4,
            c2h6: args.c2h6,
            c2h4: args.c2h4,
            c2h2: args.c2h2,
            co: args.co,
            ..Default::default()
        }
    }
}

fn parse_triangle(s: &str) -> Result<TriangleMethod, String> {
    let n: u8 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a triangle number"))?;
    TriangleMethod::try_from(n)
}

fn data_classification(n: u8) -> DataClassification {
    match n {
        2 => DataClassification::Data2,
        3 => DataClassification::Data3,
        4 => DataClassification::Data4,
        5 => DataClassification::Data5,
        6 => DataClassification::Data6,
        7 => DataClassification::Data7,
        8 => DataClassification::Data8,
        _ => DataClassification::Data1,
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    let (config, provenance) = load_config(args.config.as_deref())?;

    let header = ReportHeader {
        id_trafo: args.id_trafo.clone(),
        sampling_date: args.sampling_date.clone(),
        ..Default::default()
    };

    let payload = match &args.command {
        SubCommand::Dga { gases } => {
            let gas = GasConcentration::from(gases);
            let mut result = analyze(&gas);
            // Computed samples are always screened as Data 1
            if let Some(ppm) = gas.co_ppm() {
                result.co_analysis = Some(analyze_co_level_with(ppm, &config.co));
            }
            HistoryPayload::Dga(result)
        }
        SubCommand::Manual {
            t1,
            t4,
            t5,
            data,
            co,
        } => {
            let inputs = manual_inputs(
                [
                    (TriangleMethod::Triangle1, t1.as_deref()),
                    (TriangleMethod::Triangle4, t4.as_deref()),
                    (TriangleMethod::Triangle5, t5.as_deref()),
                ],
                data_classification(*data),
                *co,
            )?;
            HistoryPayload::Manual(analyze_manual_with(&inputs, &config.co))
        }
        SubCommand::Breakdown { class, readings } => HistoryPayload::Breakdown(
            analyze_breakdown(&args.id_trafo, *class, readings, &config.breakdown.classes)
                .context("Breakdown voltage test rejected")?,
        ),
        SubCommand::Co { ppm } => {
            anyhow::ensure!(ppm.is_finite() && *ppm >= 0.0, "CO level must be a non-negative number");
            HistoryPayload::Co(analyze_co_level_with(*ppm, &config.co))
        }
        SubCommand::Diagram { triangle } => {
            return print_json(&diagram(*triangle));
        }
        SubCommand::History { limit, prune_days } => {
            let history = open_history(&config)?;
            if let Some(days) = *prune_days {
                let cutoff = chrono::Utc::now() - chrono::Duration::days(i64::from(days));
                let removed = history
                    .cleanup_before(cutoff)
                    .context("Failed to prune history")?;
                info!(removed, days, "History pruned");
            }
            let records = history
                .recent(limit.unwrap_or(config.history.recent_limit))
                .context("Failed to read history")?;
            info!(
                count = records.len(),
                total = history.count(),
                size_bytes = history.size_bytes(),
                "History listed"
            );
            return print_json(&records);
        }
        SubCommand::Config { check } => {
            return run_config(check.as_deref(), &config, &provenance);
        }
    };

    print_json(&payload)?;

    if args.save {
        let history = open_history(&config)?;
        let record = HistoryRecord::new(header, payload);
        save_and_notify(&history, &TracingNotifier, &record)
            .context("Failed to save result to history")?;
        info!(id = %record.id, "Result saved");
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<(EngineConfig, ConfigProvenance)> {
    match explicit {
        Some(path) => {
            let loaded = EngineConfig::load_from_file_with_provenance(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            info!(path = %path.display(), "Loaded engine config");
            Ok(loaded)
        }
        None => Ok(EngineConfig::load_with_provenance()),
    }
}

fn open_history(config: &EngineConfig) -> Result<SledHistory> {
    SledHistory::open(&config.history.path).with_context(|| {
        format!(
            "Failed to open history database at {}",
            config.history.path.display()
        )
    })
}

/// Build one completed input per selected triangle.
///
/// With no triangle selected, a CO reading still yields one completed input
/// without a zone so the sample is screened.
fn manual_inputs(
    selections: [(TriangleMethod, Option<&str>); 3],
    data_classification: DataClassification,
    co: Option<f64>,
) -> Result<Vec<ManualTriangleInput>> {
    let gas_concentrations = GasConcentration {
        co,
        ..Default::default()
    };

    let mut inputs = Vec::new();
    for (method, selection) in selections {
        let Some(raw) = selection else { continue };
        let code: FaultCode = raw.parse().map_err(anyhow::Error::msg)?;
        let fault = TriangleFault::on(method, code)
            .with_context(|| format!("{code} is not a zone of {method}"))?;
        inputs.push(ManualTriangleInput {
            data_classification,
            gas_concentrations,
            ..ManualTriangleInput::completed(fault)
        });
    }

    if inputs.is_empty() {
        warn!("No triangle selected, result will be NORMAL");
        if co.is_some() {
            inputs.push(ManualTriangleInput {
                data_classification,
                gas_concentrations,
                selected_fault: None,
                is_completed: true,
            });
        }
    }
    Ok(inputs)
}

fn run_config(
    check: Option<&std::path::Path>,
    config: &EngineConfig,
    provenance: &ConfigProvenance,
) -> Result<()> {
    if let Some(path) = check {
        let (_checked, checked_provenance) = EngineConfig::load_from_file_with_provenance(path)
            .with_context(|| format!("{} is not a valid engine config", path.display()))?;
        // Range warnings were already logged by the load
        info!(
            path = %path.display(),
            explicit_keys = checked_provenance.explicit_keys.len(),
            "Config OK"
        );
        return Ok(());
    }

    match &provenance.source {
        Some(source) => info!(source = %source.display(), "Effective config"),
        None => info!("Effective config (built-in defaults)"),
    }
    print!("{}", config.to_toml().context("Failed to render config")?);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafo_dga::types::CoSeverity;

    const NONE_SELECTED: [(TriangleMethod, Option<&str>); 3] = [
        (TriangleMethod::Triangle1, None),
        (TriangleMethod::Triangle4, None),
        (TriangleMethod::Triangle5, None),
    ];

    #[test]
    fn test_manual_co_without_triangle_is_screened() {
        let inputs = manual_inputs(NONE_SELECTED, DataClassification::Data1, Some(650.0)).unwrap();
        assert_eq!(inputs.len(), 1);
        assert!(inputs[0].is_completed);
        assert!(inputs[0].selected_fault.is_none());

        let analysis = analyze_manual_with(&inputs, &EngineConfig::default().co);
        assert_eq!(analysis.results().count(), 0);
        let co = analysis.co_analysis.expect("CO reading must be screened");
        assert_eq!(co.severity, CoSeverity::High);
    }

    #[test]
    fn test_manual_co_without_triangle_respects_data_class() {
        let inputs = manual_inputs(NONE_SELECTED, DataClassification::Data2, Some(650.0)).unwrap();
        let analysis = analyze_manual_with(&inputs, &EngineConfig::default().co);
        assert!(analysis.co_analysis.is_none());
    }

    #[test]
    fn test_manual_nothing_given_is_empty() {
        let inputs = manual_inputs(NONE_SELECTED, DataClassification::Data1, None).unwrap();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_manual_selection_carries_co() {
        let inputs = manual_inputs(
            [
                (TriangleMethod::Triangle1, Some("t1")),
                (TriangleMethod::Triangle4, None),
                (TriangleMethod::Triangle5, Some("O")),
            ],
            DataClassification::Data1,
            Some(520.0),
        )
        .unwrap();
        assert_eq!(inputs.len(), 2);
        assert!(inputs.iter().all(|i| i.gas_concentrations.co == Some(520.0)));
    }

    #[test]
    fn test_manual_zone_from_other_triangle_rejected() {
        let err = manual_inputs(
            [
                (TriangleMethod::Triangle1, None),
                (TriangleMethod::Triangle4, Some("T3")),
                (TriangleMethod::Triangle5, None),
            ],
            DataClassification::Data1,
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("T3"));
    }
}
