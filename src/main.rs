//! Gift exchange CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   gift-exchange.toml
//!         │
//!         ▼
//!   ┌──────────┐    ┌────────────┐    ┌──────────────────────────────┐
//!   │  config  │───▶│  exchange  │───▶│          matching            │
//!   │ loader + │    │  service + │    │ registry → shuffle → HK BFS/ │
//!   │ validate │    │  solver    │    │ DFS phases → extract         │
//!   └──────────┘    └─────┬──────┘    └──────────────────────────────┘
//!                         │
//!              ┌──────────┴──────────┐
//!              ▼                     ▼
//!        ┌──────────┐          ┌──────────┐
//!        │  store   │          │  notify  │
//!        │ memory / │          │ spawned, │
//!        │ json file│          │ best-eff.│
//!        └──────────┘          └──────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use gift_exchange::config::{load_config, ExchangeConfig, GroupConfig};
use gift_exchange::exchange::{AssignmentRun, AssignmentService};
use gift_exchange::notify::LogNotifier;
use gift_exchange::observability::logging;
use gift_exchange::store::{AssignmentStore, JsonFileStore, MemoryStore};

#[derive(Parser)]
#[command(name = "gift-exchange")]
#[command(about = "Draw gift exchange assignments that respect exclusions", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "gift-exchange.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and summarize groups
    Check,
    /// Draw assignments for one group or every group
    Assign {
        /// Only draw this group
        #[arg(short, long)]
        group: Option<String>,

        /// Fixed RNG seed (overrides solver.seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Print assignments as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the stored assignment of a group
    Show {
        #[arg(short, long)]
        group: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    logging::init_logging(&config.observability);

    tracing::debug!(path = %cli.config.display(), groups = config.groups.len(), "Configuration loaded");

    match cli.command {
        Commands::Check => {
            for group in &config.groups {
                println!(
                    "{}: {} participants, {} exclusions, {} history entries",
                    group.name,
                    group.participants.len(),
                    group.exclusions.len(),
                    group.history.len()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Assign { group, seed, json } => {
            if seed.is_some() {
                config.solver.seed = seed;
            }
            let groups: Vec<GroupConfig> = match group {
                Some(name) => match config.group(&name) {
                    Some(g) => vec![g.clone()],
                    None => {
                        eprintln!("Error: unknown group '{}'", name);
                        return Ok(ExitCode::FAILURE);
                    }
                },
                None => config.groups.clone(),
            };

            match &config.store.path {
                Some(path) => {
                    let store = Arc::new(JsonFileStore::open(path)?);
                    assign_groups(&config, store, &groups, json).await
                }
                None => assign_groups(&config, Arc::new(MemoryStore::new()), &groups, json).await,
            }
        }
        Commands::Show { group } => {
            let Some(path) = &config.store.path else {
                eprintln!("Error: store.path is not configured; nothing is persisted");
                return Ok(ExitCode::FAILURE);
            };
            let store = JsonFileStore::open(path)?;
            let records = store.group_assignments(&group);
            if records.is_empty() {
                eprintln!("No stored assignment for group '{}' in {}", group, store.path().display());
                return Ok(ExitCode::FAILURE);
            }
            for record in records {
                println!("{} -> {}", record.giver, record.receiver);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn assign_groups<S: AssignmentStore>(
    config: &ExchangeConfig,
    store: Arc<S>,
    groups: &[GroupConfig],
    json: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let service = AssignmentService::from_config(config, store, Arc::new(LogNotifier::new()));
    let mut runs = Vec::new();
    let mut failed = false;

    for group in groups {
        match service.assign(group).await {
            Ok(run) => runs.push(run),
            Err(e) => {
                failed = true;
                if e.is_incomplete() {
                    eprintln!("{}: {} (relax some exclusions and try again)", group.name, e);
                } else {
                    eprintln!("{}: {}", group.name, e);
                }
            }
        }
    }

    print_runs(&runs, json)?;

    for run in runs {
        if let Some(handle) = run.notification {
            if let Err(e) = handle.await {
                tracing::warn!(group = %run.group, error = %e, "Notification task aborted");
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn print_runs(runs: &[AssignmentRun], json: bool) -> Result<(), serde_json::Error> {
    if json {
        let value: serde_json::Value = runs
            .iter()
            .map(|run| {
                serde_json::json!({
                    "group": run.group,
                    "run_id": run.run_id,
                    "assignments": run.assignment,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for run in runs {
        println!("[{}] run {}", run.group, run.run_id);
        for pair in run.assignment.iter() {
            println!("  {} -> {}", pair.giver, pair.receiver);
        }
    }
    Ok(())
}
