//! Defense-experiment configuration CLI.
//!
//! This binary is the boundary collaborator around the configuration engine.
//! It performs:
//! 1. **Input:** Read an experiment options bundle (JSON) and describe a homogeneous CPU group.
//! 2. **Derivation:** Run the eligibility gate and the requested builders.
//! 3. **Output:** Print the configured group as JSON for an external applier.
//!
//! The engine itself never touches a live simulator; whatever consumes the
//! printed group is responsible for applying it.

use clap::Parser;
use std::{fs, process};

use o3shield_core::config::ExperimentOptions;
use o3shield_core::model::{CpuInstance, CpuModelClass};
use o3shield_core::{configure_defense, configure_elastic_trace};

#[derive(Parser, Debug)]
#[command(
    name = "o3shield",
    author,
    version,
    about = "Derive and validate defense-experiment configuration for an O3 CPU group",
    long_about = "Reads an experiment options bundle (JSON, flat external key names such as \
needsTSO/HWName/CCAssoc) plus a CPU group description, validates the combination, and prints \
the finalized per-core configuration as JSON.\n\nExamples:\n  o3shield --options run.json --defense\n  o3shield --options run.json --cpus 4 --rob 192 --etrace --defense"
)]
struct Cli {
    /// Path to the experiment options bundle (JSON).
    #[arg(short, long)]
    options: String,

    /// CPU model class for the whole group.
    #[arg(long, default_value = "DefenseO3")]
    model: String,

    /// Number of CPU instances in the group.
    #[arg(long, default_value_t = 1)]
    cpus: usize,

    /// Reorder buffer entries per instance.
    #[arg(long, default_value_t = 192)]
    rob: u32,

    /// Load queue entries per instance.
    #[arg(long, default_value_t = 32)]
    lq: u32,

    /// Store queue entries per instance.
    #[arg(long, default_value_t = 32)]
    sq: u32,

    /// Configure elastic-trace recording.
    #[arg(long)]
    etrace: bool,

    /// Configure the defense experiment.
    #[arg(long)]
    defense: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if !cli.etrace && !cli.defense {
        eprintln!("Error: nothing to do; pass --etrace and/or --defense");
        process::exit(1);
    }

    let raw = fs::read_to_string(&cli.options).unwrap_or_else(|e| {
        eprintln!("Error reading options bundle {}: {}", cli.options, e);
        process::exit(1);
    });
    let options: ExperimentOptions = serde_json::from_str(&raw).unwrap_or_else(|e| {
        eprintln!("Error parsing options bundle {}: {}", cli.options, e);
        process::exit(1);
    });

    let class: CpuModelClass = cli.model.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut cpus: Vec<CpuInstance> = (0..cli.cpus)
        .map(|_| CpuInstance::new(cli.rob, cli.lq, cli.sq))
        .collect();

    println!(
        "Configuration: model={} cpus={} rob={} lq={} sq={}",
        class, cli.cpus, cli.rob, cli.lq, cli.sq
    );

    if cli.etrace {
        if let Err(e) = configure_elastic_trace(class, &mut cpus, &options) {
            eprintln!("\n[!] FATAL: {}", e);
            process::exit(1);
        }
        println!("[*] Elastic trace configured");
    }

    if cli.defense {
        if let Err(e) = configure_defense(class, &mut cpus, &options) {
            eprintln!("\n[!] FATAL: {}", e);
            process::exit(1);
        }
        println!("[*] Defense experiment configured");
    }

    match serde_json::to_string_pretty(&cpus) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing configured group: {}", e);
            process::exit(1);
        }
    }
}
