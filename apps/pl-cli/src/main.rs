use clap::{Parser, Subcommand};
use pl_core::{Parameter, Role};
use pl_sim::{GeneratorRegistry, run, write_csv};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod error;
mod scenario;

use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "pl-cli")]
#[command(about = "pidloop CLI - closed-loop PID simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered system generators
    List,
    /// Show every role's parameters for a generator
    Params {
        /// Generator name (see `list`)
        generator: String,
        /// Print the parameter records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a scenario
    Run {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
        /// Output CSV file path (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate scenario file syntax and structure
    Validate {
        /// Path to the scenario YAML or JSON file
        scenario_path: PathBuf,
    },
}

#[derive(Serialize)]
struct RoleParameters {
    role: Role,
    kind: String,
    parameters: Vec<Parameter>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = GeneratorRegistry::with_builtins()?;

    match cli.command {
        Commands::List => cmd_list(&registry),
        Commands::Params { generator, json } => cmd_params(&registry, &generator, json),
        Commands::Run {
            scenario_path,
            output,
        } => cmd_run(&registry, &scenario_path, output.as_deref()),
        Commands::Validate { scenario_path } => cmd_validate(&registry, &scenario_path),
    }
}

fn cmd_list(registry: &GeneratorRegistry) -> CliResult<()> {
    println!("Generators:");
    for g in registry.iter() {
        println!("  {:<12} {}", g.name(), g.description());
    }
    Ok(())
}

fn cmd_params(registry: &GeneratorRegistry, generator: &str, json: bool) -> CliResult<()> {
    let system = registry.generate(generator)?;
    let roles: Vec<RoleParameters> = Role::ALL
        .iter()
        .map(|&role| RoleParameters {
            role,
            kind: system.component(role).describe(),
            parameters: system.parameters(role),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&roles)?);
        return Ok(());
    }

    println!(
        "System: {} (dt = {}, setpoint = {})",
        system.name(),
        system.time_step(),
        system.setpoint()
    );
    for r in &roles {
        println!("  {} [{}]", r.role, r.kind);
        if r.parameters.is_empty() {
            println!("    (no parameters)");
        }
        for p in &r.parameters {
            println!(
                "    {:<12} = {:<10} [{} .. {}] step {} default {} {}",
                p.name, p.value, p.minimum, p.maximum, p.step, p.default, p.unit
            );
        }
    }
    Ok(())
}

fn cmd_run(registry: &GeneratorRegistry, scenario_path: &Path, output: Option<&Path>) -> CliResult<()> {
    println!("Running scenario: {}", scenario_path.display());
    let scenario = pl_project::load(scenario_path)?;
    let mut system = scenario::build_system(registry, &scenario)?;
    let opts = scenario::run_options(&scenario);

    let started = Instant::now();
    let trajectory = run(&mut system, &opts)?;
    let elapsed = started.elapsed();

    println!(
        "✓ Simulation completed: {} ({} steps, {:.3} s simulated, {:.1} ms wall)",
        scenario.name,
        system.steps(),
        system.time(),
        elapsed.as_secs_f64() * 1e3
    );
    println!("  Samples: {}", trajectory.len());
    if let Some(last) = trajectory.last() {
        println!("  Setpoint: {}", last.setpoint);
        println!("  Final measurement: {:.6}", last.measurement);
        println!("  Final error: {:.6}", last.setpoint - last.measurement);
    }
    println!("  Max |error|: {:.6}", trajectory.max_abs_error());

    if let Some(path) = output {
        let file = File::create(path).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        write_csv(&trajectory, BufWriter::new(file)).map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        println!("✓ Wrote {} rows to {}", trajectory.len(), path.display());
    }
    Ok(())
}

fn cmd_validate(registry: &GeneratorRegistry, scenario_path: &Path) -> CliResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = pl_project::load(scenario_path)?;
    if registry.get(&scenario.generator).is_none() {
        return Err(pl_sim::SimError::UnknownGenerator {
            name: scenario.generator,
        }
        .into());
    }
    println!("✓ Scenario is valid");
    Ok(())
}
