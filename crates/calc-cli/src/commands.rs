use std::path::{Path, PathBuf};

use anyhow::Context;
use calc_contract::{CalculationRecord, CalculatorContract};
use calc_server::{CalcServer, ServerConfig};
use calc_state::FileWorldState;
use colored::Colorize;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let state_path = cli.state_path();
    let explicit_state = cli.state.clone();
    match cli.command {
        Command::Add(args) => cmd_add(&state_path, args, &cli.format),
        Command::Get(args) => cmd_get(&state_path, args, &cli.format),
        Command::Invoke(args) => cmd_invoke(&state_path, args),
        Command::Serve(args) => cmd_serve(args, explicit_state),
    }
}

fn open_contract(path: &Path) -> anyhow::Result<CalculatorContract<FileWorldState>> {
    let state = FileWorldState::open(path)
        .with_context(|| format!("failed to open world state at {}", path.display()))?;
    Ok(CalculatorContract::new(state))
}

fn cmd_add(state_path: &Path, args: AddArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let contract = open_contract(state_path)?;
    let record = contract.add(&args.id, args.operand1, args.operand2)?;
    match format {
        OutputFormat::Json => println!("{}", record_json(&record)?),
        OutputFormat::Text => {
            println!(
                "{} Stored {} in {}",
                "✓".green().bold(),
                args.id.yellow(),
                state_location(&contract)
            );
            println!("  {}", describe(&record));
        }
    }
    Ok(())
}

fn cmd_get(state_path: &Path, args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let contract = open_contract(state_path)?;
    let record = contract.get_calculation_result(&args.id)?;
    match format {
        OutputFormat::Json => println!("{}", record_json(&record)?),
        OutputFormat::Text => {
            println!("Calculation {}", args.id.yellow().bold());
            println!("  {}", describe(&record));
        }
    }
    Ok(())
}

fn cmd_invoke(state_path: &Path, args: InvokeArgs) -> anyhow::Result<()> {
    let contract = open_contract(state_path)?;
    let payload = contract.invoke(&args.function, &args.args)?;
    if payload.is_empty() {
        println!("{} {} committed", "✓".green().bold(), args.function.cyan());
    } else {
        println!("{}", String::from_utf8_lossy(&payload));
    }
    Ok(())
}

fn cmd_serve(args: ServeArgs, state: Option<PathBuf>) -> anyhow::Result<()> {
    let config = serve_config(&args, state)?;
    println!(
        "calc server on {} (state: {})",
        config.bind_addr.to_string().bold(),
        config
            .state_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "in-memory".into())
    );
    let server = CalcServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(server.serve())?;
    Ok(())
}

/// Resolve the server configuration: config file first, then flags on top.
fn serve_config(args: &ServeArgs, state: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    if state.is_some() {
        config.state_path = state;
    }
    Ok(config)
}

/// Where the contract's world state lives on disk.
fn state_location(contract: &CalculatorContract<FileWorldState>) -> String {
    contract.state().path().display().to_string()
}

fn record_json(record: &CalculationRecord) -> anyhow::Result<String> {
    let bytes = record.to_json_bytes()?;
    Ok(String::from_utf8(bytes)?)
}

fn describe(record: &CalculationRecord) -> String {
    format!(
        "{} + {} = {}",
        record.operand1,
        record.operand2,
        record.result.to_string().green().bold()
    )
}
