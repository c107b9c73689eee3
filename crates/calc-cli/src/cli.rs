use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// State document used when `--state` is not given.
pub const DEFAULT_STATE_PATH: &str = "calc-state.json";

#[derive(Parser)]
#[command(
    name = "calc",
    about = "Calculator chaincode: add numbers and keep the results in world state",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// World-state document to read and write
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add two numbers and store the result under an ID
    Add(AddArgs),
    /// Show the stored result for an ID
    Get(GetArgs),
    /// Invoke a contract function with raw string arguments
    Invoke(InvokeArgs),
    /// Serve the contract over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
#[command(allow_negative_numbers = true)]
pub struct AddArgs {
    pub id: String,
    pub operand1: f64,
    pub operand2: f64,
}

#[derive(Args)]
pub struct GetArgs {
    pub id: String,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub function: String,
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<String>,
    /// TOML server configuration
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn state_path(&self) -> PathBuf {
        self.state
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH))
    }
}
