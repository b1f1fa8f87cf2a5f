//! eaa CLI - companion tooling for EAA provisioning.
//!
//! - Generate import manifests for applications that already exist on the
//!   server side
//! - List points of presence, connectors, identity providers and app
//!   categories

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod error;
mod output;

use error::CliResult;

/// eaa CLI - application-access management
#[derive(Parser)]
#[command(name = "eaa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Connection options shared by every command.
#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Path to the edgerc credentials file
    #[arg(long, global = true, default_value = ".edgerc")]
    pub edgerc: PathBuf,

    /// Credentials section within the edgerc file
    #[arg(long, global = true, default_value = "default")]
    pub section: String,

    /// Contract to operate on
    #[arg(long = "contract-id", global = true, env = "EAA_CONTRACT_ID", default_value = "")]
    pub contract_id: String,

    /// Account switch key
    #[arg(long = "account-switch-key", global = true)]
    pub account_switch_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an import manifest for existing applications
    Import(commands::import::ImportArgs),

    /// List points of presence
    Pops(commands::pops::PopsArgs),

    /// List connectors
    Agents(commands::agents::AgentsArgs),

    /// List identity providers with their directories
    Idps(commands::idps::IdpsArgs),

    /// List application categories
    Categories(commands::categories::CategoriesArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        error.print();
        std::process::exit(error.exit_code());
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Import(args) => commands::import::execute(&cli.global, args).await,
        Commands::Pops(args) => commands::pops::execute(&cli.global, args).await,
        Commands::Agents(args) => commands::agents::execute(&cli.global, args).await,
        Commands::Idps(args) => commands::idps::execute(&cli.global, args).await,
        Commands::Categories(args) => commands::categories::execute(&cli.global, args).await,
    }
}
