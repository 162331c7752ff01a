//! route-gate - drive the guarded router from the command line

use clap::Parser;
use route_gate::gate::GateSettings;
use route_gate::utils::logging::{LoggingOptions, init_logging};
use route_gate::{Config, Router, SessionAuthority};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

/// Navigate through the route table, consulting the access gate on guarded routes
#[derive(Debug, Parser)]
#[command(name = "route-gate", version, about)]
struct Args {
    /// YAML configuration file; environment variables are used when omitted
    #[arg(short, long, env = "ROUTE_GATE_CONFIG")]
    config: Option<PathBuf>,

    /// Start with a logged-in session
    #[arg(long)]
    login: bool,

    /// Print outcomes as JSON lines
    #[arg(long)]
    json: bool,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "ROUTE_GATE_LOG", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Paths to navigate to, in order
    #[arg(required = true)]
    paths: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let logging = LoggingOptions {
        level: args.log_level.clone(),
        json: args.log_json,
    };
    if let Err(e) = init_logging(&logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    let authority = Arc::new(SessionAuthority::from_config(config.authority()));
    if args.login {
        authority.login();
    }

    let router = Router::new(
        config.route_table()?,
        authority,
        GateSettings::from(config.gate()),
    );
    info!(routes = router.table().len(), "Router ready");

    for path in &args.paths {
        let outcome = router.navigate(path).await;
        if args.json {
            println!("{}", serde_json::to_string(&outcome)?);
        } else {
            println!("{:<24} {}", path, outcome);
        }
    }

    Ok(())
}
