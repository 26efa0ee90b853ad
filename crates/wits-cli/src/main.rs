//! CLI entry point - the composition root.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wits_cli::{Cli, CliError, Commands, handlers};
use wits_core::Settings;

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::from_env();

    match cli.command {
        Commands::Run(args) => handlers::run::execute(args, &settings).await?,
        Commands::Check => handlers::check::execute(&settings).await?,
        Commands::Voices => handlers::voices::execute(&settings, &mut std::io::stdout())?,
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        let cli_err = err.downcast_ref::<CliError>();
        if let Some(headline) = cli_err.and_then(CliError::headline) {
            eprintln!("{headline}");
        }
        eprintln!("Error: {err}");
        let code = cli_err.map_or(1, |cli_err| {
            for suggestion in cli_err.suggestions() {
                eprintln!("  - {suggestion}");
            }
            cli_err.exit_code()
        });
        std::process::exit(code);
    }
}
