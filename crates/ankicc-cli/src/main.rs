//! CLI entry point - the composition root.
//!
//! Loads `.env`, resolves configuration (environment, then flags),
//! installs logging and dispatches to a handler. Errors are mapped to
//! sysexits-style exit codes through `CliError`.

use clap::Parser;

use ankicc_cli::{Cli, CliConfig, CliContext, CliError, Commands, handlers, init_logging};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    let config = CliConfig::resolve(
        |key| std::env::var(key).ok(),
        cli.verbose,
        cli.indent.as_deref(),
    )?;
    init_logging(&config);
    tracing::debug!(?config, "Resolved configuration");

    let ctx = CliContext::new(config);

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Validate { files } => handlers::validate::execute(&files).await?,
        Commands::Show { file, fields } => handlers::show::execute(&file, fields).await?,
        Commands::Fmt { file, write } => handlers::fmt::execute(&ctx, &file, write).await?,
    }

    Ok(())
}
