//! Point d'entrée CLI pour village-map

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Carte des villages de Nouveau Taipei colorés par zone
#[derive(Parser)]
#[command(name = "village-map")]
#[command(author, version)]
#[command(about = "Servir ou exporter la carte des villages de Nouveau Taipei par zone")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Serve {
            config,
            static_dir,
            port,
        } => {
            info!(config = %config, "Serve");
            cli::cmd_serve(&config, static_dir, port).await?;
        }
        Commands::Classify {
            input,
            output,
            report,
        } => {
            info!(input = %input.display(), output = %output.display(), "Classify");
            cli::cmd_classify(&input, &output, report.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
