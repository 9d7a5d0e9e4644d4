// FICHIER : engine/tools/evo-cli/src/main.rs

use clap::{Parser, Subcommand};

mod commands;

use evoprompt::{user_error, utils::prelude::*};

#[derive(Parser)]
#[command(name = "evoprompt")]
#[command(about = "Évolution de consignes (rôle, sujet) par algorithme génétique piloté par LLM", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Lance une exécution complète et écrit ses artefacts dans un dossier horodaté
    Evolve(commands::evolve::EvolveArgs),

    /// Filtre un corpus brut par nombre minimal de mots
    PrepareCorpus(commands::corpus::CorpusArgs),

    /// Pont pour un tuner de paramètres : exécute puis affiche le coût (1 - fitness max)
    Tune(commands::tune::TuneArgs),
}

#[tokio::main]
async fn main() {
    // Variables EVO_* depuis un éventuel .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = execute_command(cli.command).await {
        user_error!("CMD_FAIL", error = e, component = "CLI", action = "EXECUTE_COMMAND");
        std::process::exit(1);
    }
    tracing::debug!("Fin de l'exécution du CLI");
}

async fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Evolve(args) => commands::evolve::handle(args).await,
        Commands::PrepareCorpus(args) => commands::corpus::handle(args).await,
        Commands::Tune(args) => commands::tune::handle(args).await,
    }
}
