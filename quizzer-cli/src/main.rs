use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "quizzer", about = "Reading assistant and quiz generator for plain-text documents")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer questions about a document
    Ask(commands::ask::AskArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate quiz questions from a document
    Generate(commands::generate::GenerateArgs),
    /// List models on the Ollama server
    Models(commands::models::ModelsArgs),
    /// Take a quiz
    Quiz(commands::quiz::QuizArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Ask(args) => commands::ask::run(args).await,
        Commands::Config(args) => commands::config::run(args),
        Commands::Generate(args) => commands::generate::run(args).await,
        Commands::Models(args) => commands::models::run(args).await,
        Commands::Quiz(args) => commands::quiz::run(args).await,
    }
}
