use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "gridsched",
    about = "gridsched — stage and compile workload scheduling passes",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a pass file and print the compiled instruction batches.
    ///
    /// Removals are always printed as the first batch; adds and restarts
    /// follow in the second. Dispatch them in that order.
    Compile {
        /// Path to the pass file (TOML)
        path: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print each member's report, terminated workloads first
    Inspect {
        /// Path to the pass file (TOML)
        path: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gridsched=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { path, format } => commands::compile::compile(&path, format),
        Commands::Inspect { path, format } => commands::inspect::inspect(&path, format),
    }
}
