use crate::analysis::{run_analyze, run_timeline, AnalyzeArgs, TimelineArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_market::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Market Analytics",
    about = "Serve and run job market analytics from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyse a listing export and print the market summary
    Analyze(AnalyzeArgs),
    /// Print the monthly posting timeline for a listing export
    Timeline(TimelineArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Timeline(args) => run_timeline(args),
    }
}
