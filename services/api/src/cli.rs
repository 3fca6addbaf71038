use crate::score::{run_score, run_stats, ScoreArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loanpath::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "loanpath-api",
    about = "Run the LoanPath gateway or score profiles from the command line",
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
    /// Print the offline readiness breakdown for a financial profile
    Score(ScoreArgs),
    /// Summarize a JSON array of stored simulations
    Stats(StatsArgs),
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
        Command::Score(args) => run_score(args),
        Command::Stats(args) => run_stats(args),
    }
}
