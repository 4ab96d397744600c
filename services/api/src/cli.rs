use crate::demo::{run_demo, run_journal_import, run_score, DemoArgs, JournalArgs, ScoreArgs};
use crate::server;
use burnout_radar::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Burnout Radar",
    about = "Score daily burnout risk and serve the burnout dashboard API",
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
    /// Score a single day's inputs and print the breakdown
    Score(ScoreArgs),
    /// Import a CSV journal of past days and print the resulting trend
    Journal(JournalArgs),
    /// Walk through a simulated week for one user
    Demo(DemoArgs),
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
        Command::Journal(args) => run_journal_import(args),
        Command::Demo(args) => run_demo(args),
    }
}
