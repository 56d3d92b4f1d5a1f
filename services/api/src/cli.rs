use crate::commands::{
    run_applicants, run_apply, run_eligibility, run_jobs, run_profile, ApplyArgs,
    EligibilityArgs, JobsArgs, ProfileArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobfair::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Fair Tracker",
    about = "Serve or query the job fair listings and application tracker",
    version
)]
struct Cli {
    /// Directory holding companies.csv, jobs.csv, candidates.csv and applications.csv
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List open job postings
    Jobs(JobsArgs),
    /// Check whether a job currently accepts applications
    Eligibility(EligibilityArgs),
    /// Apply to a job on behalf of a candidate
    Apply(ApplyArgs),
    /// Show a candidate and their application history
    Profile(ProfileArgs),
    /// Show applicant counts for every job
    Applicants,
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
    let data_dir = cli.data_dir;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, data_dir).await,
        Command::Jobs(args) => run_jobs(args, data_dir),
        Command::Eligibility(args) => run_eligibility(args, data_dir),
        Command::Apply(args) => run_apply(args, data_dir),
        Command::Profile(args) => run_profile(args, data_dir),
        Command::Applicants => run_applicants(data_dir),
    }
}
