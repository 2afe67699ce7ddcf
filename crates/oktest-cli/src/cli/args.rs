use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "oktest",
    version,
    about = "Run, score, lock and unlock ok-style grading tests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a test's suites and report passed/failed/locked cases
    Run(RunArgs),
    /// Compute the points earned on a test
    Score(TestArgs),
    /// Lock a test for shipping: hash answers, drop hidden cases
    Lock(LockArgs),
    Version,
}

/// Arguments shared by every command that loads a test file.
#[derive(clap::Args, Clone, Debug)]
pub struct TestArgs {
    /// Backing file of the test (`test = { ... }`)
    pub file: PathBuf,

    /// Grader configuration (YAML)
    #[arg(long, env = "OKTEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Assignment name; namespaces unlock identities
    #[arg(long, env = "OKTEST_ASSIGNMENT")]
    pub assignment: Option<String>,

    /// Run every suite and print every case log
    #[arg(short, long)]
    pub verbose: bool,

    /// Interactive case mode, for strategies that support one (`concept` ignores it)
    #[arg(short, long)]
    pub interactive: bool,

    /// Per-case timeout in seconds, for strategies that honour one (`concept` ignores it)
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub test: TestArgs,

    /// Unlock locked cases interactively instead of running them
    #[arg(short = 'u', long)]
    pub unlock: bool,

    /// Key the answers were locked with (required with --unlock)
    #[arg(long, env = "OKTEST_HASH_KEY", hide_env_values = true)]
    pub hash_key: Option<String>,
}

#[derive(clap::Args, Clone, Debug)]
pub struct LockArgs {
    #[command(flatten)]
    pub test: TestArgs,

    /// Key used to hash answers
    #[arg(long, env = "OKTEST_HASH_KEY", hide_env_values = true)]
    pub hash_key: Option<String>,
}
