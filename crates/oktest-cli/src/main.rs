use clap::Parser;

mod cli;
pub mod exit_codes;
mod prompt;

use cli::args::Cli;
use cli::commands::dispatch;
use exit_codes::EXIT_INTERNAL_ERROR;
use oktest_core::GradingError;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let code = match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("fatal: {e:?}");
            e.downcast_ref::<GradingError>()
                .map(exit_codes::for_error)
                .unwrap_or(EXIT_INTERNAL_ERROR)
        }
    };
    std::process::exit(code);
}
