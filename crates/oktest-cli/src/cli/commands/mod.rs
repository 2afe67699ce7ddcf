use super::args::*;

pub(crate) mod context;
pub(crate) mod lock;
pub(crate) mod run;
pub(crate) mod score;

use crate::exit_codes::EXIT_SUCCESS;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Run(args) => run::run(args),
        Command::Score(args) => score::run(args),
        Command::Lock(args) => lock::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(EXIT_SUCCESS)
        }
    }
}
