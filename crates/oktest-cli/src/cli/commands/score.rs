use oktest_core::Output;

use super::super::args::TestArgs;
use super::context::CommandContext;
use crate::exit_codes::EXIT_SUCCESS;

pub(crate) fn run(args: TestArgs) -> anyhow::Result<i32> {
    let ctx = CommandContext::resolve(&args, None)?;
    let mut test = ctx.load(&args)?;
    let mut out = Output::stdout();

    let score = test.score(&mut out)?;
    out.line(format!("Score: {} / {}", score, test.points));
    Ok(EXIT_SUCCESS)
}
