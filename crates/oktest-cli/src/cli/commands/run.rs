use oktest_core::{format, GradedTest, Output};
use tracing::info;

use super::super::args::RunArgs;
use super::context::CommandContext;
use crate::exit_codes::{EXIT_SUCCESS, EXIT_TEST_FAILURE};
use crate::prompt::TerminalPrompt;

pub(crate) fn run(args: RunArgs) -> anyhow::Result<i32> {
    let ctx = CommandContext::resolve(&args.test, args.hash_key.as_deref())?;
    let mut test = ctx.load(&args.test)?;
    let mut out = Output::stdout();

    if args.unlock {
        return unlock(&ctx, &mut test, &mut out);
    }

    let tally = test.run(&mut out)?;
    format::print_progress_bar(&mut out, &test.name, tally.passed, tally.failed, tally.locked);
    out.blank();

    Ok(if tally.is_clean() {
        EXIT_SUCCESS
    } else {
        EXIT_TEST_FAILURE
    })
}

fn unlock(ctx: &CommandContext, test: &mut GradedTest, out: &mut Output) -> anyhow::Result<i32> {
    ctx.require_assignment()?;
    let mut prompt = TerminalPrompt::new(ctx.answer_key()?);

    test.unlock(&mut prompt, out)?;
    test.dump()?;
    info!(test = %test.name, attempts = prompt.total_attempts(), "unlock session finished");
    Ok(EXIT_SUCCESS)
}
