use oktest_core::Output;

use super::super::args::LockArgs;
use super::context::CommandContext;
use crate::exit_codes::EXIT_SUCCESS;

pub(crate) fn run(args: LockArgs) -> anyhow::Result<i32> {
    let ctx = CommandContext::resolve(&args.test, args.hash_key.as_deref())?;
    let key = ctx.answer_key()?;
    let mut test = ctx.load(&args.test)?;
    let mut out = Output::stdout();

    test.lock(&key.hash_fn(), &mut out);
    test.dump()?;
    Ok(EXIT_SUCCESS)
}
