//! Terminal implementation of the unlock exchange.

use std::collections::BTreeMap;

use dialoguer::{theme::ColorfulTheme, Input, Select};
use oktest_core::{AnswerKey, Interact, Output, UnlockRequest};
use tracing::debug;

/// One answer from the student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Guess {
    Text(String),
    /// Index into the request's choices.
    Choice(usize),
    Abandon,
}

/// Where guesses come from.
pub(crate) trait Guesser {
    fn guess(&mut self, request: &UnlockRequest<'_>) -> anyhow::Result<Guess>;
}

/// Reads guesses from the terminal: a selection list when the case has
/// choices, free text otherwise. Esc on a list abandons the case.
pub(crate) struct DialoguerGuesser {
    theme: ColorfulTheme,
}

impl Default for DialoguerGuesser {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Guesser for DialoguerGuesser {
    fn guess(&mut self, request: &UnlockRequest<'_>) -> anyhow::Result<Guess> {
        if let Some(choices) = request.choices {
            let picked = Select::with_theme(&self.theme)
                .with_prompt("?")
                .items(choices)
                .default(0)
                .interact_opt()?;
            return Ok(picked.map_or(Guess::Abandon, Guess::Choice));
        }

        let text: String = Input::with_theme(&self.theme)
            .with_prompt("?")
            .allow_empty(true)
            .interact_text()?;
        Ok(Guess::Text(text))
    }
}

/// Asks for each locked answer until the guess verifies against its hash.
/// A blank guess abandons the case.
pub(crate) struct TerminalPrompt<G = DialoguerGuesser> {
    key: AnswerKey,
    guesser: G,
    attempts: BTreeMap<String, u32>,
}

impl TerminalPrompt {
    pub fn new(key: AnswerKey) -> Self {
        Self::with_guesser(key, DialoguerGuesser::default())
    }
}

impl<G: Guesser> TerminalPrompt<G> {
    pub fn with_guesser(key: AnswerKey, guesser: G) -> Self {
        Self {
            key,
            guesser,
            attempts: BTreeMap::new(),
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.attempts.values().sum()
    }

    fn next_answer(&mut self, request: &UnlockRequest<'_>) -> anyhow::Result<Option<String>> {
        let text = match self.guesser.guess(request)? {
            Guess::Abandon => return Ok(None),
            Guess::Text(text) => text,
            Guess::Choice(index) => match request.choices.and_then(|c| c.get(index)) {
                Some(choice) => choice.clone(),
                None => anyhow::bail!("choice {} out of range for {}", index, request.case_id),
            },
        };
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }
}

impl<G: Guesser> Interact for TerminalPrompt<G> {
    fn interact(
        &mut self,
        request: &UnlockRequest<'_>,
        out: &mut Output,
    ) -> anyhow::Result<Option<Vec<String>>> {
        let mut revealed = Vec::with_capacity(request.locked_answers.len());

        for locked in request.locked_answers {
            loop {
                let Some(guess) = self.next_answer(request)? else {
                    return Ok(None);
                };
                let attempts = self.attempts.entry(request.unique_id.to_string()).or_default();
                *attempts += 1;
                debug!(case_id = request.case_id, attempts = *attempts, "unlock attempt");

                if self.key.verify(&guess, locked) {
                    out.line("-- OK! --");
                    out.blank();
                    revealed.push(guess);
                    break;
                }
                out.line("-- Not quite. Try again! --");
                out.blank();
            }
        }
        Ok(Some(revealed))
    }
}
