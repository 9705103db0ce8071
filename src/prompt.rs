//! Yes/no prompts for repair approval.
//!
//! Every question defaults to yes. `y`, `yes` and an empty answer accept,
//! case-insensitively; anything else declines. Each question is asked once.

use std::io::{self, BufRead, Write};

use inquire::{Confirm, error::InquireError, ui::RenderConfig};

use crate::error::{Error, Result};

/// Asks the operator to approve an action.
pub trait Prompter {
    /// Ask `question` and return whether the operator accepted.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Whether a typed answer counts as yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "" | "y" | "yes"
    )
}

/// Interactive prompter for terminals.
#[derive(Debug)]
pub struct TerminalPrompter {
    /// Whether prompts are styled.
    use_color: bool,
}

impl TerminalPrompter {
    /// Create a prompter that styles prompts only when `use_color` is set.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

/// Inquire styling: the colored default, or no styling at all.
fn render_config(use_color: bool) -> RenderConfig<'static> {
    if use_color {
        RenderConfig::default_colored()
    } else {
        RenderConfig::empty()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let parser = |answer: &str| Ok::<bool, ()>(is_affirmative(answer));
        match Confirm::new(question)
            .with_default(true)
            .with_parser(&parser)
            .with_render_config(render_config(self.use_color))
            .prompt()
        {
            Ok(value) => Ok(value),
            Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
                Err(Error::PromptCanceled)
            }
            Err(error) => Err(Error::PromptFailed {
                message: error.to_string(),
            }),
        }
    }
}

/// Line-oriented prompter for piped input.
///
/// Writes `question (Y/n): ` and reads one line. End of input cancels.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    /// Answer source.
    input: R,
    /// Where questions are written.
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Create a prompter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let prompt_error = |error: io::Error| Error::PromptFailed {
            message: error.to_string(),
        };
        write!(self.output, "{question} (Y/n): ").map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut answer = String::new();
        let read = self.input.read_line(&mut answer).map_err(prompt_error)?;
        if read == 0 {
            return Err(Error::PromptCanceled);
        }
        Ok(is_affirmative(&answer))
    }
}
