//! Answer collection

use dockyard_errors::{Error, GitConfigError};
use std::io::{BufRead, Write};

/// Source of answers to the setup questions
pub trait Prompter {
    /// Ask one question and return the raw answer
    ///
    /// # Errors
    ///
    /// Returns an error when no answer can be read (e.g. input closed).
    fn ask(&mut self, label: &str) -> Result<String, Error>;
}

/// Ask until a non-blank answer arrives; the answer is trimmed
///
/// # Errors
///
/// Propagates the prompter's error.
pub fn prompt_required(prompter: &mut dyn Prompter, label: &str) -> Result<String, Error> {
    loop {
        let answer = prompter.ask(label)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}

/// Ask once; a blank answer is `None`
///
/// # Errors
///
/// Propagates the prompter's error.
pub fn prompt_optional(prompter: &mut dyn Prompter, label: &str) -> Result<Option<String>, Error> {
    let answer = prompter.ask(label)?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Plain `label: ` prompts over any reader and writer
///
/// Used when input is not a terminal, so answers can be piped in.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, label: &str) -> Result<String, Error> {
        let failed = |message: String| GitConfigError::PromptFailed {
            prompt: label.to_string(),
            message,
        };

        write!(self.output, "{label}: ").map_err(|e| failed(e.to_string()))?;
        self.output.flush().map_err(|e| failed(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| failed(e.to_string()))?;
        if read == 0 {
            return Err(failed("input closed".to_string()).into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
