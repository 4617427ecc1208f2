use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Mutex;

use forge_core::{
    application::{ApplicationError, ports::InputOptions, ports::Prompter},
    error::{ForgeError, ForgeResult},
};
use tracing::debug;

/// Asks on the terminal when there is one, otherwise reads one line of stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn interactive(&self) -> bool {
        cfg!(feature = "interactive") && io::stdin().is_terminal()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, key: &str, question: &str, options: InputOptions) -> ForgeResult<String> {
        if self.interactive() {
            debug!(key, "Prompting interactively");
            return ask_interactive(key, question, options);
        }

        debug!(key, "Reading answer from stdin");
        let stdin = io::stdin();
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{question}");
        read_answer(&mut stdin.lock(), key, options)
    }
}

#[cfg(feature = "interactive")]
fn ask_interactive(key: &str, question: &str, options: InputOptions) -> ForgeResult<String> {
    dialoguer::Input::<String>::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(question)
        .allow_empty(options.allow_empty)
        .interact_text()
        .map_err(|e| input_failed(key, e))
}

#[cfg(not(feature = "interactive"))]
fn ask_interactive(key: &str, _: &str, _: InputOptions) -> ForgeResult<String> {
    Err(input_failed(key, "interactive prompts are disabled"))
}

/// Answers questions from any line source, one line per question.
pub struct LinePrompter<R> {
    reader: Mutex<R>,
}

impl<R: BufRead + Send> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

impl<R: BufRead + Send> Prompter for LinePrompter<R> {
    fn input(&self, key: &str, _question: &str, options: InputOptions) -> ForgeResult<String> {
        let mut reader = self
            .reader
            .lock()
            .map_err(|_| input_failed(key, "reader lock poisoned"))?;
        read_answer(&mut *reader, key, options)
    }
}

fn read_answer(reader: &mut impl BufRead, key: &str, options: InputOptions) -> ForgeResult<String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| input_failed(key, e))?;
    if read == 0 {
        return Err(input_failed(key, "end of input"));
    }

    let answer = line.trim_end_matches(['\r', '\n']).to_string();
    if !options.allow_empty && answer.trim().is_empty() {
        return Err(input_failed(key, "an answer is required"));
    }
    Ok(answer)
}

fn input_failed(key: &str, reason: impl ToString) -> ForgeError {
    ApplicationError::InputFailed {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}
