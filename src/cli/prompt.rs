//! Reading answers from the person at the desk
//!
//! The dashboards ask questions through the `Prompt` trait so the same flow
//! runs against a real terminal (`TerminalPrompt`, backed by dialoguer) or
//! against piped/scripted input (`ScriptedPrompt`, one line per answer).

use crate::types::LibraryError;
use dialoguer::{Input, Password};
use std::io::{BufRead, ErrorKind};

pub trait Prompt {
    /// Ask for a line of text
    ///
    /// The answer is returned as typed; callers trim where needed.
    fn input(&mut self, label: &str) -> Result<String, LibraryError>;

    /// Ask for a secret; terminals do not echo it
    fn password(&mut self, label: &str) -> Result<String, LibraryError>;
}

/// Interactive prompt on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&mut self, label: &str) -> Result<String, LibraryError> {
        let answer: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn password(&mut self, label: &str) -> Result<String, LibraryError> {
        let answer = Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()?;
        Ok(answer)
    }
}

/// Prompt that answers each question with the next line of a reader
///
/// Running out of lines is an error: the session cannot continue without
/// an answer.
pub struct ScriptedPrompt<R> {
    reader: R,
}

impl<R: BufRead> ScriptedPrompt<R> {
    pub fn new(reader: R) -> Self {
        ScriptedPrompt { reader }
    }

    fn next_line(&mut self, label: &str) -> Result<String, LibraryError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("input ended while waiting for '{}'", label),
            )
            .into());
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

impl<R: BufRead> Prompt for ScriptedPrompt<R> {
    fn input(&mut self, label: &str) -> Result<String, LibraryError> {
        self.next_line(label)
    }

    fn password(&mut self, label: &str) -> Result<String, LibraryError> {
        self.next_line(label)
    }
}

/// Create the prompt for this process
///
/// A terminal gets dialoguer prompts; anything else (pipes, files) is read
/// line by line from stdin.
pub fn create_prompt(interactive: bool) -> Box<dyn Prompt> {
    if interactive {
        Box::new(TerminalPrompt)
    } else {
        Box::new(ScriptedPrompt::new(std::io::stdin().lock()))
    }
}
