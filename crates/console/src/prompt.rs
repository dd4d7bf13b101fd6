use std::{
    collections::VecDeque,
    fmt::Display,
    io::{self, BufRead, Write},
};

use thiserror::Error;

/// Why a prompt could not produce a value.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input reached end of file.
    #[error("input closed")]
    Closed,
    /// The token could not be read as a number.
    #[error("malformed input '{0}'")]
    Malformed(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whitespace-delimited token reader paired with the output transcript.
///
/// Tokens left over on a line are consumed by later prompts, so
/// `1 7 Knife` typed at once answers three prompts in a row.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    /// Write a full line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn ask(&mut self, prompt: &str) -> io::Result<()> {
        write!(self.output, "{prompt}")?;
        self.output.flush()
    }

    fn next_token(&mut self) -> Result<String, PromptError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::Closed);
            }
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
    }

    /// Show `prompt` and read one word.
    pub fn read_word(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.ask(prompt)?;
        self.next_token()
    }

    /// Show `prompt` and read one integer.
    pub fn read_i32(&mut self, prompt: &str) -> Result<i32, PromptError> {
        let token = self.read_word(prompt)?;
        token.parse().map_err(|_| PromptError::Malformed(token))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
