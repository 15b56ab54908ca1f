use std::{
    fmt,
    io::{self, BufRead, Write},
};

use thiserror::Error;
use tracing::{error, warn};

/// Attempts granted to each prompt unless overridden on the command line.
pub(crate) const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Failures raised while acquiring operator input.
#[derive(Debug, Error)]
pub(crate) enum PromptError {
    /// The input stream ended before a value was supplied.
    #[error("input closed before a value was provided")]
    Closed,
    /// Every permitted attempt produced an invalid value.
    #[error("Failed after {attempts} attempts: {reason}")]
    Exhausted {
        /// Number of attempts that were made.
        attempts: u32,
        /// Validation message of the final attempt.
        reason: String,
    },
    /// A single attempt produced an invalid value and may be retried.
    #[error("{0}")]
    Invalid(String),
    /// Reading from or writing to the terminal failed.
    #[error("could not access the terminal")]
    Io(#[from] io::Error),
}

/// Runs `operation` until it succeeds, allowing at most `max_attempts` tries.
///
/// Only [`PromptError::Invalid`] outcomes are retried; any other error is
/// returned immediately. The operation receives the one-based attempt number.
pub(crate) fn retry<T, F>(max_attempts: u32, mut operation: F) -> Result<T, PromptError>
where
    F: FnMut(u32) -> Result<T, PromptError>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation(attempt) {
            Err(PromptError::Invalid(reason)) => {
                warn!("Transient error: {reason}. Attempt {attempt}/{max_attempts}");
                if attempt >= max_attempts {
                    error!("Failed after {max_attempts} attempts: {reason}");
                    return Err(PromptError::Exhausted {
                        attempts: max_attempts,
                        reason,
                    });
                }
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}

/// Line-oriented conversation with the operator.
#[derive(Debug)]
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
    max_attempts: u32,
}

impl<R, W> Prompter<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W, max_attempts: u32) -> Self {
        Self {
            input,
            output,
            max_attempts,
        }
    }

    /// Writes a single line of text to the operator.
    pub(crate) fn say(&mut self, line: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Asks `question` until `parse` accepts the trimmed answer.
    ///
    /// Rejected answers are echoed back to the operator before re-asking.
    pub(crate) fn ask<T, F>(&mut self, question: &str, mut parse: F) -> Result<T, PromptError>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        retry(self.max_attempts, |_| {
            let line = self.read_line(question)?;
            match parse(line.trim()) {
                Ok(value) => Ok(value),
                Err(reason) => {
                    writeln!(self.output, "{reason}")?;
                    Err(PromptError::Invalid(reason))
                }
            }
        })
    }

    fn read_line(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_even(value: &str) -> Result<u32, String> {
        match value.parse::<u32>() {
            Ok(number) if number % 2 == 0 => Ok(number),
            _ => Err(format!("'{value}' is not an even number")),
        }
    }

    #[test]
    fn retry_returns_first_success() {
        let mut calls = Vec::new();
        let value = retry(3, |attempt| {
            calls.push(attempt);
            if attempt < 2 {
                Err(PromptError::Invalid("not yet".to_owned()))
            } else {
                Ok(attempt * 10)
            }
        })
        .expect("second attempt succeeds");

        assert_eq!(value, 20);
        assert_eq!(calls, vec![1, 2]);
    }

    #[test]
    fn retry_gives_up_after_budget() {
        let mut calls = 0;
        let error = retry(3, |_| -> Result<(), PromptError> {
            calls += 1;
            Err(PromptError::Invalid(format!("bad value {calls}")))
        })
        .expect_err("budget is exhausted");

        assert_eq!(calls, 3);
        assert_eq!(error.to_string(), "Failed after 3 attempts: bad value 3");
    }

    #[test]
    fn retry_does_not_repeat_fatal_errors() {
        let mut calls = 0;
        let error = retry(5, |_| -> Result<(), PromptError> {
            calls += 1;
            Err(PromptError::Closed)
        })
        .expect_err("closed input is fatal");

        assert_eq!(calls, 1);
        assert!(matches!(error, PromptError::Closed));
    }

    #[test]
    fn ask_reprompts_and_echoes_reason() {
        let mut output = Vec::new();
        let value = {
            let mut prompter = Prompter::new("7\n 4 \n".as_bytes(), &mut output, 3);
            prompter.ask("Even? ", parse_even).expect("second answer is valid")
        };

        assert_eq!(value, 4);
        assert_eq!(
            String::from_utf8(output).expect("utf8 output"),
            "Even? '7' is not an even number\nEven? "
        );
    }

    #[test]
    fn ask_reports_closed_input() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new("".as_bytes(), &mut output, 3);
        let error = prompter.ask("Even? ", parse_even).expect_err("no input");
        assert!(matches!(error, PromptError::Closed));
    }

    #[test]
    fn ask_exhausts_after_max_attempts() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new("1\n3\n5\n8\n".as_bytes(), &mut output, 3);
        let error = prompter.ask("Even? ", parse_even).expect_err("three odd answers");
        assert!(matches!(error, PromptError::Exhausted { attempts: 3, .. }));
    }
}
