//! Line-oriented numeric input.
//!
//! One value per line. Blank lines and lines starting with `#` are skipped.
//! The first bad line ends the stream; the error is parked in an
//! [`InputFailure`] slot so the windowing engine sees a clean end of input and
//! the caller can report it afterwards.

use std::cell::RefCell;
use std::io::{self, BufRead};
use std::num::ParseFloatError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("line {line}: failed to read input: {source}")]
    Read { line: usize, source: io::Error },
    #[error("line {line}: {text:?} is not a number: {source}")]
    Parse {
        line: usize,
        text: String,
        source: ParseFloatError,
    },
    #[error("line {line}: {value} cannot be windowed (values must be finite)")]
    NotFinite { line: usize, value: f64 },
}

impl InputError {
    pub fn line(&self) -> usize {
        match self {
            InputError::Read { line, .. }
            | InputError::Parse { line, .. }
            | InputError::NotFinite { line, .. } => *line,
        }
    }
}

/// Slot for the first input error, shared with the consumer of [`Values`].
#[derive(Debug, Default)]
pub struct InputFailure(RefCell<Option<InputError>>);

impl InputFailure {
    pub fn is_set(&self) -> bool {
        self.0.borrow().is_some()
    }

    pub fn take(&self) -> Option<InputError> {
        self.0.borrow_mut().take()
    }

    fn set(&self, err: InputError) {
        *self.0.borrow_mut() = Some(err);
    }
}

pub fn values<R: BufRead>(reader: R, failure: &InputFailure) -> Values<'_, R> {
    Values {
        lines: reader.lines(),
        line: 0,
        failure,
        stopped: false,
    }
}

#[derive(Debug)]
pub struct Values<'a, R> {
    lines: io::Lines<R>,
    line: usize,
    failure: &'a InputFailure,
    stopped: bool,
}

impl<R: BufRead> Values<'_, R> {
    fn stop(&mut self, err: InputError) -> Option<f64> {
        tracing::debug!(line = err.line(), "Input stopped");
        self.stopped = true;
        self.failure.set(err);
        None
    }
}

impl<R: BufRead> Iterator for Values<'_, R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.stopped {
            return None;
        }
        loop {
            self.line += 1;
            let line = self.line;
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(source) => return self.stop(InputError::Read { line, source }),
            };
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return match trimmed.parse::<f64>() {
                Ok(value) if !value.is_finite() => {
                    self.stop(InputError::NotFinite { line, value })
                }
                Ok(value) => Some(value),
                Err(source) => self.stop(InputError::Parse {
                    line,
                    text: trimmed.to_string(),
                    source,
                }),
            };
        }
    }
}
