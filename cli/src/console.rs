//! Line-oriented terminal I/O.
//!
//! [`Console`] pairs any `BufRead` with any `Write`, so sessions run the same
//! against a real terminal and against scripted input in tests.

use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Why a prompt produced no answer.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Input was closed (Ctrl+D, or the end of a piped script).
    #[error("end of input")]
    EndOfInput,

    /// Reading or writing the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Prompting terminal over arbitrary streams.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over the given streams
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` without a newline, then reads one line.
    ///
    /// The line terminator is stripped; other whitespace is kept.
    ///
    /// # Errors
    ///
    /// - [`ConsoleError::EndOfInput`] if input is exhausted
    /// - [`ConsoleError::Io`] if the streams fail
    pub fn prompt(&mut self, text: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::EndOfInput);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Output stream
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the console, returning the output stream
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R, W: Write> Write for Console<R, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}
