//! Terminal rendering of syntax errors.

use std::fs;
use std::io::{self, Write};

use owo_colors::OwoColorize;

use crate::error::ErrorHandler;
use crate::position::Position;

const DEFAULT_CONTEXT_LINES: usize = 3;

/// An [`ErrorHandler`] that prints errors for a human at a terminal.
///
/// Writes the position and message, then re-reads the named file and shows
/// the surrounding lines with the offending columns underlined:
///
/// ```text
/// .env:2:5-10: unterminated string literal
///
/// 1 | A=1
/// 2 | KEY='oops
///         ─────
/// ```
///
/// Failing to read the file is reported in the output and goes no further.
pub struct PrettyConsoleHandler<W> {
    out: W,
    colored: bool,
    context_lines: usize,
}

impl<W: Write> PrettyConsoleHandler<W> {
    #[must_use]
    pub const fn new(out: W) -> Self {
        Self {
            out,
            colored: true,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }

    /// Turn the red underline on or off. On by default.
    #[must_use]
    pub const fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Number of lines to show either side of the error line. Defaults to 3.
    #[must_use]
    pub const fn context_lines(mut self, lines: usize) -> Self {
        self.context_lines = lines;
        self
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, position: &Position, message: &str) -> io::Result<()> {
        writeln!(self.out, "{position}: {message}\n")?;

        if !position.is_valid() {
            return Ok(());
        }

        let contents = match fs::read(&position.name) {
            Ok(contents) => contents,
            Err(err) => {
                log::debug!("cannot re-read {} for error context: {err}", position.name);
                return writeln!(self.out, "unable to show src context: {err}");
            }
        };

        let contents = contents.strip_suffix(b"\n").unwrap_or(contents.as_slice());
        let lines: Vec<&[u8]> = contents.split(|&b| b == b'\n').collect();

        let first = position.line.saturating_sub(self.context_lines).max(1);
        let last = (position.line + self.context_lines).min(lines.len());
        let width = last.max(1).to_string().len();

        for (i, &line) in lines.iter().enumerate().take(last).skip(first - 1) {
            let number = i + 1;
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            let margin = format!("{number:>width$} | ");
            writeln!(self.out, "{margin}{}", String::from_utf8_lossy(line))?;

            if number == position.line {
                let indent = " ".repeat(margin.len() + position.start_col - 1);
                let underline = "─".repeat((position.end_col - position.start_col).max(1));
                if self.colored {
                    writeln!(self.out, "{indent}{}", underline.red())?;
                } else {
                    writeln!(self.out, "{indent}{underline}")?;
                }
            }
        }

        Ok(())
    }
}

impl<W: Write> ErrorHandler for PrettyConsoleHandler<W> {
    fn handle(&mut self, position: &Position, message: &str) {
        if let Err(err) = self.render(position, message) {
            log::debug!("failed to write syntax error: {err}");
        }
    }
}
