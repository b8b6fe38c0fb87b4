// File: ./src/ics/unfold.rs
//! Reassembles folded content lines.
//!
//! A physical line that starts with one space or tab continues the previous
//! logical line. The marker character is dropped and the rest is appended as is.
use std::iter::Peekable;
use std::str::Lines;

pub struct Unfolder<'a> {
    lines: Peekable<Lines<'a>>,
}

/// Lazily yields logical lines from `text`. Accepts `\n` and `\r\n` separators.
pub fn unfold_lines(text: &str) -> Unfolder<'_> {
    Unfolder {
        lines: text.lines().peekable(),
    }
}

fn continuation(line: &str) -> Option<&str> {
    line.strip_prefix(' ').or_else(|| line.strip_prefix('\t'))
}

impl Iterator for Unfolder<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let first = self.lines.next()?;
        // A leading continuation with nothing before it just starts a line.
        let mut logical = continuation(first).unwrap_or(first).to_string();

        while let Some(rest) = self.lines.peek().copied().and_then(continuation) {
            logical.push_str(rest);
            self.lines.next();
        }

        Some(logical)
    }
}
