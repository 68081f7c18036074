use anyhow::{Context, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::ui::theme;

/// Line-oriented prompting over any reader/writer pair.
///
/// Every prompt returns `Ok(None)` once input is exhausted so callers can
/// wind down instead of spinning on an empty stream.
pub(crate) struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and read one trimmed line.
    pub(crate) fn line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush().context("Failed to flush output")?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Re-prompt until a non-empty line is entered.
    pub(crate) fn text(&mut self, label: &str) -> Result<Option<String>> {
        loop {
            match self.line(label)? {
                None => return Ok(None),
                Some(s) if s.is_empty() => self.complain("This field cannot be empty.")?,
                Some(s) => return Ok(Some(s)),
            }
        }
    }

    /// Re-prompt until `parse` accepts the line. Blank input picks `default` when one is given.
    pub(crate) fn parsed_with<T, F>(
        &mut self,
        label: &str,
        default: Option<T>,
        parse: F,
    ) -> Result<Option<T>>
    where
        T: Clone,
        F: Fn(&str) -> std::result::Result<T, String>,
    {
        loop {
            let Some(raw) = self.line(label)? else {
                return Ok(None);
            };
            if raw.is_empty() {
                match &default {
                    Some(d) => return Ok(Some(d.clone())),
                    None => {
                        self.complain("This field cannot be empty.")?;
                        continue;
                    }
                }
            }
            match parse(&raw) {
                Ok(v) => return Ok(Some(v)),
                Err(msg) => self.complain(&msg)?,
            }
        }
    }

    /// Typed prompt: parse with `FromStr`, then apply `check`.
    pub(crate) fn parsed<T, C>(
        &mut self,
        label: &str,
        default: Option<T>,
        check: C,
    ) -> Result<Option<T>>
    where
        T: FromStr + Clone,
        C: Fn(&T) -> std::result::Result<(), String>,
    {
        self.parsed_with(label, default, |raw| {
            let value = raw
                .parse::<T>()
                .map_err(|_| format!("'{raw}' is not a valid number."))?;
            check(&value)?;
            Ok(value)
        })
    }

    pub(crate) fn complain(&mut self, msg: &str) -> Result<()> {
        writeln!(self.output, "{}", theme::error(msg))?;
        Ok(())
    }

    pub(crate) fn say(&mut self, msg: impl Display) -> Result<()> {
        writeln!(self.output, "{msg}")?;
        Ok(())
    }
}
