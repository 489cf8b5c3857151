use std::io::{self, BufRead, Write};

use crate::error::CatalogError;

/// Line-oriented prompting over any reader/writer pair.
pub(crate) struct Prompter<R, W> {
    input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one line without its line terminator.
    /// `None` means the input is exhausted.
    pub(crate) fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Parse a publication year typed at the prompt. Surrounding whitespace is
/// ignored; anything else that is not an integer is rejected.
pub(crate) fn parse_year(raw: &str) -> Result<i64, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidYear(raw.to_string()))
}
