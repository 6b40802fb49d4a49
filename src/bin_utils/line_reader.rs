use std::io::BufRead;

use anyhow::{Context, Result};

/// Reads operator input one line at a time, without the line terminator.
pub struct LineReader<R> {
    source: R,
    line: u64,
}

impl<R> LineReader<R>
where
    R: BufRead,
{
    pub fn new(source: R) -> Self {
        Self { source, line: 0 }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// `None` once the input is exhausted.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self
            .source
            .read_line(&mut buf)
            .with_context(|| format!("Failed to read input line {}", self.line + 1))?;
        if read == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}
