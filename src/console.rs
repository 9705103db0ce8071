//! Progress output sink.

use std::io::{self, Stdout, Write};

use crate::{
    error::Result,
    palette::{Tone, paint},
};

/// Writes toned lines to an output stream.
#[derive(Debug)]
pub struct Console<W: Write> {
    /// Destination stream.
    out: W,
    /// Whether tones are rendered as ANSI escapes.
    use_color: bool,
}

impl Console<Stdout> {
    /// A console on standard output.
    pub fn stdout(use_color: bool) -> Self {
        Self::new(io::stdout(), use_color)
    }
}

impl<W: Write> Console<W> {
    /// Wrap a stream.
    pub fn new(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Write a single toned line.
    pub fn line(&mut self, tone: Tone, text: &str) -> Result<()> {
        writeln!(self.out, "{}", paint(text, tone, self.use_color))?;
        Ok(())
    }

    /// Write a line assembled from toned segments.
    pub fn segments(&mut self, parts: &[(Tone, &str)]) -> Result<()> {
        let mut line = String::new();
        for (tone, text) in parts {
            line.push_str(&paint(text, *tone, self.use_color));
        }
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    /// Flush buffered output, e.g. before prompting.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Consume the console and return the stream.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}
