use std::io::BufRead;
use tracing::debug;

use crate::error::{Error, Result};
use crate::literal::{self, closed_at};
use crate::stats::StatsTable;

/// Printed on stdout before reading
pub const PROMPT: &str = "Stats dict:";

/// Banner line the solver's reporter prints right before the mapping.
pub const REPORT_BANNER: &str = "--Stats--";

/// When to stop reading the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Read everything up to end of input.
    ToEnd,
    /// Stop after the line that closes the top-level `{ ... }` literal.
    UntilClosed,
}

/// Read one statistics document from `reader`.
///
/// Fails with [`Error::PrematureEnd`] when the stream ends before the
/// top-level literal closed in [`ReadMode::UntilClosed`].
pub fn read_document<R: BufRead>(mut reader: R, mode: ReadMode) -> Result<String> {
    let mut text = String::new();

    match mode {
        ReadMode::ToEnd => {
            reader.read_to_string(&mut text)?;
        }
        ReadMode::UntilClosed => loop {
            let n = reader.read_line(&mut text)?;
            if n == 0 {
                debug!(bytes = text.len(), "input ended before literal closed");
                return Err(Error::PrematureEnd);
            }
            if closed_at(strip_report_preamble(&text)).is_some() {
                break;
            }
        },
    }

    debug!(bytes = text.len(), ?mode, "read statistics document");
    Ok(text)
}

/// Drop everything up to and including the reporter banner line, if it
/// comes before the mapping opens.
pub fn strip_report_preamble(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.contains('{') {
            break;
        }
        offset += line.len();
        if line.trim() == REPORT_BANNER {
            return &text[offset..];
        }
    }
    text
}

/// Parse a document into a validated table.
pub fn parse_document(text: &str) -> Result<StatsTable> {
    let lit = literal::parse(strip_report_preamble(text)).map_err(|err| {
        if err.is_unexpected_end() {
            Error::PrematureEnd
        } else {
            Error::Parse(err)
        }
    })?;
    let table = StatsTable::from_literal(&lit)?;
    debug!(entries = table.len(), "parsed statistics table");
    Ok(table)
}
