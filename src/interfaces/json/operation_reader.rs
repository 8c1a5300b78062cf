use crate::domain::operation::Operation;
use crate::error::{Result, ShippingError};
use std::io::{BufRead, BufReader, Read};

/// Reads scripted operations, one JSON object per line.
///
/// Blank lines are skipped. A bad line yields an error for that line only;
/// reading continues with the next one.
pub struct OperationReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> OperationReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes operations.
    pub fn operations(self) -> impl Iterator<Item = Result<Operation>> {
        self.reader
            .lines()
            .enumerate()
            .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .map(|(index, line)| {
                let line = line?;
                serde_json::from_str(&line).map_err(|source| ShippingError::InvalidOperation {
                    line: index + 1,
                    source,
                })
            })
    }
}
