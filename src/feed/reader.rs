//! CSV table access for GTFS text files.
//!
//! Tables have a header row, arbitrary column order and may start with a
//! UTF-8 byte-order mark. Fields are trimmed and short rows are accepted.

use std::fs::File;
use std::io::{Chain, Cursor, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{OdError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A named CSV table ready to be deserialized row by row.
pub struct Table<R> {
    name: PathBuf,
    reader: csv::Reader<Chain<Cursor<Vec<u8>>, R>>,
}

impl Table<File> {
    /// Opens the table at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| OdError::io(path, e))?;
        Self::from_reader(path, file)
    }
}

impl<R: Read> Table<R> {
    /// Wraps any reader; `name` is only used in log events and errors.
    pub fn from_reader(name: impl Into<PathBuf>, mut reader: R) -> Result<Self> {
        let name = name.into();

        // A single read may return fewer bytes than the mark, so read until
        // the prefix is complete or the input ends.
        let mut prefix = Vec::with_capacity(UTF8_BOM.len());
        (&mut reader)
            .take(UTF8_BOM.len() as u64)
            .read_to_end(&mut prefix)
            .map_err(|e| OdError::io(&name, e))?;
        if prefix == UTF8_BOM {
            prefix.clear();
        }

        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(Cursor::new(prefix).chain(reader));

        Ok(Self { name, reader })
    }

    /// Streams the rows as `T`.
    ///
    /// Short rows are padded with empty fields. Rows that still fail to
    /// deserialize are logged and skipped. I/O failures are yielded as errors.
    pub fn records<T: DeserializeOwned>(mut self) -> Result<impl Iterator<Item = Result<T>>> {
        let headers = match self.reader.headers() {
            Ok(headers) => headers.clone(),
            Err(e) => return Err(OdError::csv(&self.name, e)),
        };
        let name = self.name;

        Ok(self
            .reader
            .into_records()
            .filter_map(move |result| {
                let mut record = match result {
                    Ok(record) => record,
                    Err(e) if e.is_io_error() => return Some(Err(OdError::csv(&name, e))),
                    Err(e) => {
                        warn!(table = %name.display(), error = %e, "Skipping unreadable row");
                        return None;
                    }
                };
                while record.len() < headers.len() {
                    record.push_field("");
                }
                match record.deserialize(Some(&headers)) {
                    Ok(row) => Some(Ok(row)),
                    Err(e) => {
                        warn!(table = %name.display(), error = %e, "Skipping malformed row");
                        None
                    }
                }
            }))
    }
}
