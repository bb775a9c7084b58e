//! Output persistence for origin/destination rows and classifications.
//!
//! Rows are written as TSV (easy to paste elsewhere) and CSV (for
//! spreadsheets); classifications as a pretty JSON document and a CSV table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, Trim, WriterBuilder};
use tracing::{debug, info};

use crate::classify::{ClassificationReport, ClassifiedLine};
use crate::error::{OdError, Result};
use crate::od::OriginDestinationRow;

fn create(path: &Path) -> Result<BufWriter<File>> {
    debug!(path = %path.display(), "Creating output file");
    let file = File::create(path).map_err(|e| OdError::io(path, e))?;
    Ok(BufWriter::new(file))
}

/// TSV fields are written unquoted, so tabs and line breaks become spaces.
fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\r', '\n'], " ").trim().to_string()
}

pub fn write_rows_tsv<W: Write>(writer: W, rows: &[OriginDestinationRow]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Never)
        .from_writer(writer);
    writer.write_record(OriginDestinationRow::HEADER)?;
    for row in rows {
        writer.write_record(row.fields().iter().map(|f| tsv_field(f)))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_rows_csv<W: Write>(writer: W, rows: &[OriginDestinationRow]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_rows_tsv(path: &Path, rows: &[OriginDestinationRow]) -> Result<()> {
    write_rows_tsv(create(path)?, rows).map_err(|e| OdError::csv(path, e))?;
    info!(path = %path.display(), rows = rows.len(), "Wrote TSV");
    Ok(())
}

pub fn save_rows_csv(path: &Path, rows: &[OriginDestinationRow]) -> Result<()> {
    write_rows_csv(create(path)?, rows).map_err(|e| OdError::csv(path, e))?;
    info!(path = %path.display(), rows = rows.len(), "Wrote CSV");
    Ok(())
}

/// Parses rows written by [`write_rows_tsv`].
pub fn read_rows_tsv(path: &Path) -> Result<Vec<OriginDestinationRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| OdError::csv(path, e))?;
    reader
        .deserialize()
        .collect::<csv::Result<Vec<_>>>()
        .map_err(|e| OdError::csv(path, e))
}

pub fn save_report_json(path: &Path, report: &ClassificationReport) -> Result<()> {
    let mut writer = create(path)?;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush().map_err(|e| OdError::io(path, e))?;
    info!(path = %path.display(), "Wrote classification JSON");
    Ok(())
}

pub fn save_classified_csv(path: &Path, lines: &[ClassifiedLine]) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(create(path)?);
    for line in lines {
        writer.serialize(line).map_err(|e| OdError::csv(path, e))?;
    }
    writer.flush().map_err(|e| OdError::io(path, e))?;
    info!(path = %path.display(), lines = lines.len(), "Wrote classification CSV");
    Ok(())
}
