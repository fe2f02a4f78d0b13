//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure. Every
//! save is a full rewrite into a temp file followed by a rename.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::TrackerError;

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, TrackerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| TrackerError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("json.tmp");

    write_atomic(path, &temp_path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, data)
            .map_err(|e| TrackerError::Storage(format!("Failed to serialize data: {}", e)))?;
        // Trailing newline keeps the file friendly to hand edits
        writeln!(writer)
            .map_err(|e| TrackerError::Storage(format!("Failed to write data: {}", e)))
    })
}

/// Read every record of a headed CSV file, returning an empty list if the
/// file doesn't exist
///
/// Each record comes back with its line number in the file. Records that
/// don't deserialize into `T` are skipped with a warning.
pub fn read_csv_rows<T, P>(path: P) -> Result<Vec<(u64, T)>, TrackerError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| TrackerError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line());
                warn!(?line, "skipping unreadable CSV record: {}", e);
                continue;
            }
        }

        let line = record.position().map_or(0, |p| p.line());
        match record.deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push((line, row)),
            Err(e) => warn!(line, "skipping unreadable CSV record: {}", e),
        }
    }

    Ok(rows)
}

/// Write a headed CSV file atomically
///
/// The header is always written, even when there are no rows.
pub fn write_csv_atomic<T, P>(path: P, headers: &[&str], rows: &[T]) -> Result<(), TrackerError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("csv.tmp");

    write_atomic(path, &temp_path, |writer| {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut *writer);

        csv_writer.write_record(headers)?;
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer
            .flush()
            .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))
    })
}

/// Shared temp-file-then-rename routine
fn write_atomic<F>(path: &Path, temp_path: &Path, write: F) -> Result<(), TrackerError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), TrackerError>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TrackerError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let file = File::create(temp_path)
        .map_err(|e| TrackerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    if let Err(e) = write(&mut writer) {
        let _ = fs::remove_file(temp_path);
        return Err(e);
    }

    writer
        .flush()
        .map_err(|e| TrackerError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TrackerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        TrackerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
