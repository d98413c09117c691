/**
 * The ledger table on disk. Every read and write of the backing file goes
 * through `RecordStore`.
 *
 * Records are addressed by position (zero-based row index in file order).
 * There is no id column: positions shift down after a delete. That is only
 * sound because a single process touches the file, one operation at a time.
 *
 * Note: update and delete rewrite the whole table (read all, change in
 * memory, truncate and write all back). An interrupted rewrite can leave a
 * partially written file. Nothing here recovers from that.
 */
use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write},
};

use chrono::NaiveDate;
use log::{debug, info};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::{FieldValue, Record, Row, COLUMNS};

#[derive(Debug, Clone)]
pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Creates the file with just the header row if it is missing (or empty).
    /// An existing table is left alone.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let path = &self.config.path;
        let needs_header = match std::fs::metadata(path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };
        if needs_header {
            info!("Creating ledger file {}", path.display());
            self.write_all(&[])?;
        }
        Ok(())
    }

    pub fn append(&self, record: &Record) -> Result<(), StoreError> {
        let mut file = match OpenOptions::new().read(true).append(true).open(&self.config.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.config.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };

        // A hand-edited file may lack the final newline.
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer.serialize(Row::from_record(record, &self.config.date_format))?;
        writer.flush()?;
        debug!("Appended {:?}", record);
        Ok(())
    }

    pub fn load_all(&self) -> Result<Vec<Record>, StoreError> {
        let file = match File::open(&self.config.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.config.path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers()?;
        if headers.iter().ne(COLUMNS.iter().copied()) {
            return Err(StoreError::Header {
                found: headers.iter().map(String::from).collect(),
                expected: COLUMNS.iter().map(|c| c.to_string()).collect(),
            });
        }

        let mut records = Vec::new();
        for (row, result) in reader.into_deserialize::<Row>().enumerate() {
            let raw = result.map_err(|e| schema_error(row, e))?;
            records.push(raw.into_record(row, &self.config.date_format)?);
        }
        debug!("Loaded {} records from {}", records.len(), self.config.path.display());
        Ok(records)
    }

    /// Records dated within `[start, end]`, sorted by date. The sort is
    /// stable, so records sharing a date keep their file order.
    pub fn query_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Record>, StoreError> {
        let mut records: Vec<Record> = self
            .load_all()?
            .into_iter()
            .filter(|r| start <= r.date && r.date <= end)
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    /// Overwrites one field of the record at `position`. The value is trusted:
    /// run it through the validator first.
    pub fn update_field(&self, position: usize, value: FieldValue) -> Result<(), StoreError> {
        let mut records = self.load_all()?;
        let len = records.len();
        let record = records
            .get_mut(position)
            .ok_or(StoreError::OutOfRange { position, len })?;
        debug!("Updating {} of record {}", value.field().name(), position);
        record.set(value);
        self.write_all(&records)
    }

    pub fn delete(&self, position: usize) -> Result<Record, StoreError> {
        let mut records = self.load_all()?;
        if position >= records.len() {
            return Err(StoreError::OutOfRange {
                position,
                len: records.len(),
            });
        }
        let removed = records.remove(position);
        debug!("Deleting record {}: {:?}", position, removed);
        self.write_all(&records)?;
        Ok(removed)
    }

    fn write_all(&self, records: &[Record]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.config.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(file));
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.serialize(Row::from_record(record, &self.config.date_format))?;
        }
        writer.flush()?;
        debug!("Wrote {} records to {}", records.len(), self.config.path.display());
        Ok(())
    }
}

fn schema_error(row: usize, error: csv::Error) -> StoreError {
    match error.kind() {
        csv::ErrorKind::UnequalLengths { expected_len, len, .. } => StoreError::Schema {
            row,
            detail: format!("expected {} fields, found {}", expected_len, len),
        },
        _ => StoreError::Csv(error),
    }
}
