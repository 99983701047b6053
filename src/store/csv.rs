use std::fs;
use std::path::Path;

use ::csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use crate::app::Result;
use crate::domain::{GoodreadsRow, Record, HEADERS};
use crate::store::Repository;

/// Comma-separated, UTF-8 file repository.
#[derive(Debug, Clone, Default)]
pub struct CsvRepository;

impl CsvRepository {
    pub fn new() -> Self {
        Self
    }

    fn ensure_parent(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl Repository for CsvRepository {
    fn save(&self, records: &[Record], path: &Path) -> Result<()> {
        Self::ensure_parent(path)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        // Written by hand so an empty list still produces a header row.
        writer.write_record(HEADERS)?;
        for record in records {
            writer.write_record(record.to_sequence())?;
        }
        writer.flush()?;

        debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Vec<Record>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let mut records = Vec::new();
        for (line, result) in reader.records().enumerate() {
            match result {
                Ok(row) => records.push(Record::from_sequence(row.iter())),
                Err(e) => {
                    warn!("Skipping malformed row {} in {}: {}", line + 2, path.display(), e);
                }
            }
        }

        debug!("Read {} records from {}", records.len(), path.display());
        Ok(records)
    }

    fn convert_to_target_schema(&self, input: &Path, output: &Path) -> Result<usize> {
        let records = self.load(input)?;
        Self::ensure_parent(output)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_path(output)?;
        writer.write_record(crate::domain::TARGET_HEADERS)?;
        for record in &records {
            writer.serialize(GoodreadsRow::from(record))?;
        }
        writer.flush()?;

        Ok(records.len())
    }
}
