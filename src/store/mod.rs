pub mod csv;

use std::path::Path;

use crate::app::Result;
use crate::domain::Record;

pub use self::csv::CsvRepository;

pub trait Repository {
    /// Write records with the source header row, replacing any existing file.
    fn save(&self, records: &[Record], path: &Path) -> Result<()>;

    /// Read records back, skipping the header row.
    fn load(&self, path: &Path) -> Result<Vec<Record>>;

    /// Rewrite a source file in the Goodreads import layout. Returns the row count.
    fn convert_to_target_schema(&self, input: &Path, output: &Path) -> Result<usize>;
}
