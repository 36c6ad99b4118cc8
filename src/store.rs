use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::entities::{BookingRecord, HEADER};
use crate::error::{store_read_error, store_write_error, Error};

pub const BOOKINGS_FILE: &str = "bookings.csv";

/// Persistent collection of bookings. Records are only ever appended, except for the bulk
/// status update which rewrites every row.
///
/// Implementations assume a single writer. Two processes sharing one store can lose or
/// corrupt records.
pub trait BookingStore: Send + Sync {
    /// Creates an empty store with the fixed header if none exists yet.
    fn ensure_initialized(&self) -> Result<(), Error>;

    fn append(&self, record: &BookingRecord) -> Result<(), Error>;

    /// All records in insertion order.
    fn load_all(&self) -> Result<Vec<BookingRecord>, Error>;

    /// Moves every assigned booking to completed and returns how many changed.
    fn complete_all_assigned(&self) -> Result<usize, Error>;
}

#[derive(Clone, Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(BOOKINGS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn data_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    #[tracing::instrument(skip(self, records))]
    fn rewrite(&self, records: &[BookingRecord]) -> Result<(), Error> {
        let mut file = NamedTempFile::new_in(self.data_dir()).map_err(store_write_error)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file.as_file_mut());

            writer.write_record(HEADER).map_err(store_write_error)?;
            for record in records {
                writer.serialize(record).map_err(store_write_error)?;
            }
            writer.flush().map_err(store_write_error)?;
        }

        file.persist(&self.path).map_err(store_write_error)?;

        Ok(())
    }
}

impl BookingStore for CsvStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn ensure_initialized(&self) -> Result<(), Error> {
        fs::create_dir_all(self.data_dir()).map_err(store_write_error)?;

        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(err) => return Err(store_write_error(err)),
        };

        tracing::info!("creating empty booking store");

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(HEADER).map_err(store_write_error)?;
        writer.flush().map_err(store_write_error)?;

        Ok(())
    }

    #[tracing::instrument(skip(self, record), fields(booking_id = record.booking_id))]
    fn append(&self, record: &BookingRecord) -> Result<(), Error> {
        self.ensure_initialized()?;

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(store_write_error)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        writer.serialize(record).map_err(store_write_error)?;
        writer.flush().map_err(store_write_error)?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    fn load_all(&self) -> Result<Vec<BookingRecord>, Error> {
        let mut reader = csv::Reader::from_path(&self.path)?;

        let headers = reader.headers()?;
        if !headers.iter().eq(HEADER.iter().copied()) {
            return Err(store_read_error(headers.clone()));
        }

        let mut records = vec![];
        for result in reader.deserialize() {
            let record: BookingRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    #[tracing::instrument(skip(self))]
    fn complete_all_assigned(&self) -> Result<usize, Error> {
        let mut records = self.load_all()?;

        let updated = records
            .iter_mut()
            .map(|record| record.complete())
            .filter(|changed| *changed)
            .count();

        if updated == 0 {
            tracing::info!("no assigned bookings to complete");
            return Ok(0);
        }

        self.rewrite(&records)?;

        tracing::info!("completed {} bookings", updated);

        Ok(updated)
    }
}
