pub mod binary;
pub mod text;

pub use text::{SubmissionWriter, TableReader, TableRow, COMMA_DELIMITER, SPACE_DELIMITER};

use crate::config::RatingFormat;
use crate::error::Result;
use crate::models::Rating;
use crate::store::RatingStore;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// `.csv` tables are comma separated, everything else single-space separated.
pub fn table_delimiter(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => COMMA_DELIMITER,
        _ => SPACE_DELIMITER,
    }
}

pub fn open_table<T: TableRow>(path: &Path) -> Result<TableReader<BufReader<File>, T>> {
    let file = File::open(path)?;
    Ok(TableReader::new(BufReader::new(file), table_delimiter(path)))
}

pub fn load_ratings(path: &Path, format: RatingFormat, capacity: usize) -> Result<RatingStore> {
    info!("Loading {:?} ratings from {}", format, path.display());
    let store = match format {
        RatingFormat::Text => RatingStore::load(capacity, open_table::<Rating>(path)?)?,
        RatingFormat::Binary => binary::read_ratings(BufReader::new(File::open(path)?), capacity)?,
    };
    info!("Loaded {} ratings (capacity {})", store.count(), store.capacity());
    Ok(store)
}

pub fn dump_ratings(store: &RatingStore, path: &Path) -> Result<()> {
    info!("Dumping {} ratings to {}", store.count(), path.display());
    let file = File::create(path)?;
    binary::write_ratings(store, std::io::BufWriter::new(file))
}
