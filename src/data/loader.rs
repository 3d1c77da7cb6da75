use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, warn};

use super::model::{Dataset, Record, Stat};

/// Header names accepted for the category (primary type) column.
const CATEGORY_ALIASES: &[&str] = &["Type1", "Type_1"];
const NAME_ALIASES: &[&str] = &["Name"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. Every variant is fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("input has no header row")]
    MissingHeader,
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset from a file. The delimiter is picked from the extension:
///
/// * `.csv`, `.txt` – comma separated
/// * `.tsv`, `.tab` – tab separated
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" | "txt" => b',',
        "tsv" | "tab" => b'\t',
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(file, delimiter)
}

/// Parse delimited text with a header row into a [`Dataset`].
///
/// Numeric cells that are empty or do not parse become `NaN`; they never
/// abort the load. Rows may be shorter than the header.
pub fn load_reader<R: Read>(reader: R, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }
    let columns = ColumnIndex::resolve(&headers);

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;
        records.push(columns.record(row_no, &row));
    }

    let malformed = records
        .iter()
        .filter(|r| r.stats.iter().any(|v| v.is_nan()))
        .count();
    if malformed > 0 {
        debug!("{malformed} row(s) carry non-numeric stat cells");
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Column lookup and cell coercion
// ---------------------------------------------------------------------------

/// Header positions of the columns the views consume.
struct ColumnIndex {
    name: Option<usize>,
    category: Option<usize>,
    stats: [Option<usize>; 6],
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim() == *a))
        };

        let category = find(CATEGORY_ALIASES);
        if category.is_none() {
            warn!("no category column (tried {CATEGORY_ALIASES:?}); records have no type");
        }

        let mut stats = [None; 6];
        for stat in Stat::ALL {
            stats[stat.index()] = find(stat.header_aliases());
            if stats[stat.index()].is_none() {
                warn!(
                    "no '{stat}' column (tried {:?}); all values are NaN",
                    stat.header_aliases()
                );
            }
        }

        ColumnIndex {
            name: find(NAME_ALIASES),
            category,
            stats,
        }
    }

    fn record(&self, row_no: usize, row: &StringRecord) -> Record {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i));

        let text = |idx: Option<usize>| {
            cell(idx)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let mut stats = [f64::NAN; 6];
        for (slot, idx) in stats.iter_mut().zip(self.stats.iter()) {
            *slot = cell(*idx).map(coerce_number).unwrap_or(f64::NAN);
        }

        Record {
            id: row_no,
            name: text(self.name),
            category: text(self.category),
            stats,
        }
    }
}

/// Text cell to number. Anything that is not a finite number becomes `NaN`.
pub fn coerce_number(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}
