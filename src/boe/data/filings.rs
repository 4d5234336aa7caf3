//
// Parse a Board of Elections candidate-filings CSV file. One file per
// election, one row per candidate filing, column headers as exported
// by the Board. Files may be gzipped.
//

use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use defs::FilingRow;
use errors::FilingsError;

pub fn load(filename: &Path) -> Result<Vec<FilingRow>, FilingsError> {
    let fd = File::open(filename).map_err(|e| FilingsError::Open {
        path: filename.to_path_buf(),
        source: e,
    })?;

    let gzipped = filename
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);
    let reader: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(fd))
    } else {
        Box::new(fd)
    };

    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows: Vec<FilingRow> = Vec::new();
    for result in rdr.deserialize() {
        let record: FilingRow = result.map_err(|e| FilingsError::Csv {
            path: filename.to_path_buf(),
            source: e,
        })?;
        rows.push(record);
    }
    Ok(rows)
}
