use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use itertools::Itertools;
use serde::Serialize;

use defs::RaceRecord;
use errors::OutputError;

// column order of the flat race export
pub const ALL_RACES_HEADER: &[&str] = &[
    "date",
    "location",
    "office",
    "office_type",
    "district",
    "nonpartisan",
    "candidates",
    "votefor",
    "contested",
];

/// Turn a keyed table of per-group values into CSV-ready rows: one row
/// per outer key, carried in the `key_name` column, one column per
/// inner key. Rows come out key-sorted.
pub fn prep_for_csv(
    table: &BTreeMap<String, BTreeMap<String, f64>>,
    key_name: &str,
) -> Vec<BTreeMap<String, String>> {
    let mut rows = Vec::new();
    for (key, columns) in table {
        let mut row = BTreeMap::new();
        row.insert(key_name.to_string(), key.clone());
        for (column, value) in columns {
            row.insert(column.clone(), format!("{}", value));
        }
        rows.push(row);
    }
    rows
}

/// The header for a rates report: the key column, then every group
/// column that appears anywhere in the table, sorted and deduplicated.
pub fn report_header(
    table: &BTreeMap<String, BTreeMap<String, f64>>,
    key_name: &str,
) -> Vec<String> {
    let mut header = vec![key_name.to_string()];
    header.extend(
        table
            .values()
            .flat_map(|columns| columns.keys().cloned())
            .sorted()
            .dedup(),
    );
    header
}

/// Write rows under an ordered header. A key missing from a row renders
/// as an empty cell; keys outside the header are not written.
pub fn save_csv(
    path: &Path,
    header: &[String],
    rows: &[BTreeMap<String, String>],
) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| OutputError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    writer.write_record(header).map_err(|e| OutputError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    for row in rows {
        let record: Vec<&str> = header
            .iter()
            .map(|column| row.get(column).map(|v| v.as_str()).unwrap_or(""))
            .collect();
        writer.write_record(&record).map_err(|e| OutputError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    writer.flush().map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("saved {}", path.display());
    Ok(())
}

/// Serialize to pretty-printed JSON. The data model is BTreeMap-backed,
/// so documents come out key-sorted.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), OutputError> {
    let fd = File::create(path).map_err(|e| OutputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::to_writer_pretty(fd, data).map_err(|e| OutputError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!("saved {}", path.display());
    Ok(())
}

/// Write the flat race list. The candidates column carries the count of
/// valid filings; the full buckets only appear in the JSON export.
pub fn save_all_races(path: &Path, records: &[RaceRecord]) -> Result<(), OutputError> {
    let header: Vec<String> = ALL_RACES_HEADER.iter().map(|h| h.to_string()).collect();
    let rows: Vec<BTreeMap<String, String>> = records
        .iter()
        .map(|record| {
            let mut row = BTreeMap::new();
            row.insert("date".to_string(), record.date.clone());
            row.insert("location".to_string(), record.location.clone());
            row.insert("office".to_string(), record.office.clone());
            row.insert(
                "office_type".to_string(),
                record
                    .office_type
                    .map(|t| t.label().to_string())
                    .unwrap_or_else(String::new),
            );
            row.insert("district".to_string(), record.district.clone());
            row.insert("nonpartisan".to_string(), record.nonpartisan.to_string());
            row.insert(
                "candidates".to_string(),
                record.candidates.valid.len().to_string(),
            );
            row.insert("votefor".to_string(), record.vote_for.to_string());
            row.insert("contested".to_string(), record.contested.to_string());
            row
        })
        .collect();
    save_csv(path, &header, &rows)
}
