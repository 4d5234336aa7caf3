//
// Orchestration: discover the per-election filing files, compile each
// one, and merge the results into the election set. Files compile
// independently (rayon fans the work out); the merge runs serially in
// sorted file order so results are reproducible. A failing file is
// skipped with a diagnostic, never a process abort.
//

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rayon::prelude::*;
use walkdir::WalkDir;

use boe::data::filings;
use defs::{Election, RaceRecord};
use engine;
use errors::FileError;
use rates;

// the merged result across all input files
#[derive(Debug, Default)]
pub struct ElectionSet {
    pub elections: BTreeMap<String, Election>,
    pub records: Vec<RaceRecord>,
    pub files_read: usize,
    pub files_skipped: usize,
}

/// The election date encoded in a filing file's name: the second
/// underscore-delimited segment of the base name, MMDDYYYY, rendered
/// canonically as YYYY-MM-DD.
pub fn election_date_from_name(path: &Path) -> Result<String, FileError> {
    let base = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => "",
    };
    let digits = match base.split('_').nth(1) {
        Some(segment) => segment,
        None => {
            return Err(FileError::NoDateSegment {
                name: base.to_string(),
            })
        }
    };
    let date = NaiveDate::parse_from_str(digits, "%m%d%Y").map_err(|e| FileError::BadDate {
        digits: digits.to_string(),
        source: e,
    })?;
    Ok(date.format("%Y-%m-%d").to_string())
}

// suffix-style glob: "*.csv" matches any name ending in ".csv", a
// pattern without '*' must match exactly. gzipped inputs match on
// their inner name.
fn matches_pattern(name: &str, pattern: &str) -> bool {
    let name = if name.ends_with(".gz") {
        &name[..name.len() - 3]
    } else {
        name
    };
    if pattern.starts_with('*') {
        name.ends_with(&pattern[1..])
    } else {
        name == pattern
    }
}

/// The filing files under `dir` matching `pattern`, sorted. Discovery
/// order from the walk is not guaranteed, so the sort is what makes
/// runs reproducible.
pub fn discover_files(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let matched = match entry.file_name().to_str() {
            Some(name) => matches_pattern(name, pattern),
            None => false,
        };
        if matched {
            files.push(entry.into_path());
        }
    }
    files.sort();
    files
}

// compile one file: date from the name, rows from the source, races
// from the engine, and the election's own rate summary
fn compile_file(path: &Path) -> Result<(Election, Vec<RaceRecord>), FileError> {
    let date = election_date_from_name(path)?;
    let rows = filings::load(path)?;
    let (races, records) = engine::compile(rows, &date)?;
    let unc_rates = rates::uncontested_rates(&races)?;
    Ok((
        Election {
            date,
            races,
            unc_rates,
        },
        records,
    ))
}

/// Compile every file and merge. Compilation fans out across files;
/// the merge is the single collector, applied in input order.
pub fn compile_all(files: &[PathBuf]) -> ElectionSet {
    let compiled: Vec<Result<(Election, Vec<RaceRecord>), FileError>> =
        files.par_iter().map(|path| compile_file(path)).collect();

    let mut set = ElectionSet::default();
    for (path, result) in files.iter().zip(compiled) {
        match result {
            Ok((election, mut records)) => {
                info!(
                    "read {}: {} locations, {} races",
                    path.display(),
                    election.races.len(),
                    records.len()
                );
                if set.elections.contains_key(&election.date) {
                    warn!(
                        "duplicate election date {} from {}; replacing the previous election",
                        election.date,
                        path.display()
                    );
                }
                set.elections.insert(election.date.clone(), election);
                set.records.append(&mut records);
                set.files_read += 1;
            }
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                set.files_skipped += 1;
            }
        }
    }
    set
}
