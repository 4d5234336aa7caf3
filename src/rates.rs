//
// Uncontested-rate aggregation. Two entry points, both pure functions
// over already-compiled data: per-location summaries from a nested race
// table, and per-location/per-group rates from the flat record list
// with a pluggable grouping projection.
//

use std::collections::BTreeMap;

use defs::*;
use errors::RatesError;

/// Per-location uncontested summary for one election's race table:
/// total races, uncontested races, and their ratio. A location with a
/// zero race total is an explicit error, never a fabricated rate.
pub fn uncontested_rates(
    races: &RaceTable,
) -> Result<BTreeMap<String, RateSummary>, RatesError> {
    let mut summaries = BTreeMap::new();

    for (location, offices_of) in races {
        let mut tot = 0u32;
        let mut unc = 0u32;
        for districts in offices_of.values() {
            tot += districts.len() as u32;
            unc += districts
                .values()
                .filter(|race| race.contested == Some(false))
                .count() as u32;
        }
        if tot == 0 {
            return Err(RatesError::ZeroDenominator {
                location: location.clone(),
                group: None,
            });
        }
        summaries.insert(
            location.clone(),
            RateSummary {
                tot_races: tot,
                unc_races: unc,
                unc_rate: unc as f64 / tot as f64,
            },
        );
    }

    Ok(summaries)
}

/// Uncontested rates partitioned by location, then by an arbitrary
/// projection of each record (date, year, election kind, ...). The
/// projection may drop a record by returning None.
pub fn rates_by_group<F>(
    records: &[RaceRecord],
    group_key: F,
) -> Result<BTreeMap<String, BTreeMap<String, f64>>, RatesError>
where
    F: Fn(&RaceRecord) -> Result<Option<String>, RatesError>,
{
    let mut buckets: BTreeMap<String, BTreeMap<String, (u32, u32)>> = BTreeMap::new();

    for record in records {
        let key = match group_key(record)? {
            Some(key) => key,
            None => continue,
        };
        let bucket = buckets
            .entry(record.location.clone())
            .or_insert(BTreeMap::new())
            .entry(key)
            .or_insert((0, 0));
        bucket.0 += 1;
        if !record.contested {
            bucket.1 += 1;
        }
    }

    let mut rates = BTreeMap::new();
    for (location, groups) in buckets {
        let mut by_group = BTreeMap::new();
        for (key, (tot, unc)) in groups {
            if tot == 0 {
                return Err(RatesError::ZeroDenominator {
                    location: location.clone(),
                    group: Some(key),
                });
            }
            by_group.insert(key, unc as f64 / tot as f64);
        }
        rates.insert(location, by_group);
    }

    Ok(rates)
}

/// Group by election date.
pub fn by_date(record: &RaceRecord) -> Result<Option<String>, RatesError> {
    Ok(Some(record.date.clone()))
}

/// Group by election year (the leading 4 characters of the date).
pub fn by_year(record: &RaceRecord) -> Result<Option<String>, RatesError> {
    Ok(Some(record.date.chars().take(4).collect()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionKind {
    Primary,
    General,
    Unknown,
}

impl ElectionKind {
    pub fn label(&self) -> &'static str {
        match *self {
            ElectionKind::Primary => "Primary",
            ElectionKind::General => "General",
            ElectionKind::Unknown => "Unknown",
        }
    }
}

/// Collapse a free-text election-type label to Primary or General,
/// case-insensitively. A label naming neither is Unknown (diagnosed,
/// not fatal); a label naming both is an error.
pub fn combine_primary_general(label: &str) -> Result<ElectionKind, RatesError> {
    let lower = label.to_lowercase();
    match (lower.contains("primary"), lower.contains("general")) {
        (true, true) => Err(RatesError::AmbiguousElectionLabel {
            label: label.to_string(),
        }),
        (true, false) => Ok(ElectionKind::Primary),
        (false, true) => Ok(ElectionKind::General),
        (false, false) => {
            warn!("election type {:?} unknown", label);
            Ok(ElectionKind::Unknown)
        }
    }
}

/// Group by election kind via an injected date -> type-label lookup.
/// Records whose date is missing from the lookup are dropped with a
/// diagnostic.
pub fn by_election_kind<'a>(
    lookup: &'a BTreeMap<String, String>,
) -> impl Fn(&RaceRecord) -> Result<Option<String>, RatesError> + 'a {
    move |record: &RaceRecord| match lookup.get(&record.date) {
        Some(label) => {
            let kind = combine_primary_general(label)?;
            Ok(Some(kind.label().to_string()))
        }
        None => {
            warn!("{} not found in election-type lookup", record.date);
            Ok(None)
        }
    }
}

/// The records of one coarse office category.
pub fn of_office_type(records: &[RaceRecord], office_type: OfficeType) -> Vec<RaceRecord> {
    records
        .iter()
        .filter(|record| record.office_type == Some(office_type))
        .cloned()
        .collect()
}
