use std::collections::BTreeMap;

use defs::*;
use errors::CompileError;
use offices;

// pull a required column out of a row or fail the file
fn required<'a>(
    field: &'a Option<String>,
    name: &'static str,
    row: usize,
) -> Result<&'a str, CompileError> {
    match *field {
        Some(ref value) => Ok(value),
        None => Err(CompileError::MissingRequiredField { row, field: name }),
    }
}

/// Fold one election's filing rows into the nested race table and the
/// flat race-record list.
///
/// Each row is normalized, resolved to a location scope, and appended
/// to the declaration bucket of its (location, office, district) race.
/// The first row seen for a key fixes the race's vote-for count and
/// nonpartisan flag; later rows never update them. Contested flags are
/// computed once, after every row has been folded in.
pub fn compile(
    rows: Vec<FilingRow>,
    date: &str,
) -> Result<(RaceTable, Vec<RaceRecord>), CompileError> {
    let mut races: RaceTable = BTreeMap::new();

    for (idx, row) in rows.into_iter().enumerate() {
        required(&row.town, "TOWN", idx)?;
        required(&row.office, "OFFICE", idx)?;
        required(&row.district, "DIST#", idx)?;
        let declaration = {
            let value = required(&row.declaration, "DECLARATION", idx)?;
            match Declaration::parse(value) {
                Some(d) => d,
                None => {
                    return Err(CompileError::UnknownDeclaration {
                        row: idx,
                        value: value.to_string(),
                    })
                }
            }
        };
        let party = required(&row.party, "PARTY", idx)?.to_string();

        let normalized = offices::normalize(row);
        let location = offices::resolve_location(&normalized);

        let districts = races
            .entry(location)
            .or_insert(BTreeMap::new())
            .entry(normalized.office.clone())
            .or_insert(BTreeMap::new());

        if !districts.contains_key(&normalized.dist) {
            let vote_for: u32 = match normalized.vote_for.parse() {
                Ok(v) => v,
                Err(_) => {
                    return Err(CompileError::MalformedOfficeTitle {
                        row: idx,
                        office: normalized.office.clone(),
                        token: normalized.vote_for.clone(),
                    })
                }
            };
            districts.insert(
                normalized.dist.clone(),
                Race {
                    candidates: Candidates::default(),
                    contested: None,
                    nonpartisan: party == offices::NONPARTISAN_PARTY,
                    vote_for,
                },
            );
        } else if let Some(race) = districts.get(&normalized.dist) {
            // first row wins for vote_for/nonpartisan; a diverging
            // later row is ignored
            if let Ok(v) = normalized.vote_for.parse::<u32>() {
                if v != race.vote_for {
                    debug!(
                        "row {}: vote-for {} diverges from race value {}, keeping first",
                        idx, v, race.vote_for
                    );
                }
            }
        }

        if let Some(race) = districts.get_mut(&normalized.dist) {
            race.candidates.bucket_mut(declaration).push(normalized);
        }
    }

    let records = calculate_contested(&mut races, date);
    Ok((races, records))
}

// set every race's contested flag and emit the flat record list, in
// sorted table order
fn calculate_contested(races: &mut RaceTable, date: &str) -> Vec<RaceRecord> {
    let mut records = Vec::new();

    for (location, offices_of) in races.iter_mut() {
        for (office, districts) in offices_of.iter_mut() {
            for (district, race) in districts.iter_mut() {
                let contested = is_contested(race);
                race.contested = Some(contested);

                records.push(RaceRecord {
                    date: date.to_string(),
                    location: location.clone(),
                    office: office.clone(),
                    office_type: offices::classify_office(office),
                    district: district.clone(),
                    vote_for: race.vote_for,
                    nonpartisan: race.nonpartisan,
                    contested,
                    candidates: race.candidates.clone(),
                });
            }
        }
    }

    records
}

// a race is contested when its valid filings outnumber the seats
fn is_contested(race: &Race) -> bool {
    race.candidates.valid.len() > race.vote_for as usize
}
