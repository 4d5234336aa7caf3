extern crate clap;
extern crate env_logger;
extern crate num_format;
#[macro_use]
extern crate log;
extern crate uncontested;

use std::collections::BTreeMap;
use std::fs;
use std::process;

use clap::{App, Arg};
use num_format::{Locale, ToFormattedString};

use uncontested::configuration;
use uncontested::defs::RaceRecord;
use uncontested::elections;
use uncontested::output;
use uncontested::rates;

fn command_usage<'a, 'b>() -> App<'a, 'b> {
    App::new("uncontested")
        .about("Compiles candidate-filing spreadsheets and reports uncontested race rates")
        .arg(
            Arg::with_name("config")
                .takes_value(true)
                .default_value("uncontested.toml")
                .help("Location of the run configuration"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Override the configured output directory"),
        )
        .arg(
            Arg::with_name("json")
                .short("j")
                .long("json")
                .takes_value(false)
                .help("Write the full election set as JSON (may be huge)"),
        )
}

// per-location uncontested percentages across every compiled race,
// printed vertically aligned
fn print_rates(records: &[RaceRecord]) {
    let mut by_location: BTreeMap<&str, (u32, u32)> = BTreeMap::new();
    for record in records {
        let bucket = by_location.entry(&record.location).or_insert((0, 0));
        bucket.0 += 1;
        if !record.contested {
            bucket.1 += 1;
        }
    }
    println!("Percent of races that were uncontested:");
    for (location, (tot, unc)) in by_location {
        let rate = f64::from(unc) / f64::from(tot) * 100.0;
        println!("    {:<24} {:>5.1}%", location, rate);
    }
}

fn run(config_path: &str, output_override: Option<&str>, force_json: bool) -> Result<(), String> {
    let mut config = configuration::read_config(config_path)?;
    if let Some(dir) = output_override {
        config.output_dir = dir.into();
    }
    if force_json && config.elections_json.is_none() {
        config.elections_json = Some("elections.json".to_string());
    }

    let files = elections::discover_files(&config.input_dir, &config.pattern);
    if files.is_empty() {
        warn!(
            "no files matching {:?} under {}",
            config.pattern,
            config.input_dir.display()
        );
    }

    let set = elections::compile_all(&files);

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| format!("unable to create {}: {}", config.output_dir.display(), e))?;

    // uncontested rates by location and election date
    let by_date = rates::rates_by_group(&set.records, rates::by_date).map_err(|e| e.to_string())?;
    let header = output::report_header(&by_date, "location");
    let rows = output::prep_for_csv(&by_date, "location");
    output::save_csv(&config.output_dir.join(&config.unc_rates), &header, &rows)
        .map_err(|e| e.to_string())?;

    // the same report, restricted to each configured office category
    for office_type in &config.office_types {
        let subset = rates::of_office_type(&set.records, *office_type);
        let by_date =
            rates::rates_by_group(&subset, rates::by_date).map_err(|e| e.to_string())?;
        let header = output::report_header(&by_date, "location");
        let rows = output::prep_for_csv(&by_date, "location");
        let name = format!("unc_rates_{}.csv", office_type.slug());
        output::save_csv(&config.output_dir.join(name), &header, &rows)
            .map_err(|e| e.to_string())?;
    }

    if let Some(ref name) = config.by_year {
        let by_year = rates::rates_by_group(&set.records, rates::by_year)
            .map_err(|e| e.to_string())?;
        let header = output::report_header(&by_year, "location");
        let rows = output::prep_for_csv(&by_year, "location");
        output::save_csv(&config.output_dir.join(name), &header, &rows)
            .map_err(|e| e.to_string())?;
    }

    if let Some(ref name) = config.by_election_type {
        match config.election_types {
            Some(ref lookup_path) => {
                let lookup = configuration::load_election_types(lookup_path)?;
                let by_kind =
                    rates::rates_by_group(&set.records, rates::by_election_kind(&lookup))
                        .map_err(|e| e.to_string())?;
                // fixed kind order, restricted to the kinds present
                let mut header = vec!["location".to_string()];
                for kind in &["Primary", "General", "Unknown"] {
                    if by_kind.values().any(|columns| columns.contains_key(*kind)) {
                        header.push(kind.to_string());
                    }
                }
                let rows = output::prep_for_csv(&by_kind, "location");
                output::save_csv(&config.output_dir.join(name), &header, &rows)
                    .map_err(|e| e.to_string())?;
            }
            None => warn!(
                "skipping {}: the by-election-type report needs [lookups] election_types",
                name
            ),
        }
    }

    output::save_all_races(&config.output_dir.join(&config.all_races), &set.records)
        .map_err(|e| e.to_string())?;

    if let Some(ref name) = config.elections_json {
        output::save_json(&config.output_dir.join(name), &set.elections)
            .map_err(|e| e.to_string())?;
    }

    let filings: usize = set.records.iter().map(|r| r.candidates.total()).sum();
    println!(
        "{} elections compiled ({} files skipped): {} races, {} filings",
        set.elections.len().to_formatted_string(&Locale::en),
        set.files_skipped.to_formatted_string(&Locale::en),
        set.records.len().to_formatted_string(&Locale::en),
        filings.to_formatted_string(&Locale::en),
    );
    if !set.records.is_empty() {
        print_rates(&set.records);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let matches = command_usage().get_matches();
    let config_path = matches.value_of("config").unwrap_or("uncontested.toml");
    let output_override = matches.value_of("output");
    let force_json = matches.is_present("json");

    if let Err(e) = run(config_path, output_override, force_json) {
        eprintln!("{}", e);
        process::exit(1);
    }
}
