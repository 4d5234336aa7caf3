use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use defs::OfficeType;

#[derive(Debug, Deserialize)]
struct Input {
    directory: String,
    pattern: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Output {
    directory: String,
    all_races: Option<String>,
    unc_rates: Option<String>,
    elections_json: Option<String>,
    by_year: Option<String>,
    by_election_type: Option<String>,
    office_types: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Lookups {
    election_types: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Config {
    description: Option<String>,
    input: Input,
    output: Output,
    lookups: Option<Lookups>,
}

fn config_contents(input_file: &str) -> Result<Config, String> {
    let mut fd = match File::open(input_file) {
        Ok(fd) => fd,
        Err(e) => return Err(format!("unable to read {}: {}", input_file, e)),
    };

    let mut buf = String::new();
    if let Err(e) = fd.read_to_string(&mut buf) {
        return Err(format!("unable to read {}: {}", input_file, e));
    }

    let config: Config = match toml::from_str(&buf) {
        Ok(c) => c,
        Err(e) => return Err(format!("unable to parse {}: {}", input_file, e)),
    };

    Ok(config)
}

// a run's resolved configuration: where the filings live, which
// reports to write, and which lookups feed them. all paths are
// resolved against the config file's directory.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub description: String,
    pub input_dir: PathBuf,
    pub pattern: String,
    pub output_dir: PathBuf,
    pub all_races: String,
    pub unc_rates: String,
    pub elections_json: Option<String>,
    pub by_year: Option<String>,
    pub by_election_type: Option<String>,
    pub office_types: Vec<OfficeType>,
    pub election_types: Option<PathBuf>,
}

pub fn read_config(input_file: &str) -> Result<RunConfig, String> {
    let path = Path::new(input_file);
    let dir = match path.parent() {
        Some(d) if d != Path::new("") => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let in_dir = |s: &str| -> PathBuf { dir.join(s) };

    let config = config_contents(input_file)?;

    let mut office_types = Vec::new();
    for label in config.output.office_types.unwrap_or_else(Vec::new) {
        match OfficeType::from_label(&label) {
            Some(t) => office_types.push(t),
            None => {
                return Err(format!(
                    "unknown office type {:?} in {}",
                    label, input_file
                ))
            }
        }
    }

    Ok(RunConfig {
        description: config.description.unwrap_or_else(String::new),
        input_dir: in_dir(&config.input.directory),
        pattern: config
            .input
            .pattern
            .unwrap_or_else(|| "*.csv".to_string()),
        output_dir: in_dir(&config.output.directory),
        all_races: config
            .output
            .all_races
            .unwrap_or_else(|| "all_races.csv".to_string()),
        unc_rates: config
            .output
            .unc_rates
            .unwrap_or_else(|| "unc_rates.csv".to_string()),
        elections_json: config.output.elections_json,
        by_year: config.output.by_year,
        by_election_type: config.output.by_election_type,
        office_types,
        election_types: config
            .lookups
            .and_then(|l| l.election_types)
            .map(|s| in_dir(&s)),
    })
}

/// Load the election-type lookup: a JSON object mapping election date
/// to the election's long type label. Passed explicitly to the report
/// that needs it.
pub fn load_election_types(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let mut fd = match File::open(path) {
        Ok(fd) => fd,
        Err(e) => return Err(format!("unable to read {}: {}", path.display(), e)),
    };
    let mut buf = String::new();
    if let Err(e) = fd.read_to_string(&mut buf) {
        return Err(format!("unable to read {}: {}", path.display(), e));
    }
    match serde_json::from_str(&buf) {
        Ok(map) => Ok(map),
        Err(e) => Err(format!("unable to parse {}: {}", path.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile;

    fn write_config(dir: &Path, contents: &str) -> String {
        let path = dir.join("uncontested.toml");
        let mut fd = File::create(&path).unwrap();
        fd.write_all(contents.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn defaults_applied_and_paths_resolved() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[input]\ndirectory = \"filings\"\n[output]\ndirectory = \"out\"\n",
        );
        let config = read_config(&path).unwrap();
        assert_eq!(config.pattern, "*.csv");
        assert_eq!(config.all_races, "all_races.csv");
        assert_eq!(config.unc_rates, "unc_rates.csv");
        assert_eq!(config.input_dir, dir.path().join("filings"));
        assert_eq!(config.output_dir, dir.path().join("out"));
        assert!(config.elections_json.is_none());
        assert!(config.office_types.is_empty());
        assert!(config.election_types.is_none());
    }

    #[test]
    fn office_types_and_lookups_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            concat!(
                "[input]\ndirectory = \"filings\"\n",
                "[output]\ndirectory = \"out\"\n",
                "office_types = [\"Executive\", \"School Committee\"]\n",
                "by_election_type = \"unc_rates_by_elec_type.csv\"\n",
                "[lookups]\nelection_types = \"list_of_elections.json\"\n",
            ),
        );
        let config = read_config(&path).unwrap();
        assert_eq!(
            config.office_types,
            vec![OfficeType::Executive, OfficeType::SchoolCommittee]
        );
        assert_eq!(
            config.election_types,
            Some(dir.path().join("list_of_elections.json"))
        );
    }

    #[test]
    fn unknown_office_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            concat!(
                "[input]\ndirectory = \"filings\"\n",
                "[output]\ndirectory = \"out\"\n",
                "office_types = [\"Judiciary\"]\n",
            ),
        );
        assert!(read_config(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_config("/nonexistent/uncontested.toml").is_err());
    }

    #[test]
    fn election_type_lookup_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list_of_elections.json");
        let mut fd = File::create(&path).unwrap();
        fd.write_all(b"{\"2014-09-09\": \"Statewide Primary\"}").unwrap();
        let lookup = load_election_types(&path).unwrap();
        assert_eq!(lookup["2014-09-09"], "Statewide Primary");
    }
}
