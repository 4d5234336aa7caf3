/*
 * core types
 */

use std::collections::BTreeMap;

// one candidate filing, as read from a Board of Elections export.
// the required trio (TOWN, OFFICE, DIST#) and the two fields the
// compiler consumes (DECLARATION, PARTY) deserialize as Option so a
// missing or empty column surfaces as a per-row compile error rather
// than a csv-level failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilingRow {
    // the bits we actually care about
    #[serde(rename = "TOWN")]
    pub town: Option<String>,
    #[serde(rename = "OFFICE")]
    pub office: Option<String>,
    #[serde(rename = "DIST#")]
    pub district: Option<String>,
    #[serde(rename = "DECLARATION")]
    pub declaration: Option<String>,
    #[serde(rename = "PARTY")]
    pub party: Option<String>,
    // ... and the other bits
    #[serde(rename = "LAST NAME", default)]
    pub last_name: String,
    #[serde(rename = "FIRST NAME", default)]
    pub first_name: String,
    #[serde(rename = "MIDDLE INIT", default)]
    pub middle_init: String,
    #[serde(rename = "SUFFIX", default)]
    pub suffix: String,
    #[serde(rename = "ADDRESS", default)]
    pub address: String,
    #[serde(rename = "CITY", default)]
    pub city: String,
    #[serde(rename = "STATE", default)]
    pub state: String,
    #[serde(rename = "ZIP", default)]
    pub zip: String,
}

// a filing row plus the fields derived from its office title.
// the vote-for token is kept exactly as it appeared in the title
// ("1" when no suffix was present); the compiler parses it when the
// race is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    #[serde(flatten)]
    pub row: FilingRow,
    pub office: String,
    pub dist: String,
    #[serde(rename = "votefor")]
    pub vote_for: String,
}

// a candidate filing's standing with the Board of Elections
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Declaration {
    Valid,
    Void,
    Withdrew,
    UnderReview,
}

impl Declaration {
    pub fn parse(value: &str) -> Option<Declaration> {
        match value {
            "Valid" => Some(Declaration::Valid),
            "Void" => Some(Declaration::Void),
            "Withdrew" => Some(Declaration::Withdrew),
            "Under Review" => Some(Declaration::UnderReview),
            _ => None,
        }
    }
}

// the four candidate buckets of a race, keyed by declaration status.
// insertion order within a bucket is input order. fields are declared
// in the serialized keys' sort order so JSON output comes out sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Candidates {
    #[serde(rename = "Under Review")]
    pub under_review: Vec<NormalizedRow>,
    #[serde(rename = "Valid")]
    pub valid: Vec<NormalizedRow>,
    #[serde(rename = "Void")]
    pub void: Vec<NormalizedRow>,
    #[serde(rename = "Withdrew")]
    pub withdrew: Vec<NormalizedRow>,
}

impl Candidates {
    pub fn bucket_mut(&mut self, declaration: Declaration) -> &mut Vec<NormalizedRow> {
        match declaration {
            Declaration::Valid => &mut self.valid,
            Declaration::Void => &mut self.void,
            Declaration::Withdrew => &mut self.withdrew,
            Declaration::UnderReview => &mut self.under_review,
        }
    }

    pub fn total(&self) -> usize {
        self.under_review.len() + self.valid.len() + self.void.len() + self.withdrew.len()
    }
}

// one electable seat instance: an office within a district within a
// location, for one election date. vote_for and nonpartisan come from
// the first row seen for the key; contested stays None until every row
// of the owning election has been folded in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Race {
    pub candidates: Candidates,
    pub contested: Option<bool>,
    pub nonpartisan: bool,
    #[serde(rename = "votefor")]
    pub vote_for: u32,
}

// location -> office -> district -> Race. BTreeMap keeps iteration,
// reports and JSON output key-sorted.
pub type RaceTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, Race>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OfficeType {
    Executive,
    Legislature,
    #[serde(rename = "School Committee")]
    SchoolCommittee,
}

impl OfficeType {
    pub fn label(&self) -> &'static str {
        match *self {
            OfficeType::Executive => "Executive",
            OfficeType::Legislature => "Legislature",
            OfficeType::SchoolCommittee => "School Committee",
        }
    }

    pub fn from_label(label: &str) -> Option<OfficeType> {
        match label {
            "Executive" => Some(OfficeType::Executive),
            "Legislature" => Some(OfficeType::Legislature),
            "School Committee" => Some(OfficeType::SchoolCommittee),
            _ => None,
        }
    }

    // short report-file suffix: "exe", "leg", "sch"
    pub fn slug(&self) -> String {
        self.label()[0..3].to_lowercase()
    }
}

// a flattened, self-contained view of one race plus its context; the
// unit consumed by aggregation and export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceRecord {
    pub date: String,
    pub location: String,
    pub office: String,
    pub office_type: Option<OfficeType>,
    pub district: String,
    #[serde(rename = "votefor")]
    pub vote_for: u32,
    pub nonpartisan: bool,
    pub contested: bool,
    pub candidates: Candidates,
}

// per-location aggregate for one election or grouping bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSummary {
    pub tot_races: u32,
    pub unc_races: u32,
    pub unc_rate: f64,
}

// one source file's compiled result. invariant: every race in the
// table has Some contested flag once compilation completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Election {
    pub date: String,
    pub races: RaceTable,
    pub unc_rates: BTreeMap<String, RateSummary>,
}
