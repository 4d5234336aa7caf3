//
// Office-title normalization and the two rule-driven classifiers:
// location scope and coarse office type. Rules are ordered static
// tables, first match wins.
//

use defs::{FilingRow, NormalizedRow, OfficeType};

// the literal party string marking a nonpartisan local office
pub const NONPARTISAN_PARTY: &str = "Non-Partisan Local Office";

// boilerplate removed from office titles after suffix extraction.
// the trailing spaces on the NON PARTISAN variants are deliberate:
// they eat the separator along with the prefix.
const BOILERPLATE: &[&str] = &[
    "WITHOUT PARTY MARKS OR DESIGNATION",
    "NON PARTISAN ",
    "NON-PARTISAN ",
];

pub const FEDERAL: &str = "federal";
pub const STATE: &str = "state";

// which normalized field a scope marker is matched against
#[derive(Debug, Clone, Copy)]
enum MarkerField {
    Office,
    District,
}

struct ScopeRule {
    field: MarkerField,
    marker: &'static str,
    scope: &'static str,
}

// checked top to bottom; the fallback (the row's town) applies when
// nothing matches
const SCOPE_RULES: &[ScopeRule] = &[
    ScopeRule {
        field: MarkerField::Office,
        marker: "IN CONGRESS",
        scope: FEDERAL,
    },
    ScopeRule {
        field: MarkerField::Office,
        marker: "PRESIDENTIAL ELECTOR",
        scope: FEDERAL,
    },
    ScopeRule {
        field: MarkerField::Office,
        marker: "PRESIDENT OF THE UNITED STATES",
        scope: FEDERAL,
    },
    ScopeRule {
        field: MarkerField::Office,
        marker: "DELEGATE FOR",
        scope: FEDERAL,
    },
    ScopeRule {
        field: MarkerField::Office,
        marker: "STATE COMMITTEE",
        scope: STATE,
    },
    ScopeRule {
        field: MarkerField::Office,
        marker: "DISTRICT COMMITTEE",
        scope: STATE,
    },
    ScopeRule {
        field: MarkerField::Office,
        marker: "IN GENERAL ASSEMBLY",
        scope: STATE,
    },
    ScopeRule {
        field: MarkerField::District,
        marker: "Statewide",
        scope: STATE,
    },
];

enum OfficeTypeRule {
    Exact(&'static str, OfficeType),
    Contains(&'static str, OfficeType),
}

const OFFICE_TYPE_RULES: &[OfficeTypeRule] = &[
    OfficeTypeRule::Exact("MAYOR", OfficeType::Executive),
    OfficeTypeRule::Exact("TOWN MODERATOR", OfficeType::Executive),
    OfficeTypeRule::Exact("GOVERNOR", OfficeType::Executive),
    OfficeTypeRule::Exact("PRESIDENT OF THE UNITED STATES", OfficeType::Executive),
    OfficeTypeRule::Contains("COUNCIL", OfficeType::Legislature),
    OfficeTypeRule::Contains("GENERAL ASSEMBLY", OfficeType::Legislature),
    OfficeTypeRule::Contains("CONGRESS", OfficeType::Legislature),
    OfficeTypeRule::Contains("SCHOOL COMMITTEE", OfficeType::SchoolCommittee),
];

/// Derive the cleaned office name, district and vote-for token from a
/// filing row's office title, in order:
///   1. a trailing "VOTE FOR <tok>" suffix sets the vote-for token
///      (kept verbatim, parsed later by the compiler) and is stripped;
///   2. a trailing "DISTRICT <tok>" suffix (tok != "COMMITTEE") sets
///      the district, overriding the explicit DIST# field;
///   3. boilerplate substrings are removed.
/// Titles shorter than a suffix pattern simply fail the match.
pub fn normalize(row: FilingRow) -> NormalizedRow {
    let title = row.office.clone().unwrap_or_else(String::new);
    let explicit_dist = row.district.clone().unwrap_or_else(String::new);

    let mut toks: Vec<&str> = title.split_whitespace().collect();

    let mut vote_for = String::from("1");
    let n = toks.len();
    if n >= 3 && toks[n - 3] == "VOTE" && toks[n - 2] == "FOR" {
        vote_for = toks[n - 1].to_string();
        toks.truncate(n - 3);
    }

    let n = toks.len();
    let dist = if n >= 2 && toks[n - 2] == "DISTRICT" && toks[n - 1] != "COMMITTEE" {
        let d = toks[n - 1].to_string();
        toks.truncate(n - 2);
        d
    } else {
        explicit_dist
    };

    let mut office = toks.join(" ");
    for b in BOILERPLATE {
        office = office.replace(b, "");
    }

    NormalizedRow {
        row,
        office,
        dist,
        vote_for,
    }
}

/// Classify a normalized row into its location scope: "federal",
/// "state", or the row's town verbatim.
pub fn resolve_location(row: &NormalizedRow) -> String {
    for rule in SCOPE_RULES {
        let haystack = match rule.field {
            MarkerField::Office => &row.office,
            MarkerField::District => &row.dist,
        };
        if haystack.contains(rule.marker) {
            return rule.scope.to_string();
        }
    }
    row.row.town.clone().unwrap_or_else(String::new)
}

/// Map a cleaned office name to its coarse category, or None when no
/// rule applies.
pub fn classify_office(office: &str) -> Option<OfficeType> {
    for rule in OFFICE_TYPE_RULES {
        match *rule {
            OfficeTypeRule::Exact(name, t) if office == name => return Some(t),
            OfficeTypeRule::Contains(marker, t) if office.contains(marker) => return Some(t),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(town: &str, office: &str, dist: &str) -> FilingRow {
        FilingRow {
            town: Some(town.to_string()),
            office: Some(office.to_string()),
            district: Some(dist.to_string()),
            declaration: Some("Valid".to_string()),
            party: Some("Democrat".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn vote_for_suffix_extracted() {
        let n = normalize(row("CRANSTON", "CITY COUNCIL VOTE FOR 3", "2"));
        assert_eq!(n.vote_for, "3");
        assert_eq!(n.office, "CITY COUNCIL");
        assert_eq!(n.dist, "2");
    }

    #[test]
    fn vote_for_defaults_to_one() {
        let n = normalize(row("CRANSTON", "MAYOR", "0"));
        assert_eq!(n.vote_for, "1");
        assert_eq!(n.office, "MAYOR");
    }

    #[test]
    fn vote_for_token_kept_verbatim() {
        // not validated here; the compiler rejects it at race creation
        let n = normalize(row("CRANSTON", "MAYOR VOTE FOR X", "0"));
        assert_eq!(n.vote_for, "X");
        assert_eq!(n.office, "MAYOR");
    }

    #[test]
    fn district_suffix_overrides_explicit_field() {
        let n = normalize(row("WARWICK", "STATE SENATOR DISTRICT 5", "9"));
        assert_eq!(n.dist, "5");
        assert_eq!(n.office, "STATE SENATOR");
    }

    #[test]
    fn district_committee_is_not_a_district() {
        let n = normalize(row("WARWICK", "SENATORIAL DISTRICT COMMITTEE", "12"));
        assert_eq!(n.dist, "12");
        assert_eq!(n.office, "SENATORIAL DISTRICT COMMITTEE");
    }

    #[test]
    fn both_suffixes_strip_in_order() {
        let n = normalize(row("WARWICK", "CITY COUNCIL DISTRICT 4 VOTE FOR 2", "7"));
        assert_eq!(n.vote_for, "2");
        assert_eq!(n.dist, "4");
        assert_eq!(n.office, "CITY COUNCIL");
    }

    #[test]
    fn boilerplate_prefix_removed() {
        let n = normalize(row("BARRINGTON", "NON-PARTISAN SCHOOL COMMITTEE", ""));
        assert_eq!(n.office, "SCHOOL COMMITTEE");
        let n = normalize(row("BARRINGTON", "NON PARTISAN TOWN COUNCIL", ""));
        assert_eq!(n.office, "TOWN COUNCIL");
    }

    #[test]
    fn without_party_marks_removed() {
        // the removal keeps the separator space before the phrase
        let n = normalize(row(
            "BARRINGTON",
            "SCHOOL COMMITTEE WITHOUT PARTY MARKS OR DESIGNATION",
            "",
        ));
        assert_eq!(n.office, "SCHOOL COMMITTEE ");
    }

    #[test]
    fn short_titles_do_not_panic() {
        assert_eq!(normalize(row("X", "", "1")).office, "");
        assert_eq!(normalize(row("X", "MAYOR", "1")).office, "MAYOR");
        let n = normalize(row("X", "VOTE FOR 2", "1"));
        assert_eq!(n.vote_for, "2");
        assert_eq!(n.office, "");
    }

    #[test]
    fn congress_is_federal_regardless_of_town() {
        let n = normalize(row("CRANSTON", "REPRESENTATIVE IN CONGRESS DISTRICT 2", "0"));
        assert_eq!(resolve_location(&n), "federal");
    }

    #[test]
    fn federal_markers_outrank_statewide_district() {
        let n = normalize(row("CRANSTON", "PRESIDENTIAL ELECTOR", "Statewide"));
        assert_eq!(resolve_location(&n), "federal");
    }

    #[test]
    fn state_markers_match_office() {
        let n = normalize(row("CRANSTON", "DEMOCRATIC STATE COMMITTEE", "3"));
        assert_eq!(resolve_location(&n), "state");
        let n = normalize(row("CRANSTON", "SENATOR IN GENERAL ASSEMBLY DISTRICT 17", "0"));
        assert_eq!(resolve_location(&n), "state");
    }

    #[test]
    fn statewide_district_is_state_scope() {
        let n = normalize(row("CRANSTON", "GOVERNOR", "Statewide"));
        assert_eq!(resolve_location(&n), "state");
    }

    #[test]
    fn default_scope_is_the_town() {
        let n = normalize(row("CRANSTON", "MAYOR", "0"));
        assert_eq!(resolve_location(&n), "CRANSTON");
    }

    #[test]
    fn office_type_exact_matches() {
        assert_eq!(classify_office("MAYOR"), Some(OfficeType::Executive));
        assert_eq!(classify_office("TOWN MODERATOR"), Some(OfficeType::Executive));
        assert_eq!(
            classify_office("PRESIDENT OF THE UNITED STATES"),
            Some(OfficeType::Executive)
        );
    }

    #[test]
    fn office_type_substring_matches() {
        assert_eq!(classify_office("CITY COUNCIL"), Some(OfficeType::Legislature));
        assert_eq!(
            classify_office("SENATOR IN GENERAL ASSEMBLY"),
            Some(OfficeType::Legislature)
        );
        assert_eq!(
            classify_office("REPRESENTATIVE IN CONGRESS"),
            Some(OfficeType::Legislature)
        );
        assert_eq!(
            classify_office("SCHOOL COMMITTEE"),
            Some(OfficeType::SchoolCommittee)
        );
    }

    #[test]
    fn office_type_exact_rules_do_not_match_substrings() {
        // LIEUTENANT GOVERNOR is not the exact GOVERNOR rule, and no
        // substring rule covers it
        assert_eq!(classify_office("LIEUTENANT GOVERNOR"), None);
        assert_eq!(classify_office("TAX ASSESSOR"), None);
    }
}
