/// Country aliases mapped to ISO 3166-1 alpha-2 codes
///
/// Aliases are stored normalized (see [`normalize`]).
const COUNTRY_ALIASES: &[(&str, &[&str])] = &[
    ("US", &["us", "usa", "united states", "united states of america", "america"]),
    ("CA", &["ca", "canada"]),
    ("GB", &["gb", "uk", "united kingdom", "great britain", "britain", "england", "scotland", "wales"]),
    ("AU", &["au", "australia"]),
    ("DE", &["de", "germany", "deutschland"]),
    ("IE", &["ie", "ireland", "republic of ireland"]),
    ("NZ", &["nz", "new zealand"]),
    ("NL", &["nl", "netherlands", "the netherlands", "holland"]),
    ("FR", &["fr", "france"]),
    ("SG", &["sg", "singapore"]),
    ("IN", &["in", "india"]),
    ("JP", &["jp", "japan"]),
    ("CN", &["cn", "china"]),
    ("SE", &["se", "sweden"]),
    ("CH", &["ch", "switzerland"]),
    ("IT", &["it", "italy"]),
    ("ES", &["es", "spain"]),
];

/// Normalize a free-text country name for lookup
///
/// Lowercases, drops punctuation and collapses whitespace, so that
/// "U.S.A." and "usa" compare equal.
pub fn normalize(country: &str) -> String {
    country
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a free-text country name to its canonical code
pub fn canonical_code(country: &str) -> Option<&'static str> {
    let normalized = normalize(country);
    if normalized.is_empty() {
        return None;
    }

    COUNTRY_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(code, _)| *code)
}

/// Check whether two country strings name the same country
///
/// Known countries compare by canonical code. Unknown names fall back to
/// normalized whole-string equality, never substring containment.
pub fn countries_match(a: &str, b: &str) -> bool {
    match (canonical_code(a), canonical_code(b)) {
        (Some(left), Some(right)) => left == right,
        _ => {
            let left = normalize(a);
            !left.is_empty() && left == normalize(b)
        }
    }
}
