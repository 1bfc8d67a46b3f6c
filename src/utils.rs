use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Naive datetime formats seen in ODS payloads, tried in order after the
/// offset-carrying forms.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Normalizes a label for matching: trim, lowercase, fold accents.
///
/// French field names come back from the portal in every imaginable
/// spelling ("Température", "temperature", "TEMPERATURE (°C)"), so all key
/// comparisons go through this.
pub fn norm(s: &str) -> String {
    s.trim().to_lowercase().chars().map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

/// Parses the various date and datetime shapes the portal returns.
///
/// Accepts RFC 3339 (with `Z` or a numeric offset), the naive ISO forms
/// with or without fractional seconds, a space-separated variant, and bare
/// dates (mapped to midnight). Anything else is `None`, never an error;
/// observations without a parseable timestamp are legitimate.
pub fn parse_datetime_any(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.naive_utc());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}
