//! Lexical checks for the XML Schema datatypes DDMS components use
//!
//! URIs are checked as RFC 3986 references (relative references allowed),
//! dates against the xs:date, xs:dateTime, xs:gYear and xs:gYearMonth
//! lexical spaces.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static URI_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=]|%[0-9A-Fa-f]{2})+$").unwrap()
});

static TIMEZONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(Z|[+-](0\d|1[0-4]):[0-5]\d)$").unwrap());

static G_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?([1-9]\d{4,}|\d{4})$").unwrap());

static G_YEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?([1-9]\d{4,}|\d{4})-(0[1-9]|1[0-2])$").unwrap());

/// Check whether a value is a syntactically valid URI reference
pub fn is_valid_uri(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(value) {
        Ok(_) => true,
        Err(url::ParseError::RelativeUrlWithoutBase) => URI_REFERENCE.is_match(value),
        Err(_) => false,
    }
}

fn strip_timezone(value: &str) -> &str {
    match TIMEZONE.find(value) {
        Some(m) => &value[..m.start()],
        None => value,
    }
}

/// Check whether a value is in the lexical space of xs:date
pub fn is_xs_date(value: &str) -> bool {
    NaiveDate::parse_from_str(strip_timezone(value), "%Y-%m-%d").is_ok()
}

/// Check whether a value is in the lexical space of xs:dateTime
pub fn is_xs_date_time(value: &str) -> bool {
    let local = strip_timezone(value);
    NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(local, "%Y-%m-%dT%H:%M:%S").is_ok()
}

/// Check whether a value is in the lexical space of xs:gYear
pub fn is_xs_g_year(value: &str) -> bool {
    G_YEAR.is_match(strip_timezone(value))
}

/// Check whether a value is in the lexical space of xs:gYearMonth
pub fn is_xs_g_year_month(value: &str) -> bool {
    G_YEAR_MONTH.is_match(strip_timezone(value))
}

/// Check whether a value is one of the date forms DDMS accepts for its
/// date attributes (xs:date, xs:dateTime, xs:gYear or xs:gYearMonth)
pub fn is_ddms_date(value: &str) -> bool {
    is_xs_date(value) || is_xs_date_time(value) || is_xs_g_year(value) || is_xs_g_year_month(value)
}

/// Check whether a value is in the lexical space of xs:boolean
pub fn is_xs_boolean(value: &str) -> bool {
    matches!(value, "true" | "false" | "1" | "0")
}
