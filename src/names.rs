//! XML name validation and utilities
//!
//! Lexical checks for NCNames and NMTOKENs, which is what most DDMS
//! attribute tokens are typed as.

use once_cell::sync::Lazy;
use regex::Regex;

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\-\.0-9\u{B7}]*$")
        .unwrap()
});

static NMTOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}:\-\.0-9\u{B7}]+$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    !name.is_empty() && NCNAME.is_match(name)
}

/// Check if a string is a valid NMTOKEN
pub fn is_valid_nmtoken(token: &str) -> bool {
    NMTOKEN.is_match(token)
}

/// Check if a string is a valid NMTOKENS list (whitespace separated, non-empty)
pub fn is_valid_nmtokens(tokens: &str) -> bool {
    let mut parts = tokens.split_whitespace().peekable();
    parts.peek().is_some() && parts.all(is_valid_nmtoken)
}

/// Split an xs:list value into its items
pub fn split_list(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}
