//! Indicator extraction from free text
//!
//! The patterns are deliberately loose. The domain pattern also fires on
//! host-like fragments (`10.0.0.1.nip.io`, `report.pdf`) and the IPv4
//! pattern does no 0-255 range check, so an input may yield both a domain
//! and an IP for the same host.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dotted labels ending in an alphabetic label of two or more letters
pub const DOMAIN_PATTERN: &str = r"\b(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}\b";

/// Four dot-separated groups of one to three digits
pub const IP_PATTERN: &str = r"\b(?:\d{1,3}\.){3}\d{1,3}\b";

/// `http(s)://host[:port]`, captured up to the first `/` or end of text
///
/// End of text allows one trailing newline, so `echo`ed input still matches.
pub const URL_PATTERN: &str =
    r"(https?://(?:[a-zA-Z0-9.-]+|(?:\d{1,3}\.){3}\d{1,3})(?::\d+)?)(?:/|\n?\z)";

static DOMAIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"));
static IP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(IP_PATTERN).expect("ip pattern is valid"));
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(URL_PATTERN).expect("url pattern is valid"));

/// Every domain-like substring, in order, duplicates kept
pub fn extract_domains(text: &str) -> Vec<String> {
    DOMAIN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every IPv4-like substring, in order, duplicates kept
pub fn extract_ips(text: &str) -> Vec<String> {
    IP_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Scheme, host and port of every URL, in order, duplicates kept
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
