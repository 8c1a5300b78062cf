use super::rate::Rate;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Carrier names recognised at the start of a text selector.
pub const DEFAULT_CARRIERS: [&str; 3] = ["fedex", "usps", "ups"];

static FREE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_\s]+").expect("free-text pattern is valid"));

/// Identifies which rates an operation targets.
///
/// Deserializes from a JSON number, an array of numbers, or a string.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
#[serde(untagged)]
pub enum Selector {
    /// First rate with this service id.
    Code(u32),
    /// Every rate matching any of these service ids, code by code.
    Codes(Vec<u32>),
    /// `"all"`, or a carrier and/or free-text search over method and service name.
    Text(String),
}

impl From<u32> for Selector {
    fn from(code: u32) -> Self {
        Self::Code(code)
    }
}

impl From<Vec<u32>> for Selector {
    fn from(codes: Vec<u32>) -> Self {
        Self::Codes(codes)
    }
}

impl From<&[u32]> for Selector {
    fn from(codes: &[u32]) -> Self {
        Self::Codes(codes.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Selector {
    fn from(codes: [u32; N]) -> Self {
        Self::Codes(codes.to_vec())
    }
}

impl From<&str> for Selector {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Selector {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// The two tokens extracted from a text selector, both lowercased.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct TextQuery {
    pub carrier: Option<String>,
    pub term: Option<String>,
}

impl TextQuery {
    pub fn matches(&self, label: &str) -> bool {
        let carrier_ok = self.carrier.as_deref().is_none_or(|c| label.contains(c));
        let term_ok = self.term.as_deref().is_none_or(|t| label.contains(t));
        carrier_ok && term_ok
    }
}

/// Maps selectors onto indices of a rate collection.
#[derive(Debug, Clone)]
pub struct SelectorResolver {
    carriers: Vec<String>,
}

impl Default for SelectorResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CARRIERS)
    }
}

impl SelectorResolver {
    pub fn new<I, S>(carriers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            carriers: carriers
                .into_iter()
                .map(|c| c.as_ref().trim().to_lowercase())
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    /// Returns the indices of `rates` denoted by `selector`.
    ///
    /// Numeric selectors yield at most the first match. Code lists are
    /// code-major. Text selectors yield ascending indices.
    pub fn resolve(&self, rates: &[Rate], selector: &Selector) -> Vec<usize> {
        match selector {
            Selector::Code(code) => rates
                .iter()
                .position(|r| r.service_id == *code)
                .into_iter()
                .collect(),
            Selector::Codes(codes) => codes
                .iter()
                .flat_map(|code| {
                    rates
                        .iter()
                        .enumerate()
                        .filter(move |(_, r)| r.service_id == *code)
                        .map(|(i, _)| i)
                })
                .collect(),
            Selector::Text(text) if text.eq_ignore_ascii_case("all") => (0..rates.len()).collect(),
            Selector::Text(text) => match self.parse_text(text) {
                Some(query) => rates
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| query.matches(&r.label()))
                    .map(|(i, _)| i)
                    .collect(),
                None => {
                    tracing::debug!(selector = %text, "text selector has no usable token");
                    Vec::new()
                }
            },
        }
    }

    /// Splits a text selector into an optional leading carrier and optional free text.
    ///
    /// The longest configured carrier that prefixes the text wins; one
    /// whitespace character after it is skipped, and the free text is the run
    /// of ASCII word characters and whitespace that follows. Returns `None` when
    /// neither token is present.
    pub fn parse_text(&self, text: &str) -> Option<TextQuery> {
        let lowered = text.to_lowercase();

        let carrier = self
            .carriers
            .iter()
            .filter(|c| lowered.starts_with(c.as_str()))
            .max_by_key(|c| c.len())
            .cloned();

        let mut rest = &lowered[carrier.as_ref().map_or(0, |c| c.len())..];
        if let Some(ch) = rest.chars().next().filter(|c| c.is_whitespace()) {
            rest = &rest[ch.len_utf8()..];
        }

        let term = FREE_TEXT
            .find(rest)
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty());

        if carrier.is_none() && term.is_none() {
            return None;
        }
        Some(TextQuery { carrier, term })
    }
}
