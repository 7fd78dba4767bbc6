//! Fixed attribute patterns matched against raw form markup.
//!
//! Form markup is templated and not guaranteed to be well-formed at scan
//! time, so every rule is a regular expression over text rather than a walk
//! over a parsed tree. All patterns are compiled once on first use.

use std::sync::LazyLock;

use regex::Regex;

/// Five word blocks joined by hyphens. Deliberately looser than RFC 4122.
pub static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Za-z_]+-[0-9A-Za-z_]+-[0-9A-Za-z_]+-[0-9A-Za-z_]+-[0-9A-Za-z_]+")
        .expect("Invalid uuid regex")
});

/// Attributes whose comma-separated values may hold `SOURCE:CODE` concept mappings.
pub static MAPPED_CONCEPT_PATTERNS: LazyLock<Vec<AttributePattern>> = LazyLock::new(|| {
    [
        "conceptId",
        "conceptIds",
        "groupingConceptId",
        "answerConceptId",
        "answerConceptIds",
        "discontinuedReasonConceptId",
        "discontinueReasonAnswers",
    ]
    .into_iter()
    .map(AttributePattern::anywhere)
    .collect()
});

/// The drug name list attribute.
pub static DRUG_NAME_PATTERN: LazyLock<AttributePattern> =
    LazyLock::new(|| AttributePattern::anywhere("drugNames"));

/// Local attributes of `<encounterLocation>`.
pub static LOCATION_PATTERNS: LazyLock<Vec<AttributePattern>> = LazyLock::new(|| {
    vec![
        AttributePattern::local("encounterLocation", "default"),
        AttributePattern::local("encounterLocation", "order"),
    ]
});

/// Local attributes of `<encounterProvider>`.
pub static PROVIDER_PATTERNS: LazyLock<Vec<AttributePattern>> = LazyLock::new(|| {
    vec![
        AttributePattern::local("encounterProvider", "default"),
        AttributePattern::local("encounterProvider", "role"),
    ]
});

/// A named extraction rule: an attribute, optionally anchored to a tag.
///
/// A tag-anchored pattern only matches when the attribute appears inside
/// that tag's attribute list, i.e. after `<tag` and before the next `>`.
#[derive(Debug)]
pub struct AttributePattern {
    tag: Option<&'static str>,
    attribute: &'static str,
    local: bool,
    /// Group 1 is the attribute value.
    value: Regex,
    /// Group 1 is ` attribute="value"` including the leading space.
    span: Option<Regex>,
}

impl AttributePattern {
    /// An attribute recognised wherever it appears.
    pub fn anywhere(attribute: &'static str) -> Self {
        let value = Regex::new(&format!(r#"\b{}="(.*?)""#, regex::escape(attribute)))
            .expect("Invalid attribute regex");
        Self {
            tag: None,
            attribute,
            local: false,
            value,
            span: None,
        }
    }

    /// An environment-local attribute anchored to `tag`, stripped on export.
    pub fn local(tag: &'static str, attribute: &'static str) -> Self {
        let tag_re = regex::escape(tag);
        let attr_re = regex::escape(attribute);
        let value = Regex::new(&format!(r#"<{tag_re}[^>]* {attr_re}="(.*?)""#))
            .expect("Invalid attribute regex");
        let span = Regex::new(&format!(r#"<{tag_re}[^>]*( {attr_re}=".*?")"#))
            .expect("Invalid attribute regex");
        Self {
            tag: Some(tag),
            attribute,
            local: true,
            value,
            span: Some(span),
        }
    }

    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    pub fn attribute(&self) -> &'static str {
        self.attribute
    }

    pub fn is_local(&self) -> bool {
        self.local
    }

    /// Display name such as `encounterLocation@order` or `drugNames`.
    pub fn name(&self) -> String {
        match self.tag() {
            Some(tag) => format!("{tag}@{}", self.attribute()),
            None => self.attribute().to_string(),
        }
    }

    /// Iterate over every raw attribute value in `markup`.
    pub fn values<'m>(&self, markup: &'m str) -> impl Iterator<Item = &'m str> {
        self.value
            .captures_iter(markup)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
    }

    /// Iterate over every comma-separated, trimmed, non-empty token of every value.
    pub fn tokens<'m>(&self, markup: &'m str) -> impl Iterator<Item = &'m str> {
        self.values(markup).flat_map(split_tokens)
    }

    /// The regex capturing the full attribute span, for local attributes only.
    pub(crate) fn span_regex(&self) -> Option<&Regex> {
        self.span.as_ref()
    }
}

/// Split an attribute value on commas, dropping blank tokens.
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
