//! Removal of environment-local attributes before export.
//!
//! Provider defaults and roles, and location defaults and orders, name
//! objects that only exist in the originating environment. When the
//! matching inclusion flag is off they are cut out of the markup. Only the
//! exact ` attribute="value"` span is removed; the rest of the tag stays
//! byte-for-byte identical.

use std::borrow::Cow;

use formshare_model::InclusionFlags;
use regex::Regex;
use tracing::debug;

use crate::patterns::{AttributePattern, LOCATION_PATTERNS, PROVIDER_PATTERNS};

/// Strip the local attributes excluded by `flags`.
///
/// Provider rules run first, then location rules; each rule sees the output
/// of the previous one.
pub fn strip_local_attributes(markup: &str, flags: InclusionFlags) -> String {
    let mut rules: Vec<&AttributePattern> = Vec::new();
    if !flags.providers {
        rules.extend(PROVIDER_PATTERNS.iter());
    }
    if !flags.locations {
        rules.extend(LOCATION_PATTERNS.iter());
    }

    let mut current = markup.to_string();
    for rule in rules {
        let Some(regex) = rule.span_regex() else {
            continue;
        };
        if let Cow::Owned(stripped) = excise_first_group(&current, regex) {
            debug!(
                rule = %rule.name(),
                removed_bytes = current.len() - stripped.len(),
                "stripped local attribute"
            );
            current = stripped;
        }
    }
    current
}

/// Rewrite `text` with capture group 1 of every non-overlapping match removed.
///
/// For each match the text up to the start of the group is kept, the group
/// is skipped and scanning resumes after the match. Returns the input
/// unchanged (borrowed) when nothing matches.
pub fn excise_first_group<'t>(text: &'t str, regex: &Regex) -> Cow<'t, str> {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut matched = false;

    for caps in regex.captures_iter(text) {
        let Some(group) = caps.get(1) else {
            continue;
        };
        matched = true;
        output.push_str(&text[cursor..group.start()]);
        cursor = caps.get(0).map_or(group.end(), |whole| whole.end());
    }

    if !matched {
        return Cow::Borrowed(text);
    }
    output.push_str(&text[cursor..]);
    Cow::Owned(output)
}
