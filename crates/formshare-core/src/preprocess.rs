//! Macro and template expansion ahead of dependency scanning.
//!
//! Scanners must see the markup as it will actually render: a concept
//! referenced only through `$weight` or a `{concept}` placeholder is still a
//! dependency. Expansion always works on a throwaway copy; the shared
//! markup keeps its macros and templates.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::PreprocessError;

static MACROS_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<macros\s*>").expect("Invalid macros regex"));

static MACROS_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</macros\s*>").expect("Invalid macros regex"));

static REPEAT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<repeat\b[^>]*>").expect("Invalid repeat regex"));

static REPEAT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</repeat\s*>").expect("Invalid repeat regex"));

static TEMPLATE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<template\b[^>]*>(.*?)</template\s*>").expect("Invalid template regex")
});

static RENDER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<render\b([^>]*?)/?>").expect("Invalid render regex"));

static TAG_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_][\w.:-]*)="(.*?)""#).expect("Invalid attribute regex")
});

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][\w.:-]*)\}").expect("Invalid placeholder regex"));

/// Expands macros and templates in form markup.
pub trait MarkupPreprocessor: Send + Sync {
    fn expand_macros(&self, markup: &str) -> Result<String, PreprocessError>;

    fn expand_templates(&self, markup: &str) -> Result<String, PreprocessError>;

    /// Macros first, then templates.
    fn expand(&self, markup: &str) -> Result<String, PreprocessError> {
        let with_macros = self.expand_macros(markup)?;
        self.expand_templates(&with_macros)
    }
}

/// Returns markup unchanged. For markup known to be fully expanded.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPreprocessor;

impl MarkupPreprocessor for IdentityPreprocessor {
    fn expand_macros(&self, markup: &str) -> Result<String, PreprocessError> {
        Ok(markup.to_string())
    }

    fn expand_templates(&self, markup: &str) -> Result<String, PreprocessError> {
        Ok(markup.to_string())
    }
}

/// Regex-based expansion of `<macros>` and `<repeat>` blocks.
///
/// ```text
/// <macros>
///   weight=5089AAAAAAAAAAAAAAAAAAAAAAAAAAAA
/// </macros>
/// <obs conceptId="$weight"/>
///
/// <repeat>
///   <template><obs conceptId="{concept}"/></template>
///   <render concept="CIEL:5089"/>
///   <render concept="CIEL:5090"/>
/// </repeat>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardPreprocessor;

impl MarkupPreprocessor for StandardPreprocessor {
    fn expand_macros(&self, markup: &str) -> Result<String, PreprocessError> {
        let opens: Vec<_> = MACROS_OPEN.find_iter(markup).collect();
        let open = match opens.as_slice() {
            [] => return Ok(markup.to_string()),
            [open] => *open,
            _ => return Err(PreprocessError::DuplicateMacros { count: opens.len() }),
        };
        let close = MACROS_CLOSE
            .find_at(markup, open.end())
            .ok_or(PreprocessError::UnterminatedMacros)?;

        let macros = parse_macro_definitions(&markup[open.end()..close.start()])?;
        let without_block = format!("{}{}", &markup[..open.start()], &markup[close.end()..]);
        Ok(substitute_macros(&without_block, &macros))
    }

    fn expand_templates(&self, markup: &str) -> Result<String, PreprocessError> {
        let mut output = String::with_capacity(markup.len());
        let mut cursor = 0;
        while let Some(open) = REPEAT_OPEN.find_at(markup, cursor) {
            let close = REPEAT_CLOSE
                .find_at(markup, open.end())
                .ok_or(PreprocessError::UnterminatedRepeat)?;
            output.push_str(&markup[cursor..open.start()]);
            output.push_str(&render_repeat(&markup[open.end()..close.start()])?);
            cursor = close.end();
        }
        output.push_str(&markup[cursor..]);
        Ok(output)
    }
}

fn parse_macro_definitions(body: &str) -> Result<HashMap<String, String>, PreprocessError> {
    let mut macros = HashMap::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let malformed = || PreprocessError::MalformedMacro {
            line: line.to_string(),
        };
        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }
        macros.insert(key.to_string(), value.trim().to_string());
    }
    Ok(macros)
}

/// Replace every `$key` in one pass, preferring the longest key at each spot.
///
/// Substituted values are not scanned again. A `$` that starts no known key
/// is kept as is.
fn substitute_macros(markup: &str, macros: &HashMap<String, String>) -> String {
    if macros.is_empty() {
        return markup.to_string();
    }
    let mut keys: Vec<(&str, &str)> = macros
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let mut output = String::with_capacity(markup.len());
    let mut rest = markup;
    while let Some(dollar) = rest.find('$') {
        output.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];
        match keys.iter().find(|(key, _)| after.starts_with(key)) {
            Some((key, value)) => {
                output.push_str(value);
                rest = &after[key.len()..];
            }
            None => {
                output.push('$');
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

fn render_repeat(body: &str) -> Result<String, PreprocessError> {
    let templates: Vec<&str> = TEMPLATE_BLOCK
        .captures_iter(body)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    let template = match templates.as_slice() {
        [] => return Err(PreprocessError::MissingTemplate),
        [template] => *template,
        _ => {
            return Err(PreprocessError::MultipleTemplates {
                count: templates.len(),
            });
        }
    };

    let mut output = String::new();
    for render in RENDER_TAG.captures_iter(body) {
        let attributes: HashMap<&str, &str> = render
            .get(1)
            .map(|attrs| {
                TAG_ATTRIBUTE
                    .captures_iter(attrs.as_str())
                    .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
                    .collect()
            })
            .unwrap_or_default();
        let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
            attributes
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), |value| (*value).to_string())
        });
        output.push_str(&rendered);
    }
    Ok(output)
}
