//! Placeholder scanning for `{{ ... }}` template variables.
//!
//! Two syntaxes are recognised:
//!
//! - simple references such as `{{ name }}`, `{{user.name}}` or `{{ items[0] }}`
//! - call expressions such as `{{ search("rust", "serde") }}`, where the whole
//!   call text is the lookup key
//!
//! At most one whitespace character is tolerated on either side of the key.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::types::{ChatContent, ContentItem, Template};

const VARIABLE_KEY: &str = r"[a-zA-Z_0-9.\[\]]+";
const CALL_KEY: &str = r#"[a-zA-Z_\-0-9]+\([a-zA-Z_\-0-9,\s"]*\)"#;

static VARIABLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{\{{\s?({VARIABLE_KEY})\s?\}}\}}")).expect("valid variable pattern")
});

static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{\{{\s?({CALL_KEY})\s?\}}\}}")).expect("valid call pattern")
});

static ANY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\{{\{{\s?({VARIABLE_KEY}|{CALL_KEY})\s?\}}\}}"))
        .expect("valid placeholder pattern")
});

/// Collect every placeholder key in `template`.
///
/// Simple variables come first, then call expressions. Duplicates are kept.
pub fn scan_placeholders(template: &str) -> Vec<String> {
    let variables = VARIABLE_PATTERN
        .captures_iter(template)
        .map(|caps| caps[1].to_string());
    let calls = CALL_PATTERN
        .captures_iter(template)
        .map(|caps| caps[1].to_string());

    variables.chain(calls).collect()
}

/// Distinct placeholder keys of `template`, sorted ascending.
pub fn template_variables(template: &str) -> Vec<String> {
    scan_placeholders(template)
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Replace each placeholder in a single pass.
///
/// `resolve` returns the replacement for a key, or `None` to leave the
/// placeholder as written. Replacement text is never rescanned.
pub(crate) fn substitute<'t, F>(template: &'t str, mut resolve: F) -> Cow<'t, str>
where
    F: FnMut(&str) -> Option<String>,
{
    ANY_PATTERN.replace_all(template, |caps: &Captures<'_>| {
        resolve(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    })
}

impl Template {
    /// Distinct placeholder keys across every text segment, sorted ascending.
    ///
    /// Non-text items and [`Template::Other`] contribute nothing.
    pub fn variables(&self) -> Vec<String> {
        let mut texts: Vec<&str> = Vec::new();
        match self {
            Template::String(text) => texts.push(text),
            Template::Chat(messages) => {
                for content in messages.iter().filter_map(|m| m.content.as_ref()) {
                    match content {
                        ChatContent::Text(text) => texts.push(text),
                        ChatContent::Items(items) => {
                            texts.extend(items.iter().filter_map(|item| match item {
                                ContentItem::Text { text } => Some(text.as_str()),
                                ContentItem::ImageUrl { .. } | ContentItem::Other(_) => None,
                            }))
                        }
                    }
                }
            }
            Template::Other(_) => {}
        }

        texts
            .into_iter()
            .flat_map(scan_placeholders)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_simple_variables() {
        let keys = scan_placeholders("Hello {{name}}, from {{ user.city }} and {{items[0]}}");
        assert_eq!(keys, vec!["name", "user.city", "items[0]"]);
    }

    #[test]
    fn test_scan_keeps_duplicates_in_pass_order() {
        let keys = scan_placeholders(r#"{{ fetch("a", "b") }} {{x}} {{x}}"#);
        assert_eq!(keys, vec!["x", "x", r#"fetch("a", "b")"#]);
    }

    #[test]
    fn test_scan_ignores_wide_padding() {
        // Only a single whitespace character is allowed inside the braces.
        assert!(scan_placeholders("{{  name  }}").is_empty());
        assert!(scan_placeholders("{ {name} }").is_empty());
        assert_eq!(scan_placeholders("{{\tname\n}}"), vec!["name"]);
    }

    #[test]
    fn test_scan_rejects_invalid_keys() {
        assert!(scan_placeholders("{{ first name }}").is_empty());
        assert!(scan_placeholders("{{ name! }}").is_empty());
        assert!(scan_placeholders("{{}}").is_empty());
    }

    #[test]
    fn test_call_expression_with_empty_arguments() {
        assert_eq!(scan_placeholders("{{ now() }}"), vec!["now()"]);
    }

    #[test]
    fn test_template_variables_sorted_and_distinct() {
        let variables = template_variables("{{b}} {{a}} {{ b }} {{c}}");
        assert_eq!(variables, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chat_template_variables() {
        use crate::core::types::ChatMessage;

        let template = Template::Chat(vec![
            ChatMessage::system("You are {{persona}}"),
            ChatMessage::user(vec![
                ContentItem::text("{{question}} about {{persona}}"),
                ContentItem::image_url("https://example.com/{{ignored}}.png"),
            ]),
        ]);

        assert_eq!(template.variables(), vec!["persona", "question"]);
    }

    #[test]
    fn test_substitute_leaves_unresolved_placeholders() {
        let result = substitute("{{a}} and {{ b }}", |key| {
            (key == "a").then(|| "1".to_string())
        });
        assert_eq!(result, "1 and {{ b }}");
    }

    #[test]
    fn test_substitute_single_pass() {
        let result = substitute("{{a}}", |key| match key {
            "a" => Some("{{b}}".to_string()),
            _ => Some("never".to_string()),
        });
        assert_eq!(result, "{{b}}");
    }
}
