//! Placeholder handling for template bodies.
//!
//! A placeholder is `[slot]` or `【slot】` on a single line. Rendering replaces the
//! slots whose key is supplied and reports the rest as unresolved.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]\n]+)\]|【([^【】\n]+)】").expect("placeholder pattern must compile")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub content: String,
    pub unresolved: Vec<String>,
}

fn slot<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

/// Distinct placeholder keys in order of first appearance.
pub fn placeholders(body: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for caps in PLACEHOLDER.captures_iter(body) {
        let key = slot(&caps).trim().to_string();
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

/// Substitutes supplied values. Keys are matched after trimming; unknown keys are ignored.
pub fn render(body: &str, values: &HashMap<String, String>) -> Rendered {
    let mut unresolved: Vec<String> = Vec::new();

    let content = PLACEHOLDER.replace_all(body, |caps: &Captures| {
        let key = slot(caps).trim();
        match values.get(key) {
            Some(value) => value.clone(),
            None => {
                if !unresolved.iter().any(|k| k == key) {
                    unresolved.push(key.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    Rendered {
        content: content.into_owned(),
        unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_placeholders_deduplicated_in_order() {
        let body = "[a] then 【b】 then [a] and [ c ]";
        assert_eq!(placeholders(body), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_placeholders_do_not_span_lines() {
        assert!(placeholders("[open\nclose]").is_empty());
    }

    #[test]
    fn test_render_substitutes_and_reports_unresolved() {
        let body = "You are a [field] expert. Task: [task]. Format: [format]. Again: [task]";
        let out = render(body, &values(&[("field", "tax"), ("task", "audit")]));
        assert_eq!(
            out.content,
            "You are a tax expert. Task: audit. Format: [format]. Again: audit"
        );
        assert_eq!(out.unresolved, vec!["format"]);
    }

    #[test]
    fn test_render_full_width_brackets() {
        let out = render("分析【主题】", &values(&[("主题", "市场")]));
        assert_eq!(out.content, "分析市场");
        assert!(out.unresolved.is_empty());
    }

    #[test]
    fn test_render_ignores_unknown_keys() {
        let out = render("plain text", &values(&[("unused", "x")]));
        assert_eq!(out.content, "plain text");
        assert!(out.unresolved.is_empty());
    }
}
