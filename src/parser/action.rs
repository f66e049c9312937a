//! Action classifier
//!
//! Maps a short recorder phrase ("Click this text field.") to an action type
//! plus raw selector/value hints. Rules are tried top-down and the first
//! match wins. The order matters: "Type" must be tried before "Click" so the
//! typing step after a field click is not mistaken for another click. Verbs
//! may appear inside a word, so "Review" classifies like "View".

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::{ActionType, Classification};

/// A single classification rule
struct Rule {
    /// Rule name, used in traces and tests
    name: &'static str,
    /// Case-insensitive phrase pattern
    pattern: Regex,
    /// Builds the classification from the pattern's captures
    handler: fn(&Captures<'_>) -> Classification,
}

impl Rule {
    fn new(
        name: &'static str,
        pattern: &str,
        handler: fn(&Captures<'_>) -> Classification,
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("classifier pattern must compile"),
            handler,
        }
    }
}

/// Classification rules, highest priority first
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "navigate",
            r#"(?i)navigate to\s+["']?([^"'\s]+)["']?"#,
            navigate,
        ),
        Rule::new("type", r#"(?i)type\s+["']([^"']+)["']"#, type_text),
        Rule::new(
            "click",
            r"(?i)click\s+(?:the\s+|this\s+)?(.+?)(?:\s*\.|$)",
            click,
        ),
        Rule::new(
            "upload",
            r"(?i)upload\s+(?:the\s+)?(.+?)(?:\s+(?:file|spreadsheet))?\s*\.?\s*$",
            upload,
        ),
        Rule::new(
            "confirm",
            r"(?i)confirm\s+(?:the\s+)?(.+?)\s*\.?\s*$",
            confirm,
        ),
        Rule::new("view", r"(?i)view\s+(.+)", view),
    ]
});

/// Field kinds a click target can name
static FIELD_KIND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(text|password|email|number)\s+field").expect("field pattern must compile")
});

/// Classify a step phrase. Never fails: unmatched phrases are `Unknown`.
pub fn classify(text: &str) -> Classification {
    let text = text.trim();
    for rule in RULES.iter() {
        if let Some(caps) = rule.pattern.captures(text) {
            let classification = (rule.handler)(&caps);
            tracing::trace!(rule = rule.name, action = %classification.action, "classified step");
            return classification;
        }
    }
    tracing::trace!(text, "no classification rule matched");
    Classification::of(ActionType::Unknown)
}

/// Rule names in evaluation order
pub fn rule_names() -> Vec<&'static str> {
    RULES.iter().map(|r| r.name).collect()
}

/// Text of capture group 1
fn target<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1).map(|m| m.as_str().trim()).unwrap_or("")
}

const QUOTES: &[char] = &['"', '\''];

/// Remove one leading and one trailing quote character
pub(crate) fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix(QUOTES).unwrap_or(s);
    s.strip_suffix(QUOTES).unwrap_or(s)
}

fn strip_period(s: &str) -> &str {
    s.strip_suffix('.').unwrap_or(s).trim_end()
}

fn navigate(caps: &Captures<'_>) -> Classification {
    Classification::of(ActionType::Goto).value(strip_period(target(caps)))
}

fn type_text(caps: &Captures<'_>) -> Classification {
    // The field is whatever was clicked last; the extractor fills it in.
    Classification::of(ActionType::Fill).value(target(caps))
}

fn click(caps: &Captures<'_>) -> Classification {
    let target = target(caps);
    let selector = match FIELD_KIND.captures(target) {
        Some(kind) => format!(r#"input[type="{}"]"#, kind[1].to_lowercase()),
        None => strip_quotes(target).to_string(),
    };
    Classification::of(ActionType::Click).selector(selector)
}

fn upload(caps: &Captures<'_>) -> Classification {
    Classification::of(ActionType::Upload)
        .selector(r#"input[type="file"]"#)
        .value(strip_quotes(target(caps)))
}

fn confirm(caps: &Captures<'_>) -> Classification {
    Classification::of(ActionType::Click).selector(strip_quotes(target(caps)))
}

fn view(caps: &Captures<'_>) -> Classification {
    Classification::of(ActionType::View).value(strip_quotes(strip_period(target(caps))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(c: &Classification) -> &str {
        c.selector.as_deref().unwrap_or("")
    }

    fn val(c: &Classification) -> &str {
        c.value.as_deref().unwrap_or("")
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            rule_names(),
            vec!["navigate", "type", "click", "upload", "confirm", "view"]
        );
    }

    #[test]
    fn test_navigate() {
        let c = classify("Navigate to https://example.com/login");
        assert_eq!(c.action, ActionType::Goto);
        assert_eq!(val(&c), "https://example.com/login");
        assert!(c.selector.is_none());

        let c = classify("navigate to 'https://example.com'.");
        assert_eq!(val(&c), "https://example.com");
    }

    #[test]
    fn test_type_has_no_selector() {
        let c = classify("Type \"testuser\"");
        assert_eq!(c.action, ActionType::Fill);
        assert_eq!(val(&c), "testuser");
        assert!(c.selector.is_none());

        let c = classify("TYPE 'secret'");
        assert_eq!(c.action, ActionType::Fill);
        assert_eq!(val(&c), "secret");
    }

    #[test]
    fn test_click_field_kinds() {
        assert_eq!(sel(&classify("Click this text field.")), r#"input[type="text"]"#);
        assert_eq!(
            sel(&classify("Click the password field")),
            r#"input[type="password"]"#
        );
        assert_eq!(sel(&classify("click this Email field.")), r#"input[type="email"]"#);
        assert_eq!(
            sel(&classify("Click the number field.")),
            r#"input[type="number"]"#
        );
    }

    #[test]
    fn test_click_strips_quotes() {
        let c = classify("Click \"Log in\"");
        assert_eq!(c.action, ActionType::Click);
        assert_eq!(sel(&c), "Log in");
    }

    #[test]
    fn test_type_beats_click() {
        // A phrase carrying both verbs is a typing step
        let c = classify("Click the field and type \"hello\"");
        assert_eq!(c.action, ActionType::Fill);
        assert_eq!(val(&c), "hello");
    }

    #[test]
    fn test_upload() {
        let c = classify("Upload the report.csv file");
        assert_eq!(c.action, ActionType::Upload);
        assert_eq!(sel(&c), r#"input[type="file"]"#);
        assert_eq!(val(&c), "report.csv");

        let c = classify("Upload \"Budget 2024\" spreadsheet.");
        assert_eq!(val(&c), "Budget 2024");
    }

    #[test]
    fn test_confirm_is_click() {
        let c = classify("Confirm the deletion.");
        assert_eq!(c.action, ActionType::Click);
        assert_eq!(sel(&c), "deletion");
    }

    #[test]
    fn test_confirm_field_resolved_by_priority() {
        let c = classify("Confirm the password field");
        assert_eq!(c.action, ActionType::Click);
        assert_eq!(sel(&c), "password field");
    }

    #[test]
    fn test_view() {
        let c = classify("View dashboard");
        assert_eq!(c.action, ActionType::View);
        assert_eq!(val(&c), "dashboard");
        assert_eq!(val(&classify("View the settings page.")), "the settings page");
    }

    #[test]
    fn test_verbs_match_inside_words() {
        let c = classify("Review the order summary");
        assert_eq!(c.action, ActionType::View);
        assert_eq!(val(&c), "the order summary");
        assert_eq!(classify("Preview the invoice").action, ActionType::View);

        let c = classify("Retype \"abc\"");
        assert_eq!(c.action, ActionType::Fill);
        assert_eq!(val(&c), "abc");

        let c = classify("Reupload the avatar.png file");
        assert_eq!(c.action, ActionType::Upload);
        assert_eq!(val(&c), "avatar.png");
    }

    #[test]
    fn test_unknown() {
        let c = classify("Scroll down a bit");
        assert_eq!(c, Classification::of(ActionType::Unknown));
        assert_eq!(classify(""), Classification::of(ActionType::Unknown));
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"Log in\""), "Log in");
        assert_eq!(strip_quotes("'Save"), "Save");
        assert_eq!(strip_quotes("Plain"), "Plain");
    }
}
