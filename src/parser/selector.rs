//! Selector builder
//!
//! Turns a target phrase from a recorded step into a Playwright locator and
//! tidies locators for robustness.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::ActionType;

/// Field kinds recognized in click targets, in lookup order
const FIELD_KINDS: [&str; 4] = ["text", "password", "email", "number"];

/// Input types recognized in fill labels, in lookup order
const FILL_KINDS: [&str; 3] = ["password", "email", "number"];

/// Words that mark a click target as a button
static BUTTON_VERBS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:confirm|submit|save|cancel|ok|yes|no|log\s*in)\b")
        .expect("button pattern must compile")
});

/// Word directly before "field"
static FIELD_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)\s+field").expect("field pattern must compile"));

/// Strings that are already locators rather than target phrases. A tag
/// name only counts with an attribute, pseudo-class, class or id attached,
/// and a bare `#id`/`.class` only as a single token.
static LOCATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:input|button|a|textarea|select|form|img|label|div|span)[\[:.#]|\[|[#.][\w-]+(?:[#.][\w-]+)*$|text=)",
    )
    .expect("locator pattern must compile")
});

/// Build a locator for `target` suited to `action`
pub fn build(action: ActionType, target: &str) -> String {
    let clean: String = target
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();
    if clean.is_empty() {
        return String::new();
    }

    match action {
        ActionType::Click => click_selector(&clean),
        ActionType::Fill => input_selector(&clean),
        ActionType::Upload => r#"input[type="file"]"#.to_string(),
        _ => format!(r#"text="{}""#, clean),
    }
}

fn click_selector(text: &str) -> String {
    let lower = text.to_lowercase();

    if let Some(kind) = FIELD_KINDS
        .iter()
        .find(|kind| lower.contains(&format!("{} field", kind)))
    {
        return format!(r#"input[type="{}"]"#, kind);
    }

    if lower.contains("button") || BUTTON_VERBS.is_match(text) {
        return format!(r#"button:has-text("{}")"#, text);
    }

    if is_web_url(text) || lower.contains("link") {
        return format!(r#"a:has-text("{}")"#, text);
    }

    if lower.contains("field") {
        return match FIELD_WORD.captures(&lower) {
            Some(caps) => format!(r#"input[type="{}"]"#, &caps[1]),
            None => "input, textarea, select".to_string(),
        };
    }

    format!(r#"text="{}""#, text)
}

fn input_selector(label: &str) -> String {
    let lower = label.to_lowercase();

    if let Some(kind) = FILL_KINDS.iter().find(|kind| lower.contains(*kind)) {
        return format!(r#"input[type="{}"]"#, kind);
    }

    format!(
        r#"[aria-label="{0}"], input[placeholder="{0}"], textarea[placeholder="{0}"], input[type="text"]"#,
        label
    )
}

fn is_web_url(text: &str) -> bool {
    url::Url::parse(text)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Tidy a locator: trim it, drop a trailing period, and widen button
/// locators on clicks to also match the nested button. Unrecognized
/// locators are returned unchanged.
pub fn optimize(selector: &str, action: ActionType) -> String {
    let trimmed = selector.trim();
    let selector = trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end();
    if selector.is_empty() {
        return String::new();
    }

    match action {
        ActionType::Click if selector.starts_with("button") => {
            format!("{0}, button:has({0})", selector)
        }
        _ => selector.to_string(),
    }
}

/// Whether `hint` is already a locator expression
pub fn looks_like_locator(hint: &str) -> bool {
    LOCATOR.is_match(hint.trim())
}

/// Keep `hint` if it is already a locator, otherwise build one from it
pub fn resolve(action: ActionType, hint: &str) -> String {
    if looks_like_locator(hint) {
        hint.trim().to_string()
    } else {
        build(action, hint)
    }
}
