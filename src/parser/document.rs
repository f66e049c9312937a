//! Recording markup parser
//!
//! Locates the title and the step blocks of a Scribe HTML export and hands
//! the blocks to the step extractor. Malformed markup degrades to a default
//! title and fewer steps; it never fails.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::core::{ParserConfig, Result, StepscribeError, TestCase, UNTITLED_TEST};
use crate::parser::extractor::{extract, StepBlock};

/// Parser with its markup selectors compiled
#[derive(Debug, Clone)]
pub struct MarkupParser {
    title: Selector,
    step: Selector,
    step_text: Selector,
    screenshot_container: Selector,
    screenshot: Selector,
}

static DEFAULT_PARSER: Lazy<MarkupParser> = Lazy::new(|| {
    MarkupParser::new(&ParserConfig::default()).expect("default markup selectors must compile")
});

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| StepscribeError::selector(format!("'{}': {}", css, e)))
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl MarkupParser {
    /// Compile the configured selectors
    pub fn new(config: &ParserConfig) -> Result<Self> {
        Ok(Self {
            title: compile(&config.title_selector)?,
            step: compile(&config.step_selector)?,
            step_text: compile(&config.step_text_selector)?,
            screenshot_container: compile(&config.screenshot_container_selector)?,
            screenshot: compile(&config.screenshot_selector)?,
        })
    }

    /// Parse recording markup into a test case
    pub fn parse(&self, markup: &str) -> TestCase {
        let document = Html::parse_document(markup);
        let title = self.title(&document);
        let blocks = self.step_blocks(&document);
        tracing::debug!(title = %title, steps = blocks.len(), "parsed recording markup");
        TestCase::new(title, extract(blocks))
    }

    fn title(&self, document: &Html) -> String {
        document
            .select(&self.title)
            .next()
            .map(collapsed_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_TEST.to_string())
    }

    fn step_blocks(&self, document: &Html) -> Vec<StepBlock> {
        document
            .select(&self.step)
            .map(|step| StepBlock {
                text: step
                    .select(&self.step_text)
                    .next()
                    .map(collapsed_text)
                    .unwrap_or_default(),
                screenshot_url: self.screenshot_after(step),
            })
            .collect()
    }

    /// Image source inside the element directly following `step`, if that
    /// element is a screenshot container
    fn screenshot_after(&self, step: ElementRef<'_>) -> Option<String> {
        let sibling = step.next_siblings().find_map(ElementRef::wrap)?;
        if !self.screenshot_container.matches(&sibling) {
            return None;
        }
        sibling
            .select(&self.screenshot)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string)
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}

/// Parse recording markup using the default Scribe selectors
pub fn parse(markup: &str) -> TestCase {
    DEFAULT_PARSER.parse(markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionType;

    const RECORDING: &str = r#"
        <html><body>
          <h1 class="scribe-title">  Update   profile </h1>
          <div class="scribe-step"><span class="scribe-step-text">1. Navigate to https://example.com/profile</span></div>
          <div class="scribe-screenshot-container">
            <img class="scribe-screenshot" src="https://cdn.example.com/shots/1.jpeg">
          </div>
          <div class="scribe-step"><span class="scribe-step-text">2. Click this text field.</span></div>
          <p>unrelated</p>
          <div class="scribe-screenshot-container">
            <img class="scribe-screenshot" src="https://cdn.example.com/shots/2.jpeg">
          </div>
          <div class="scribe-step"><span class="scribe-step-text">3. Type "Ada"</span></div>
        </body></html>
    "#;

    #[test]
    fn test_parse_recording() {
        let case = parse(RECORDING);
        assert_eq!(case.title, "Update profile");
        assert_eq!(case.steps.len(), 3);
        assert_eq!(case.steps[0].action, ActionType::Goto);
        assert_eq!(
            case.steps[0].screenshot_url.as_deref(),
            Some("https://cdn.example.com/shots/1.jpeg")
        );
        // The container is not the step's next sibling
        assert_eq!(case.steps[1].screenshot_url, None);
        assert_eq!(case.steps[2].selector.as_deref(), Some(r#"input[type="text"]"#));
    }

    #[test]
    fn test_missing_title_uses_sentinel() {
        let case = parse(r#"<div class="scribe-step"><span class="scribe-step-text">View home</span></div>"#);
        assert_eq!(case.title, UNTITLED_TEST);
        assert_eq!(case.steps.len(), 1);

        let case = parse(r#"<h1 class="scribe-title">   </h1>"#);
        assert_eq!(case.title, UNTITLED_TEST);
    }

    #[test]
    fn test_malformed_markup_degrades() {
        let case = parse("<div class=\"scribe-step\"><span class=\"scribe-step-text\">Click \"Save\"");
        assert_eq!(case.steps.len(), 1);
        assert_eq!(case.steps[0].action, ActionType::Click);

        let case = parse("not markup at all");
        assert_eq!(case, TestCase::default());
    }

    #[test]
    fn test_step_without_text() {
        let case = parse(r#"<div class="scribe-step"></div>"#);
        assert_eq!(case.steps.len(), 1);
        assert_eq!(case.steps[0].description, "");
        assert_eq!(case.steps[0].action, ActionType::Unknown);
    }

    #[test]
    fn test_custom_selectors() {
        let config = ParserConfig {
            title_selector: "h2".to_string(),
            step_selector: "li.step".to_string(),
            step_text_selector: "p".to_string(),
            ..ParserConfig::default()
        };
        let parser = MarkupParser::new(&config).unwrap();
        let case = parser.parse("<h2>Checkout</h2><ol><li class=\"step\"><p>View cart</p></li></ol>");
        assert_eq!(case.title, "Checkout");
        assert_eq!(case.steps[0].value.as_deref(), Some("cart"));
    }

    #[test]
    fn test_invalid_selector() {
        let config = ParserConfig {
            step_selector: "[[".to_string(),
            ..ParserConfig::default()
        };
        let err = MarkupParser::new(&config).unwrap_err();
        assert!(matches!(err, StepscribeError::Selector(_)));
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(RECORDING), parse(RECORDING));
    }
}
