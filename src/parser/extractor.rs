//! Step extractor
//!
//! Turns the ordered step blocks of a recording into typed steps. Typing
//! steps in Scribe exports never name their field; they inherit the locator
//! of the most recent click on a field, carried through an explicit fold.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{ActionType, Step};
use crate::parser::action::classify;
use crate::parser::selector::{optimize, resolve};

static ORDINAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal pattern must compile"));

/// One recorded unit as segmented out of the markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepBlock {
    /// Raw step text, possibly prefixed with "<n>. "
    pub text: String,
    /// Screenshot found in the node right after the step
    pub screenshot_url: Option<String>,
}

impl StepBlock {
    /// Create a block without a screenshot
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            screenshot_url: None,
        }
    }

    /// Attach a screenshot URL
    pub fn with_screenshot(mut self, url: impl Into<String>) -> Self {
        self.screenshot_url = Some(url.into());
        self
    }
}

/// Accumulator threaded through the extraction fold
#[derive(Debug, Default)]
struct Extraction {
    steps: Vec<Step>,
    last_field_click: Option<String>,
}

impl Extraction {
    fn push(mut self, number: usize, block: StepBlock) -> Self {
        let description = clean_step_text(&block.text);
        let classification = classify(&description);
        let action = classification.action;

        let selector = classification
            .selector
            .map(|hint| optimize(&resolve(action, &hint), action))
            .filter(|s| !s.is_empty());

        if action == ActionType::Click {
            if let Some(selector) = &selector {
                if mentions_field(selector) || mentions_field(&description) {
                    self.last_field_click = Some(selector.clone());
                }
            }
        }

        let selector = match (action, selector) {
            (ActionType::Fill, None) => self.last_field_click.clone(),
            (_, selector) => selector,
        };

        tracing::debug!(
            number,
            action = %action,
            selector = selector.as_deref().unwrap_or(""),
            "extracted step"
        );

        self.steps.push(Step {
            number,
            description,
            action,
            selector,
            value: classification.value,
            screenshot_url: block.screenshot_url,
        });
        self
    }
}

fn mentions_field(text: &str) -> bool {
    text.to_lowercase().contains("field")
}

/// Collapse whitespace runs and strip a leading "<n>. " ordinal
pub fn clean_step_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    ORDINAL_PREFIX.replace(&collapsed, "").into_owned()
}

/// Extract typed steps from step blocks, preserving order. Step numbers are
/// 1-based positions.
pub fn extract<I>(blocks: I) -> Vec<Step>
where
    I: IntoIterator<Item = StepBlock>,
{
    blocks
        .into_iter()
        .enumerate()
        .fold(Extraction::default(), |acc, (index, block)| {
            acc.push(index + 1, block)
        })
        .steps
}
