//! Shared types used across Stepscribe modules
//!
//! Contains the step data model produced by the parser and consumed by the
//! script generator.

use serde::{Deserialize, Serialize};

/// Title used when a recording carries no title of its own
pub const UNTITLED_TEST: &str = "Untitled Test";

/// Classified category of a recorded step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    /// Navigate to a URL
    #[serde(alias = "navigate")]
    Goto,
    /// Click an element
    Click,
    /// Type text into a field
    #[serde(alias = "type")]
    Fill,
    /// Upload a file
    Upload,
    /// Pause for a number of milliseconds
    Wait,
    /// Assert an element's state
    Assert,
    /// Check that something is shown on the page
    View,
    /// Anything the classifier did not recognize
    #[default]
    #[serde(other)]
    Unknown,
}

impl ActionType {
    /// Lower-case name used in serialized test cases
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Goto => "goto",
            ActionType::Click => "click",
            ActionType::Fill => "fill",
            ActionType::Upload => "upload",
            ActionType::Wait => "wait",
            ActionType::Assert => "assert",
            ActionType::View => "view",
            ActionType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based position in the recording
    pub number: usize,
    /// Step text with any ordinal prefix removed
    #[serde(default)]
    pub description: String,
    /// Classified action
    #[serde(default)]
    pub action: ActionType,
    /// Locator for the target element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// URL, typed text or expected text, depending on the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Screenshot taken by the recorder for this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_url: Option<String>,
}

impl Step {
    /// Create a step with no selector, value or screenshot
    pub fn new(number: usize, description: impl Into<String>, action: ActionType) -> Self {
        Self {
            number,
            description: description.into(),
            action,
            selector: None,
            value: None,
            screenshot_url: None,
        }
    }

    /// Set the selector
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Selector, if present and non-blank
    pub fn selector(&self) -> Option<&str> {
        non_blank(self.selector.as_deref())
    }

    /// Value, if present and non-blank
    pub fn value(&self) -> Option<&str> {
        non_blank(self.value.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// A parsed recording: a title and its ordered steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Recording title
    pub title: String,
    /// Free-text description, rendered into the generated script header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered steps
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl TestCase {
    /// Create a test case with the given title and steps
    pub fn new(title: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            title: title.into(),
            description: None,
            steps,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for TestCase {
    fn default() -> Self {
        Self::new(UNTITLED_TEST, Vec::new())
    }
}

/// Output of the action classifier for a single phrase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    /// Resolved action
    pub action: ActionType,
    /// Raw selector hint; a locator or a target phrase
    pub selector: Option<String>,
    /// Value hint
    pub value: Option<String>,
}

impl Classification {
    /// Classification with only an action type
    pub fn of(action: ActionType) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    /// Set the selector hint
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the value hint
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Structural defects found in a test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// True when `errors` is empty
    pub is_valid: bool,
    /// Human-readable defects, in discovery order
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Build a report from collected errors
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}
