//! Playwright script generation
//!
//! Renders a test case into a self-contained `@playwright/test` source file.
//! Pure: no I/O, no failures. A step that cannot be rendered becomes an
//! inert comment and the remaining steps are still emitted.

use crate::core::{ActionType, GeneratorConfig, Step, TestCase};
use crate::generator::escape::{escape_block_comment, escape_js};

/// Suffix and extension of generated test files
pub const SCRIPT_SUFFIX: &str = ".spec.js";

/// Slug used when a title has no usable characters
const FALLBACK_SLUG: &str = "untitled-test";

/// Timeout used for wait steps without a numeric value
const DEFAULT_WAIT_MS: u64 = 1000;

/// Base URL written into the Playwright config when none is configured
const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Options for script generation
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Page opened before the first step
    pub base_url: Option<String>,
    /// Capture a screenshot after every step
    pub screenshots: bool,
    /// Directory screenshots are saved to
    pub screenshot_dir: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            screenshots: false,
            screenshot_dir: "screenshots".to_string(),
        }
    }
}

impl From<&GeneratorConfig> for GenerateOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            screenshots: config.screenshots,
            screenshot_dir: config.screenshot_dir.clone(),
        }
    }
}

/// Render a test case as Playwright test source
pub fn generate(test_case: &TestCase, options: &GenerateOptions) -> String {
    let mut out = String::from("import { test, expect } from '@playwright/test';\n\n");

    out.push_str("/**\n");
    out.push_str(&format!(" * {}\n", escape_block_comment(&test_case.title)));
    if let Some(description) = test_case.description.as_deref() {
        for line in description.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!(" * {}\n", escape_block_comment(line.trim())));
        }
    }
    out.push_str(" */\n");
    out.push_str(&format!(
        "test('{}', async ({{ page }}) => {{\n",
        escape_js(&test_case.title)
    ));

    if let Some(base_url) = options.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        out.push_str("  // Test setup\n");
        out.push_str(&format!("  await page.goto('{}');\n", escape_js(base_url)));
        if !test_case.steps.is_empty() {
            out.push('\n');
        }
    }

    let blocks: Vec<String> = test_case
        .steps
        .iter()
        .map(|step| render_step(step, options))
        .collect();
    out.push_str(&blocks.join("\n"));

    out.push_str("});\n");
    out
}

/// Comment, statement and optional screenshot for one step
fn render_step(step: &Step, options: &GenerateOptions) -> String {
    let mut block = format!(
        "  // Step {}: {}\n  {}\n",
        step.number,
        escape_js(&step.description),
        statement(step)
    );
    if options.screenshots {
        block.push_str(&format!(
            "  await page.screenshot({{ path: '{}/step-{}.png' }});\n",
            escape_js(options.screenshot_dir.trim_end_matches('/')),
            step.number
        ));
    }
    block
}

/// The single statement a step maps to
pub fn statement(step: &Step) -> String {
    let description = escape_js(&step.description);
    match step.action {
        ActionType::Goto => match step.value() {
            Some(url) => format!("await page.goto('{}');", escape_js(url)),
            None => format!("// Missing URL for navigation: {}", description),
        },
        ActionType::Click => match step.selector() {
            Some(selector) => format!("await page.click('{}');", escape_js(selector)),
            None => format!("// Missing selector for click: {}", description),
        },
        ActionType::Fill => match step.selector() {
            Some(selector) => format!(
                "await page.fill('{}', '{}');",
                escape_js(selector),
                escape_js(step.value.as_deref().unwrap_or(""))
            ),
            None => format!("// Missing selector for fill: {}", description),
        },
        ActionType::Wait => format!(
            "await page.waitForTimeout({});",
            wait_ms(step.value.as_deref())
        ),
        ActionType::Assert | ActionType::View => {
            match (step.action, step.selector(), step.value()) {
                (_, Some(selector), Some(text)) => format!(
                    "await expect(page.locator('{}')).toHaveText('{}');",
                    escape_js(selector),
                    escape_js(text)
                ),
                (_, Some(selector), None) => format!(
                    "await expect(page.locator('{}')).toBeVisible();",
                    escape_js(selector)
                ),
                (ActionType::View, None, Some(text)) => format!(
                    "await expect(page.getByText('{}')).toBeVisible();",
                    escape_js(text)
                ),
                (ActionType::View, None, None) => {
                    format!("// Nothing to check for view: {}", description)
                }
                _ => format!("// Missing selector for assertion: {}", description),
            }
        }
        ActionType::Upload | ActionType::Unknown => {
            format!("// Unsupported action: {}", step.action)
        }
    }
}

/// Milliseconds from the leading digits of a wait value
fn wait_ms(value: Option<&str>) -> u64 {
    let digits: String = value
        .unwrap_or("")
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(DEFAULT_WAIT_MS)
}

/// Lower-case the title and join its `[a-z0-9]` runs with single hyphens
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut gap = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            gap = false;
        } else {
            gap = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Filesystem-safe test file name for a title
pub fn safe_filename(title: &str) -> String {
    format!("{}{}", slugify(title), SCRIPT_SUFFIX)
}

/// Render a `playwright.config.js` pointing at `test_dir`
pub fn playwright_config(test_dir: &str, base_url: Option<&str>) -> String {
    let base_url = base_url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or(DEFAULT_BASE_URL);
    format!(
        "// @ts-check\n\
         /** @type {{import('@playwright/test').PlaywrightTestConfig}} */\n\
         const config = {{\n\
         \x20 testDir: '{}',\n\
         \x20 timeout: 30000,\n\
         \x20 use: {{\n\
         \x20   baseURL: '{}',\n\
         \x20   headless: true,\n\
         \x20   screenshot: 'only-on-failure',\n\
         \x20 }},\n\
         }};\n\
         \n\
         module.exports = config;\n",
        escape_js(test_dir),
        escape_js(base_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TestCase {
        TestCase::new(
            "Login Test",
            vec![
                Step::new(1, "Navigate to login page", ActionType::Goto)
                    .with_value("https://example.com/login"),
                Step::new(2, "Enter username", ActionType::Fill)
                    .with_selector(r#"input[name="username"]"#)
                    .with_value("testuser"),
                Step::new(3, "Click login button", ActionType::Click)
                    .with_selector(r#"button[type="submit"]"#),
                Step::new(4, "Verify dashboard is visible", ActionType::View)
                    .with_value("Dashboard"),
            ],
        )
        .with_description("Test the login functionality")
    }

    #[test]
    fn test_generate_full_script() {
        let script = generate(&sample(), &GenerateOptions::default());
        let expected = r#"import { test, expect } from '@playwright/test';

/**
 * Login Test
 * Test the login functionality
 */
test('Login Test', async ({ page }) => {
  // Step 1: Navigate to login page
  await page.goto('https://example.com/login');

  // Step 2: Enter username
  await page.fill('input[name="username"]', 'testuser');

  // Step 3: Click login button
  await page.click('button[type="submit"]');

  // Step 4: Verify dashboard is visible
  await expect(page.getByText('Dashboard')).toBeVisible();
});
"#;
        assert_eq!(script, expected);
    }

    #[test]
    fn test_base_url_and_screenshots() {
        let options = GenerateOptions {
            base_url: Some("http://localhost:8080".to_string()),
            screenshots: true,
            screenshot_dir: "shots/".to_string(),
        };
        let script = generate(&sample(), &options);
        assert!(script.contains("  // Test setup\n  await page.goto('http://localhost:8080');\n"));
        assert!(script.contains("await page.screenshot({ path: 'shots/step-1.png' });"));
        assert!(script.contains("await page.screenshot({ path: 'shots/step-4.png' });"));
    }

    #[test]
    fn test_escaping_is_applied_everywhere() {
        let case = TestCase::new(
            "Bob's test",
            vec![Step::new(1, "Type it's\ndone", ActionType::Fill)
                .with_selector(r"input[name='a\b']")
                .with_value("it's")],
        );
        let script = generate(&case, &GenerateOptions::default());
        assert!(script.contains(r"test('Bob\'s test'"));
        assert!(script.contains(r"// Step 1: Type it\'s\ndone"));
        assert!(script.contains(r"await page.fill('input[name=\'a\\b\']', 'it\'s');"));
    }

    #[test]
    fn test_line_separator_stays_inside_step_comment() {
        let step: Step = serde_json::from_str(
            r#"{"number":1,"description":"Open\u2028await page.close();","action":"view","value":"Home"}"#,
        )
        .unwrap();
        let script = generate(&TestCase::new("Sep", vec![step]), &GenerateOptions::default());
        assert!(script.contains(r"  // Step 1: Open\u2028await page.close();"));
        assert!(!script.contains('\u{2028}'));
    }

    #[test]
    fn test_statement_mapping() {
        let wait = Step::new(1, "Wait", ActionType::Wait).with_value("250ms");
        assert_eq!(statement(&wait), "await page.waitForTimeout(250);");
        let wait = Step::new(1, "Wait", ActionType::Wait);
        assert_eq!(statement(&wait), "await page.waitForTimeout(1000);");
        let wait = Step::new(1, "Wait", ActionType::Wait).with_value("soon");
        assert_eq!(statement(&wait), "await page.waitForTimeout(1000);");

        let assert_text = Step::new(1, "Check", ActionType::Assert)
            .with_selector("h1")
            .with_value("Welcome");
        assert_eq!(
            statement(&assert_text),
            "await expect(page.locator('h1')).toHaveText('Welcome');"
        );
        let assert_visible = Step::new(1, "Check", ActionType::Assert).with_selector("h1");
        assert_eq!(
            statement(&assert_visible),
            "await expect(page.locator('h1')).toBeVisible();"
        );
        let assert_missing = Step::new(1, "Check header", ActionType::Assert).with_value("x");
        assert_eq!(
            statement(&assert_missing),
            "// Missing selector for assertion: Check header"
        );
    }

    #[test]
    fn test_unsupported_actions_become_comments() {
        let upload = Step::new(1, "Upload the report", ActionType::Upload)
            .with_selector(r#"input[type="file"]"#)
            .with_value("report");
        assert_eq!(statement(&upload), "// Unsupported action: upload");
        let unknown = Step::new(2, "Scroll", ActionType::Unknown);
        assert_eq!(statement(&unknown), "// Unsupported action: unknown");

        let fill = Step::new(3, "Type \"x\"", ActionType::Fill).with_value("x");
        assert_eq!(statement(&fill), "// Missing selector for fill: Type \"x\"");
    }

    #[test]
    fn test_empty_steps_still_valid_source() {
        let script = generate(&TestCase::new("Empty", vec![]), &GenerateOptions::default());
        assert!(script.ends_with("async ({ page }) => {\n});\n"));
    }

    #[test]
    fn test_safe_filename() {
        let cases = [
            ("Simple Test", "simple-test.spec.js"),
            ("Test with spaces!", "test-with-spaces.spec.js"),
            ("Test/with/slashes", "test-with-slashes.spec.js"),
            ("Test with $pecial Ch@rs", "test-with-pecial-ch-rs.spec.js"),
            ("  Trim  Spaces  ", "trim-spaces.spec.js"),
            ("!!!", "untitled-test.spec.js"),
        ];
        for (input, expected) in cases {
            assert_eq!(safe_filename(input), expected);
        }
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for title in ["How To Log In To DAW Hub", "Ünïcode — title", "a--b", "42"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }

    #[test]
    fn test_playwright_config() {
        let config = playwright_config("./generated-tests", None);
        assert!(config.contains("module.exports = config"));
        assert!(config.contains("testDir: './generated-tests'"));
        assert!(config.contains("baseURL: 'http://localhost:3000'"));

        let config = playwright_config("./e2e", Some("https://staging.example.com"));
        assert!(config.contains("baseURL: 'https://staging.example.com'"));
    }
}
