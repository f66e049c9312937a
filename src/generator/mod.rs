//! Generator module - Playwright scripts from test cases
//!
//! `script` is pure text generation; `writer` is the async file-output shell
//! around it.

pub mod escape;
pub mod script;
pub mod writer;

pub use escape::escape_js;
pub use script::{generate, playwright_config, safe_filename, slugify, GenerateOptions};
pub use writer::{
    ensure_playwright_config, DirectorySink, GeneratedScript, ScriptSink, ScriptWriter,
};
