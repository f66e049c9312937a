//! File output for generated scripts
//!
//! A thin async shell around the pure generator. Output directories are
//! created with "create if missing" semantics so concurrent writers never
//! race on them.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::core::{Result, StepscribeError, TestCase};
use crate::generator::script::{
    generate, playwright_config, safe_filename, slugify, GenerateOptions, SCRIPT_SUFFIX,
};

/// File name of the Playwright config scaffold
pub const PLAYWRIGHT_CONFIG_FILE: &str = "playwright.config.js";

/// Destination for generated artifacts
#[async_trait]
pub trait ScriptSink: Send + Sync {
    /// Store `contents` under `file_name`, returning where it ended up
    async fn put(&self, file_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Writes artifacts into a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink for `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ScriptSink for DirectorySink {
    async fn put(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).await.map_err(|e| {
            StepscribeError::with_context(format!("Failed to create {}", self.dir.display()), e)
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, contents).await.map_err(|e| {
            StepscribeError::with_context(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(path)
    }
}

/// A script that has been generated and stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Title of the source test case
    pub title: String,
    /// File name the script was stored under
    pub file_name: String,
    /// Location reported by the sink
    pub path: PathBuf,
}

/// Generates scripts and hands them to a sink
pub struct ScriptWriter<S: ScriptSink> {
    sink: S,
    options: GenerateOptions,
}

impl<S: ScriptSink> ScriptWriter<S> {
    /// Create a writer
    pub fn new(sink: S, options: GenerateOptions) -> Self {
        Self { sink, options }
    }

    /// Generate and store one test case
    pub async fn write(&self, test_case: &TestCase) -> Result<GeneratedScript> {
        self.write_as(test_case, safe_filename(&test_case.title)).await
    }

    async fn write_as(&self, test_case: &TestCase, file_name: String) -> Result<GeneratedScript> {
        let source = generate(test_case, &self.options);
        let path = self.sink.put(&file_name, &source).await?;
        tracing::info!(title = %test_case.title, path = %path.display(), "generated test script");
        Ok(GeneratedScript {
            title: test_case.title.clone(),
            file_name,
            path,
        })
    }

    /// Generate and store many test cases concurrently. Titles that map to
    /// the same file name get numeric suffixes so no script overwrites
    /// another.
    pub async fn write_all(&self, test_cases: &[TestCase]) -> Result<Vec<GeneratedScript>> {
        let names = unique_file_names(test_cases.iter().map(|c| c.title.as_str()));
        try_join_all(
            test_cases
                .iter()
                .zip(names)
                .map(|(case, name)| self.write_as(case, name)),
        )
        .await
    }
}

/// Safe file names for `titles`, suffixing repeats with -2, -3, ...
pub fn unique_file_names<'a>(titles: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    titles
        .into_iter()
        .map(|title| {
            let slug = slugify(title);
            let count = seen.entry(slug.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                format!("{}{}", slug, SCRIPT_SUFFIX)
            } else {
                format!("{}-{}{}", slug, count, SCRIPT_SUFFIX)
            }
        })
        .collect()
}

/// Write `playwright.config.js` next to `output_dir` unless one exists.
/// Returns the path when a new file was created.
pub async fn ensure_playwright_config(
    output_dir: &Path,
    base_url: Option<&str>,
) -> Result<Option<PathBuf>> {
    let parent = output_dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let test_dir = output_dir
        .file_name()
        .map(|name| format!("./{}", name.to_string_lossy()))
        .unwrap_or_else(|| ".".to_string());
    let path = parent.join(PLAYWRIGHT_CONFIG_FILE);

    fs::create_dir_all(parent).await?;
    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "playwright config already present");
            return Ok(None);
        }
        Err(e) => {
            return Err(StepscribeError::with_context(
                format!("Failed to create {}", path.display()),
                e,
            ))
        }
    };

    file.write_all(playwright_config(&test_dir, base_url).as_bytes())
        .await?;
    file.flush().await?;
    tracing::info!(path = %path.display(), "wrote playwright config");
    Ok(Some(path))
}
