use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NavError, Result};

/// Markup file inside a component directory.
pub const HTML_FILE: &str = "index.html";
/// Stylesheet inside a component directory.
pub const CSS_FILE: &str = "css/styles.css";

/// The unmodified base component, before any configuration is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTemplate {
    pub html: String,
    pub css: String,
}

impl BaseTemplate {
    pub fn new(html: impl Into<String>, css: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
        }
    }
}

/// Where base templates come from. Fetched once per regeneration, so edits
/// to the underlying files show up on the next run.
pub trait TemplateSource {
    fn fetch(&self) -> Result<BaseTemplate>;

    /// Human-readable location for log and error messages.
    fn describe(&self) -> String;
}

/// A component directory laid out as `index.html` + `css/styles.css`.
#[derive(Debug, Clone)]
pub struct DirTemplateSource {
    root: PathBuf,
}

impl DirTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn html_path(&self) -> PathBuf {
        self.root.join(HTML_FILE)
    }

    pub fn css_path(&self) -> PathBuf {
        self.root.join(CSS_FILE)
    }
}

impl TemplateSource for DirTemplateSource {
    fn fetch(&self) -> Result<BaseTemplate> {
        let html_path = self.html_path();
        let css_path = self.css_path();
        let html = fs::read_to_string(&html_path).map_err(|e| NavError::io(&html_path, e))?;
        let css = fs::read_to_string(&css_path).map_err(|e| NavError::io(&css_path, e))?;
        tracing::debug!(
            root = %self.root.display(),
            html_bytes = html.len(),
            css_bytes = css.len(),
            "fetched base template"
        );
        Ok(BaseTemplate { html, css })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// An in-memory template, for tests and for callers that already hold the
/// markup (the wasm bindings, the JSON API).
#[derive(Debug, Clone)]
pub struct StaticTemplateSource(pub BaseTemplate);

impl TemplateSource for StaticTemplateSource {
    fn fetch(&self) -> Result<BaseTemplate> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "<in-memory template>".to_string()
    }
}
