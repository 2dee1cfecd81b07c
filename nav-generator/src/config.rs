//! The user's navigation bar choices.
//!
//! A [`NavConfig`] is a plain value: it is loaded from JSON, replaced by
//! [`NavConfig::apply`] on every change, and never mutated
//! behind the generator's back.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Profile image size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ImageSize {
    /// Rendered width and height in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            ImageSize::Small => 32,
            ImageSize::Medium => 48,
            ImageSize::Large => 64,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(ImageSize::Small),
            "medium" => Some(ImageSize::Medium),
            "large" => Some(ImageSize::Large),
            _ => None,
        }
    }
}

/// Horizontal placement of the header contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl NavAlign {
    /// The flexbox `justify-content` value for this alignment.
    pub fn justify_content(self) -> &'static str {
        match self {
            NavAlign::Left => "flex-start",
            NavAlign::Center => "center",
            NavAlign::Right => "flex-end",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "left" => Some(NavAlign::Left),
            "center" => Some(NavAlign::Center),
            "right" => Some(NavAlign::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub text: String,
    pub url: String,
}

impl NavLink {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// What the "add link" action inserts.
impl Default for NavLink {
    fn default() -> Self {
        Self::new("New Link", "#")
    }
}

/// Complete configuration for one generated navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavConfig {
    pub profile_img_url: String,
    pub profile_img_alt: String,
    pub profile_img_size: ImageSize,
    pub links: Vec<NavLink>,
    pub nav_align: NavAlign,
    pub hamburger: bool,
    pub sticky: bool,
    /// Viewport width in pixels at which the desktop layout starts.
    pub breakpoint: u32,
    pub header_bg: String,
    pub link_color: String,
    pub link_hover: String,
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f32,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            profile_img_url: String::new(),
            profile_img_alt: String::new(),
            profile_img_size: ImageSize::Medium,
            links: vec![NavLink::new("Home", "#"), NavLink::new("About", "#")],
            nav_align: NavAlign::Left,
            hamburger: true,
            sticky: false,
            breakpoint: 768,
            header_bg: "#22223b".to_string(),
            link_color: "#4a4e69".to_string(),
            link_hover: "#9a8c98".to_string(),
            font_family: "system-ui".to_string(),
            font_size: 16.0,
        }
    }
}

impl NavConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file. Keys absent from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| NavError::io(path, e))?;
        Self::from_json(&text)
    }

    /// Write the config to `path` atomically: a temporary file in the same
    /// directory is renamed over the target, so readers never see a partial
    /// file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;
        json.push('\n');

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| NavError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| NavError::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| NavError::io(path, e.error))?;
        Ok(())
    }
}
