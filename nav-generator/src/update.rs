//! Configuration changes as values.
//!
//! Every user action becomes a [`ConfigUpdate`]. Applying one returns a new
//! [`NavConfig`] and leaves the original untouched.

use crate::config::{ImageSize, NavAlign, NavConfig, NavLink};
use crate::error::{ErrorKind, NavError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdate {
    ProfileImageUrl(String),
    ProfileImageAlt(String),
    ProfileImageSize(ImageSize),
    Align(NavAlign),
    Hamburger(bool),
    Sticky(bool),
    Breakpoint(u32),
    HeaderBackground(String),
    LinkColor(String),
    LinkHover(String),
    FontFamily(String),
    FontSize(f32),
    AddLink(NavLink),
    RemoveLink(usize),
    LinkText { index: usize, text: String },
    LinkUrl { index: usize, url: String },
}

impl ConfigUpdate {
    /// Parse a configurator form field and its raw value.
    ///
    /// Field names are the configurator's control ids. Per-link fields take
    /// the link index as a suffix: `link-text.0`, `link-url.2`.
    /// `add-link` accepts an optional `text|url` value; `remove-link` takes
    /// the index as its value.
    pub fn from_field(field: &str, value: &str) -> Result<Self> {
        let update = match field {
            "profile-img-url" => ConfigUpdate::ProfileImageUrl(value.to_string()),
            "profile-img-alt" => ConfigUpdate::ProfileImageAlt(value.to_string()),
            "profile-img-size" => ConfigUpdate::ProfileImageSize(
                ImageSize::parse(value)
                    .ok_or_else(|| NavError::invalid_field(field, "expected small, medium or large"))?,
            ),
            "nav-align" => ConfigUpdate::Align(
                NavAlign::parse(value)
                    .ok_or_else(|| NavError::invalid_field(field, "expected left, center or right"))?,
            ),
            "hamburger-toggle" => ConfigUpdate::Hamburger(parse_bool(field, value)?),
            "sticky-toggle" => ConfigUpdate::Sticky(parse_bool(field, value)?),
            "breakpoint" => ConfigUpdate::Breakpoint(parse_pixels(field, value)?),
            "header-bg" => ConfigUpdate::HeaderBackground(value.to_string()),
            "link-color" => ConfigUpdate::LinkColor(value.to_string()),
            "link-hover-color" => ConfigUpdate::LinkHover(value.to_string()),
            "font-family" => ConfigUpdate::FontFamily(value.to_string()),
            "font-size" => ConfigUpdate::FontSize(parse_font_size(field, value)?),
            "add-link" => ConfigUpdate::AddLink(parse_link(value)),
            "remove-link" => ConfigUpdate::RemoveLink(parse_index(field, value)?),
            _ => {
                if let Some(index) = field.strip_prefix("link-text.") {
                    ConfigUpdate::LinkText {
                        index: parse_index(field, index)?,
                        text: value.to_string(),
                    }
                } else if let Some(index) = field.strip_prefix("link-url.") {
                    ConfigUpdate::LinkUrl {
                        index: parse_index(field, index)?,
                        url: value.to_string(),
                    }
                } else {
                    return Err(ErrorKind::UnknownField(field.to_string()).into());
                }
            }
        };
        Ok(update)
    }

    /// Parse a `field=value` assignment, as given on the command line.
    pub fn from_assignment(assignment: &str) -> Result<Self> {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| NavError::invalid_field(assignment, "expected field=value"))?;
        Self::from_field(field.trim(), value)
    }
}

impl NavConfig {
    /// Return a copy of this config with `update` applied.
    pub fn apply(&self, update: ConfigUpdate) -> Result<NavConfig> {
        let mut next = self.clone();
        match update {
            ConfigUpdate::ProfileImageUrl(url) => next.profile_img_url = url,
            ConfigUpdate::ProfileImageAlt(alt) => next.profile_img_alt = alt,
            ConfigUpdate::ProfileImageSize(size) => next.profile_img_size = size,
            ConfigUpdate::Align(align) => next.nav_align = align,
            ConfigUpdate::Hamburger(on) => next.hamburger = on,
            ConfigUpdate::Sticky(on) => next.sticky = on,
            ConfigUpdate::Breakpoint(px) => next.breakpoint = px,
            ConfigUpdate::HeaderBackground(color) => next.header_bg = color,
            ConfigUpdate::LinkColor(color) => next.link_color = color,
            ConfigUpdate::LinkHover(color) => next.link_hover = color,
            ConfigUpdate::FontFamily(family) => next.font_family = family,
            ConfigUpdate::FontSize(px) => next.font_size = px,
            ConfigUpdate::AddLink(link) => next.links.push(link),
            ConfigUpdate::RemoveLink(index) => {
                check_index(index, next.links.len())?;
                next.links.remove(index);
            }
            ConfigUpdate::LinkText { index, text } => {
                check_index(index, next.links.len())?;
                next.links[index].text = text;
            }
            ConfigUpdate::LinkUrl { index, url } => {
                check_index(index, next.links.len())?;
                next.links[index].url = url;
            }
        }
        Ok(next)
    }

    /// Apply a sequence of updates, stopping at the first failure.
    pub fn apply_all<I>(&self, updates: I) -> Result<NavConfig>
    where
        I: IntoIterator<Item = ConfigUpdate>,
    {
        updates
            .into_iter()
            .try_fold(self.clone(), |config, update| config.apply(update))
    }
}

fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(ErrorKind::LinkIndexOutOfRange { index, len }.into())
    }
}

/// Checkbox values: the browser sends `on`, JSON clients send `true`.
fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" | "" => Ok(false),
        other => Err(NavError::invalid_field(
            field,
            format!("expected true or false, got {other:?}"),
        )),
    }
}

fn parse_pixels(field: &str, value: &str) -> Result<u32> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
    digits.parse::<u32>().map_err(|_| {
        NavError::invalid_field(field, format!("expected a pixel count, got {value:?}"))
    })
}

/// Font sizes may be fractional (`14.5`); they must be finite and not negative.
fn parse_font_size(field: &str, value: &str) -> Result<f32> {
    let trimmed = value.trim();
    let digits = trimmed.strip_suffix("px").unwrap_or(trimmed);
    match digits.parse::<f32>() {
        Ok(px) if px.is_finite() && px >= 0.0 => Ok(px),
        _ => Err(NavError::invalid_field(
            field,
            format!("expected a font size in pixels, got {value:?}"),
        )),
    }
}

fn parse_index(field: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| NavError::invalid_field(field, format!("expected a link index, got {value:?}")))
}

fn parse_link(value: &str) -> NavLink {
    match value.split_once('|') {
        Some((text, url)) => NavLink::new(text.trim(), url.trim()),
        None if value.trim().is_empty() => NavLink::default(),
        None => NavLink::new(value.trim(), "#"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_leaves_original_untouched() {
        let before = NavConfig::default();
        let after = before.apply(ConfigUpdate::Sticky(true)).unwrap();
        assert!(!before.sticky);
        assert!(after.sticky);
    }

    #[test]
    fn link_editing_sequence() {
        let config = NavConfig::default()
            .apply_all([
                ConfigUpdate::AddLink(NavLink::default()),
                ConfigUpdate::LinkText {
                    index: 2,
                    text: "Blog".into(),
                },
                ConfigUpdate::LinkUrl {
                    index: 2,
                    url: "/blog".into(),
                },
                ConfigUpdate::RemoveLink(0),
            ])
            .unwrap();
        assert_eq!(
            config.links,
            vec![NavLink::new("About", "#"), NavLink::new("Blog", "/blog")]
        );
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let err = NavConfig::default()
            .apply(ConfigUpdate::RemoveLink(5))
            .unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::LinkIndexOutOfRange { index: 5, len: 2 }
        ));
    }

    #[test]
    fn fields_parse_from_form_ids() {
        assert_eq!(
            ConfigUpdate::from_field("profile-img-size", "large").unwrap(),
            ConfigUpdate::ProfileImageSize(ImageSize::Large)
        );
        assert_eq!(
            ConfigUpdate::from_field("nav-align", "center").unwrap(),
            ConfigUpdate::Align(NavAlign::Center)
        );
        assert_eq!(
            ConfigUpdate::from_field("hamburger-toggle", "on").unwrap(),
            ConfigUpdate::Hamburger(true)
        );
        assert_eq!(
            ConfigUpdate::from_field("breakpoint", "1024px").unwrap(),
            ConfigUpdate::Breakpoint(1024)
        );
        assert_eq!(
            ConfigUpdate::from_field("link-url.1", "/about").unwrap(),
            ConfigUpdate::LinkUrl {
                index: 1,
                url: "/about".into()
            }
        );
        assert_eq!(
            ConfigUpdate::from_field("add-link", "Docs | /docs").unwrap(),
            ConfigUpdate::AddLink(NavLink::new("Docs", "/docs"))
        );
        assert_eq!(
            ConfigUpdate::from_field("add-link", "").unwrap(),
            ConfigUpdate::AddLink(NavLink::new("New Link", "#"))
        );
    }

    #[test]
    fn fractional_font_sizes_are_accepted() {
        assert_eq!(
            ConfigUpdate::from_field("font-size", "14.5").unwrap(),
            ConfigUpdate::FontSize(14.5)
        );
        assert_eq!(
            ConfigUpdate::from_field("font-size", "18px").unwrap(),
            ConfigUpdate::FontSize(18.0)
        );
        for bad in ["-1", "NaN", "inf", "big"] {
            assert!(
                ConfigUpdate::from_field("font-size", bad).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn bad_fields_are_rejected() {
        assert!(matches!(
            ConfigUpdate::from_field("profile-img-size", "huge").unwrap_err().kind,
            ErrorKind::InvalidField { .. }
        ));
        assert!(matches!(
            ConfigUpdate::from_field("breakpoint", "-5").unwrap_err().kind,
            ErrorKind::InvalidField { .. }
        ));
        assert!(matches!(
            ConfigUpdate::from_field("link-text.x", "Home").unwrap_err().kind,
            ErrorKind::InvalidField { .. }
        ));
        assert!(matches!(
            ConfigUpdate::from_field("logo", "x").unwrap_err().kind,
            ErrorKind::UnknownField(_)
        ));
    }

    #[test]
    fn assignments_split_on_first_equals() {
        assert_eq!(
            ConfigUpdate::from_assignment("profile-img-url=https://x.test/a.png?s=64").unwrap(),
            ConfigUpdate::ProfileImageUrl("https://x.test/a.png?s=64".into())
        );
        assert!(ConfigUpdate::from_assignment("sticky-toggle").is_err());
    }
}
