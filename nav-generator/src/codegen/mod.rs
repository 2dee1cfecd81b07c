use std::ops::Range;

use crate::config::NavConfig;
use crate::dom;
use crate::error::{ErrorKind, NavError, Result};
use crate::stylesheet;
use crate::template::BaseTemplate;

mod markup;
mod rules;

#[cfg(test)]
mod tests;

pub use self::markup::{escape_attr, escape_text};
pub use self::rules::config_rules;

// ── Marker classes ─────────────────────────────────────────────────────

/// Class of the `<img>` replaced with the configured profile image.
pub const PROFILE_IMAGE_CLASS: &str = "profile-image";
/// Class of the container whose contents become the configured links.
pub const NAV_LINKS_CLASS: &str = "nav-links";

// ── Public types ───────────────────────────────────────────────────────

/// Generated navigation markup and styles.
#[derive(Debug, Clone, PartialEq)]
pub struct NavOutput {
    pub html: String,
    pub css: String,
    /// Non-fatal template issues the user should know about.
    pub warnings: Vec<String>,
}

// ── Generation ─────────────────────────────────────────────────────────

/// Merge `config` into `template`.
///
/// The first `img.profile-image` is replaced, the first `.nav-links`
/// container gets one anchor per configured link, the stylesheet loses its
/// `.profile-image` sizing rule and gains the configuration rules. All other
/// template text is carried over byte-for-byte.
pub fn generate(template: &BaseTemplate, config: &NavConfig) -> Result<NavOutput> {
    let mut warnings = Vec::new();
    let html = merge_html(&template.html, config, &mut warnings)?;
    let css = merge_css(&template.css, config, &mut warnings)?;

    tracing::debug!(
        links = config.links.len(),
        breakpoint = config.breakpoint,
        html_bytes = html.len(),
        css_bytes = css.len(),
        "generated navigation"
    );
    for w in &warnings {
        tracing::warn!("{w}");
    }

    Ok(NavOutput {
        html,
        css,
        warnings,
    })
}

/// Like [`generate`], but any warning fails the run.
pub fn generate_strict(template: &BaseTemplate, config: &NavConfig) -> Result<NavOutput> {
    let output = generate(template, config)?;
    if output.warnings.is_empty() {
        Ok(output)
    } else {
        Err(ErrorKind::StrictWarnings(output.warnings).into())
    }
}

/// Check that a template satisfies the marker contract without applying
/// any configuration. Returns the warnings a generation run would emit.
pub fn validate_template(template: &BaseTemplate) -> Result<Vec<String>> {
    generate(template, &NavConfig::default()).map(|output| output.warnings)
}

fn merge_html(source: &str, config: &NavConfig, warnings: &mut Vec<String>) -> Result<String> {
    let doc = dom::parse(source)?;

    let is_profile_image = |e: &dom::Element| e.name == "img" && e.has_class(PROFILE_IMAGE_CLASS);
    let is_nav_links = |e: &dom::Element| !e.is_void() && e.has_class(NAV_LINKS_CLASS);

    let image = doc
        .find_first(is_profile_image)
        .ok_or_else(|| NavError::missing_marker("img", PROFILE_IMAGE_CLASS))?;
    let links = doc
        .find_first(is_nav_links)
        .ok_or_else(|| NavError::missing_marker("container", NAV_LINKS_CLASS))?;

    let image_count = doc.count(is_profile_image);
    if image_count > 1 {
        warnings.push(format!(
            "{image_count} images with class \"{PROFILE_IMAGE_CLASS}\"; only the first is replaced"
        ));
    }
    let links_count = doc.count(is_nav_links);
    if links_count > 1 {
        warnings.push(format!(
            "{links_count} elements with class \"{NAV_LINKS_CLASS}\"; only the first is filled"
        ));
    }

    let image_span = image.outer_span();
    let links_span = links.inner_span();
    let mut edits = vec![(links_span.clone(), markup::nav_links(&config.links))];
    if contains(&links_span, &image_span) {
        warnings.push(format!(
            "\"{PROFILE_IMAGE_CLASS}\" sits inside \"{NAV_LINKS_CLASS}\" and is dropped with the old links"
        ));
    } else {
        edits.push((image_span, markup::profile_image(config)));
    }

    Ok(splice(source, edits))
}

fn merge_css(source: &str, config: &NavConfig, warnings: &mut Vec<String>) -> Result<String> {
    let sheet = stylesheet::parse(source)?;

    let mut css = match sheet.find_class_rule(PROFILE_IMAGE_CLASS) {
        Some(rule) => splice(source, vec![(rule.span.clone(), String::new())]),
        None => {
            warnings.push(format!(
                "stylesheet has no \".{PROFILE_IMAGE_CLASS}\" rule to replace"
            ));
            source.to_string()
        }
    };

    for rule in config_rules(config) {
        css.push('\n');
        css.push_str(&rule);
    }
    Ok(css)
}

fn contains(outer: &Range<usize>, inner: &Range<usize>) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// Replace non-overlapping byte ranges of `source`.
fn splice(source: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        out.push_str(&source[cursor..range.start]);
        out.push_str(&replacement);
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}
