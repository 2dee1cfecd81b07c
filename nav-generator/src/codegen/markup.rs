use crate::config::{NavConfig, NavLink};

use super::PROFILE_IMAGE_CLASS;

/// The replacement profile image element.
pub(super) fn profile_image(config: &NavConfig) -> String {
    let px = config.profile_img_size.pixels();
    format!(
        r#"<img class="{PROFILE_IMAGE_CLASS}" src="{src}" alt="{alt}" style="width:{px}px;height:{px}px;border-radius:50%;object-fit:cover;">"#,
        src = escape_attr(&config.profile_img_url),
        alt = escape_attr(&config.profile_img_alt),
    )
}

/// One anchor per link, in order, with nothing between them.
pub(super) fn nav_links(links: &[NavLink]) -> String {
    links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{}">{}</a>"#,
                escape_attr(&link.url),
                escape_text(&link.text)
            )
        })
        .collect()
}

/// Escape text for a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
