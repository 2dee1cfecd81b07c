use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::codegen::NavOutput;
use crate::error::{NavError, Result};

/// File name of the exported markup.
pub const HTML_EXPORT: &str = "nav.html";
/// File name of the exported stylesheet.
pub const CSS_EXPORT: &str = "nav.css";

/// Write `nav.html` and `nav.css` into `dir`, creating it if needed.
/// Returns the two paths written.
pub fn write_outputs(dir: &Path, output: &NavOutput) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir).map_err(|e| NavError::io(dir, e))?;

    let html_path = dir.join(HTML_EXPORT);
    let css_path = dir.join(CSS_EXPORT);
    fs::write(&html_path, &output.html).map_err(|e| NavError::io(&html_path, e))?;
    fs::write(&css_path, &output.css).map_err(|e| NavError::io(&css_path, e))?;

    tracing::info!(dir = %dir.display(), "exported navigation");
    Ok((html_path, css_path))
}

/// The document shown in the live preview frame: styles first, then markup.
pub fn preview_document(output: &NavOutput) -> String {
    format!("<style>{}</style>{}", output.css, output.html)
}

/// Read an image file and encode it as a `data:` URL suitable for the
/// profile image source.
pub fn image_data_url(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| NavError::io(path, e))?;
    Ok(encode_data_url(image_mime_type(path), &bytes))
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime};base64,{encoded}")
}

/// MIME type from the file extension; unknown extensions fall back to
/// `application/octet-stream`.
pub fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
