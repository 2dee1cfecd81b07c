use crate::codegen::{escape_attr, escape_text, NavOutput};
use crate::config::NavConfig;
use crate::export;

use super::css::build_css;

fn build_toolbar(output: &NavOutput, config: &NavConfig, template: &str) -> String {
    let mut badges = Vec::new();
    badges.push(r#"<span class="label">navgen</span>"#.to_string());
    badges.push(format!(
        r#"<span class="sep">|</span><span class="path">{}</span>"#,
        escape_text(template)
    ));
    badges.push(format!(
        r#"<span class="badge">{} link{}</span>"#,
        config.links.len(),
        if config.links.len() == 1 { "" } else { "s" }
    ));
    badges.push(format!(
        r#"<span class="badge">breakpoint {}px</span>"#,
        config.breakpoint
    ));
    if config.sticky {
        badges.push(r#"<span class="badge">sticky</span>"#.to_string());
    }
    if !output.warnings.is_empty() {
        badges.push(format!(
            r#"<span class="badge" style="color:#F59E0B">&#9888; {}</span>"#,
            output.warnings.len()
        ));
    }

    format!(
        r#"<div class="toolbar">
{badges}
<div class="actions">
  <a href="/preview.html" target="_blank" title="Open the preview on its own">Fullscreen</a>
  <a href="/export/html" title="Download nav.html">nav.html</a>
  <a href="/export/css" title="Download nav.css">nav.css</a>
</div>
</div>"#,
        badges = badges.join("\n"),
    )
}

fn build_warnings_html(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return String::new();
    }
    let items: String = warnings
        .iter()
        .map(|w| format!("<div>&#9888; {}</div>", escape_text(w)))
        .collect();
    format!(r#"<div class="warnings">{items}</div>"#)
}

pub(super) fn build_preview_page(output: &NavOutput, config: &NavConfig, template: &str) -> String {
    let css = build_css();
    let toolbar = build_toolbar(output, config, template);
    let warnings_html = build_warnings_html(&output.warnings);
    let warnings_height = if output.warnings.is_empty() {
        0
    } else {
        12 + 16 * output.warnings.len()
    };
    let split_class = if output.warnings.is_empty() {
        "split"
    } else {
        "split has-warnings"
    };
    let srcdoc = escape_attr(&export::preview_document(output));
    let html_code = escape_text(&output.html);
    let css_code = escape_text(&output.css);
    let config_code = escape_text(&config.to_json().unwrap_or_default());

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>navgen preview</title>
<style>
  :root {{ --warnings-height: {warnings_height}px; }}
  {css}
</style>
</head>
<body>
{toolbar}
{warnings_html}
<div class="{split_class}">
  <div class="preview-panel">
    <div class="panel-label">preview</div>
    <iframe id="preview" srcdoc="{srcdoc}"></iframe>
  </div>
  <div class="code-panels">
    <div class="code-panel">
      <div class="panel-label">nav.html</div>
      <pre id="html-code">{html_code}</pre>
    </div>
    <div class="code-panel">
      <div class="panel-label">nav.css</div>
      <pre id="css-code">{css_code}</pre>
    </div>
    <div class="code-panel">
      <div class="panel-label">config</div>
      <pre id="config-code">{config_code}</pre>
    </div>
  </div>
</div>
</body>
</html>"##,
    )
}

pub(super) fn build_error_page(template: &str, error: &str) -> String {
    let escaped = escape_text(error);
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>navgen preview: error</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  html, body {{ width: 100%; height: 100%; background: #0A0A0A; color: #A0A0A0;
    font-family: 'JetBrains Mono', monospace; }}
  .error-container {{
    max-width: 640px; margin: 80px auto; padding: 32px;
    border: 1px solid #3F1818; border-radius: 8px;
    background: rgba(239,68,68,0.04);
  }}
  .error-header {{
    display: flex; align-items: center; gap: 10px; margin-bottom: 20px;
    font-size: 13px; color: #EF4444;
  }}
  .error-header .path {{ color: #D4AF37; }}
  .error-message {{
    font-size: 12px; color: #EF4444; line-height: 1.7;
    white-space: pre-wrap; word-break: break-word;
    padding: 16px; background: #141414; border-radius: 4px;
    border-left: 3px solid #EF4444;
  }}
  .waiting {{ margin-top: 24px; font-size: 11px; color: #666; }}
</style>
</head>
<body>
<div class="error-container">
  <div class="error-header">
    <span>navgen</span>
    <span class="path">{template}</span>
    <span>generation error</span>
  </div>
  <div class="error-message">{escaped}</div>
  <div class="waiting">waiting for a fix...</div>
</div>
</body>
</html>"##,
        template = escape_text(template),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> NavOutput {
        NavOutput {
            html: r#"<nav class="nav-links"><a href="/a?x=1&y=2">A</a></nav>"#.into(),
            css: ".nav-links a { color: red; }".into(),
            warnings: vec!["no rule for <.profile-image>".into()],
        }
    }

    #[test]
    fn preview_page_embeds_escaped_output() {
        let page = build_preview_page(&output(), &NavConfig::default(), "component/index.html");
        assert!(page.contains(r#"srcdoc="&lt;style&gt;.nav-links a { color: red; }&lt;/style&gt;"#));
        assert!(page.contains("&lt;a href=\"/a?x=1&amp;y=2\"&gt;A&lt;/a&gt;"));
        assert!(page.contains("&#9888; no rule for &lt;.profile-image&gt;"));
        assert!(page.contains(r#"href="/export/css""#));
        assert!(page.contains("2 links"));
    }

    #[test]
    fn no_warnings_bar_when_clean() {
        let mut out = output();
        out.warnings.clear();
        let page = build_preview_page(&out, &NavConfig::default(), "t");
        assert!(!page.contains(r#"class="warnings""#));
        assert!(page.contains(r#"<div class="split">"#));
    }

    #[test]
    fn error_page_escapes_message() {
        let page = build_error_page("component", "unexpected </div>");
        assert!(page.contains("unexpected &lt;/div&gt;"));
        assert!(page.contains(r#"<span class="path">component</span>"#));
    }
}
