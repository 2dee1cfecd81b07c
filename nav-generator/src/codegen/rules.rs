use crate::config::NavConfig;

/// CSS rules derived from the configuration, in the order they are
/// appended to the base stylesheet.
pub fn config_rules(config: &NavConfig) -> Vec<String> {
    let mut rules = Vec::with_capacity(9);

    rules.push(format!(
        ".nav-header {{ justify-content: {}; }}",
        config.nav_align.justify_content()
    ));
    if !config.hamburger {
        rules.push(".hamburger { display: none !important; }".to_string());
    }
    if config.sticky {
        rules.push(".nav-header { position: sticky; top: 0; }".to_string());
    }

    // Mobile ends one pixel below the breakpoint so the two queries never
    // overlap. A zero breakpoint yields -1px, which matches nothing.
    let mobile_max = i64::from(config.breakpoint) - 1;
    rules.push(format!(
        "@media (max-width: {mobile_max}px) {{ .nav-links {{ display: none; }} .hamburger {{ display: block; }} }}"
    ));
    rules.push(format!(
        "@media (min-width: {}px) {{ .nav-links {{ display: flex; }} .hamburger {{ display: none; }} }}",
        config.breakpoint
    ));

    rules.push(format!(".nav-header {{ background: {}; }}", config.header_bg));
    rules.push(format!(".nav-links a {{ color: {}; }}", config.link_color));
    rules.push(format!(
        ".nav-links a:hover, .nav-links a:focus {{ color: {}; }}",
        config.link_hover
    ));
    rules.push(format!(
        ".nav-header, .nav-links a {{ font-family: {}; font-size: {}px; }}",
        config.font_family, config.font_size
    ));

    rules
}
