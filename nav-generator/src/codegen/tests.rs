use super::*;
use crate::config::{ImageSize, NavAlign, NavLink};

const BASE_HTML: &str = r##"<header class="nav-header">
  <img class="profile-image" src="assets/avatar.png" alt="Avatar">
  <button class="hamburger" aria-label="Open menu">&#9776;</button>
  <nav class="nav-links" aria-label="Primary">
    <a href="#">Placeholder</a>
  </nav>
</header>
"##;

const BASE_CSS: &str = r#".nav-header {
  display: flex;
  align-items: center;
}

.profile-image {
  width: 40px;
  height: 40px;
}

.nav-links a {
  text-decoration: none;
}
"#;

fn template() -> BaseTemplate {
    BaseTemplate::new(BASE_HTML, BASE_CSS)
}

fn render(config: &NavConfig) -> NavOutput {
    generate(&template(), config).expect("generation failed")
}

fn anchors(html: &str) -> Vec<(String, String)> {
    let doc = dom::parse(html).expect("output should parse");
    let nav = doc
        .find_first(|e| e.has_class(NAV_LINKS_CLASS))
        .expect("output keeps the nav container");
    nav.children
        .iter()
        .filter_map(|node| match node {
            dom::Node::Element(a) if a.name == "a" => Some((
                html[a.inner_span()].to_string(),
                a.attr("href").unwrap_or_default().to_string(),
            )),
            _ => None,
        })
        .collect()
}

#[test]
fn one_anchor_per_link_in_order() {
    let config = NavConfig {
        links: vec![
            NavLink::new("Home", "/"),
            NavLink::new("Work", "/work"),
            NavLink::new("Contact", "mailto:hi@example.com"),
        ],
        ..NavConfig::default()
    };
    let out = render(&config);
    assert_eq!(
        anchors(&out.html),
        vec![
            ("Home".to_string(), "/".to_string()),
            ("Work".to_string(), "/work".to_string()),
            ("Contact".to_string(), "mailto:hi@example.com".to_string()),
        ]
    );
    assert!(!out.html.contains("Placeholder"));
}

#[test]
fn empty_link_list_empties_the_container() {
    let config = NavConfig {
        links: Vec::new(),
        ..NavConfig::default()
    };
    let out = render(&config);
    assert!(out
        .html
        .contains(r#"<nav class="nav-links" aria-label="Primary"></nav>"#));
}

#[test]
fn image_size_presets() {
    for (size, px) in [
        (ImageSize::Small, 32),
        (ImageSize::Medium, 48),
        (ImageSize::Large, 64),
    ] {
        let config = NavConfig {
            profile_img_size: size,
            ..NavConfig::default()
        };
        let out = render(&config);
        assert!(
            out.html.contains(&format!("width:{px}px;height:{px}px;")),
            "{size:?} should render at {px}px"
        );
    }
}

#[test]
fn image_is_replaced_and_base_sizing_rule_removed() {
    let config = NavConfig {
        profile_img_url: "https://example.com/me.jpg".into(),
        profile_img_alt: "Jo".into(),
        ..NavConfig::default()
    };
    let out = render(&config);
    assert!(out.html.contains(
        r#"<img class="profile-image" src="https://example.com/me.jpg" alt="Jo" style="width:48px;height:48px;border-radius:50%;object-fit:cover;">"#
    ));
    assert!(!out.html.contains("assets/avatar.png"));
    assert!(!out.css.contains(".profile-image"));
    assert!(!out.css.contains("width: 40px"));
    assert!(out.warnings.is_empty(), "{:?}", out.warnings);
}

#[test]
fn untouched_template_text_is_preserved() {
    let out = render(&NavConfig::default());
    assert!(out.html.starts_with("<header class=\"nav-header\">\n  <img class=\"profile-image\""));
    assert!(out
        .html
        .contains("\n  <button class=\"hamburger\" aria-label=\"Open menu\">&#9776;</button>\n"));
    assert!(out.html.ends_with("</nav>\n</header>\n"));
    assert!(out.css.starts_with(".nav-header {\n  display: flex;\n  align-items: center;\n}\n\n\n\n.nav-links a {"));
}

#[test]
fn media_queries_follow_breakpoint() {
    let config = NavConfig {
        links: vec![NavLink::new("Home", "#"), NavLink::new("About", "#")],
        breakpoint: 768,
        ..NavConfig::default()
    };
    let out = render(&config);
    assert!(out.css.contains("@media (max-width: 767px)"));
    assert!(out.css.contains("@media (min-width: 768px)"));

    for bp in [1, 320, 1440] {
        let out = render(&NavConfig {
            breakpoint: bp,
            ..NavConfig::default()
        });
        assert!(out.css.contains(&format!("@media (max-width: {}px)", bp - 1)));
        assert!(out.css.contains(&format!("@media (min-width: {bp}px)")));
    }
}

#[test]
fn zero_breakpoint_yields_negative_mobile_query() {
    let out = render(&NavConfig {
        breakpoint: 0,
        ..NavConfig::default()
    });
    assert!(out.css.contains("@media (max-width: -1px)"));
    assert!(out.css.contains("@media (min-width: 0px)"));
}

#[test]
fn appended_rules_are_in_fixed_order() {
    let config = NavConfig {
        nav_align: NavAlign::Right,
        hamburger: false,
        sticky: true,
        breakpoint: 600,
        header_bg: "#000".into(),
        link_color: "#fff".into(),
        link_hover: "gold".into(),
        font_family: "Inter, sans-serif".into(),
        font_size: 18.0,
        ..NavConfig::default()
    };
    let out = render(&config);
    let appended = out
        .css
        .strip_prefix(BASE_CSS.replace(".profile-image {\n  width: 40px;\n  height: 40px;\n}", "").as_str())
        .expect("base stylesheet is a prefix of the output");
    assert_eq!(
        appended,
        "\n.nav-header { justify-content: flex-end; }\
         \n.hamburger { display: none !important; }\
         \n.nav-header { position: sticky; top: 0; }\
         \n@media (max-width: 599px) { .nav-links { display: none; } .hamburger { display: block; } }\
         \n@media (min-width: 600px) { .nav-links { display: flex; } .hamburger { display: none; } }\
         \n.nav-header { background: #000; }\
         \n.nav-links a { color: #fff; }\
         \n.nav-links a:hover, .nav-links a:focus { color: gold; }\
         \n.nav-header, .nav-links a { font-family: Inter, sans-serif; font-size: 18px; }"
    );
}

#[test]
fn fractional_font_size_is_emitted_as_given() {
    let out = render(&NavConfig {
        font_size: 14.5,
        ..NavConfig::default()
    });
    assert!(out.css.ends_with("font-size: 14.5px; }"));
    assert!(render(&NavConfig::default()).css.ends_with("font-size: 16px; }"));
}

#[test]
fn exactly_one_background_and_link_color_rule() {
    let config = NavConfig {
        header_bg: "rebeccapurple".into(),
        link_color: "#123456".into(),
        ..NavConfig::default()
    };
    let first = render(&config);
    let second = render(&config);
    assert_eq!(first, second, "generation is idempotent");
    assert_eq!(first.css.matches(".nav-header { background:").count(), 1);
    assert!(first.css.contains(".nav-header { background: rebeccapurple; }"));
    assert_eq!(first.css.matches("\n.nav-links a { color:").count(), 1);
    assert!(first.css.contains(".nav-links a { color: #123456; }"));
}

#[test]
fn hamburger_rule_does_not_accumulate() {
    let hidden_rule = ".hamburger { display: none !important; }";
    let base = NavConfig::default();
    assert!(!render(&base).css.contains(hidden_rule));

    let off = base.apply(crate::update::ConfigUpdate::Hamburger(false)).unwrap();
    assert_eq!(render(&off).css.matches(hidden_rule).count(), 1);

    let on = off.apply(crate::update::ConfigUpdate::Hamburger(true)).unwrap();
    assert!(!render(&on).css.contains(hidden_rule));
}

#[test]
fn sticky_rule_only_when_enabled() {
    let sticky = ".nav-header { position: sticky; top: 0; }";
    assert!(!render(&NavConfig::default()).css.contains(sticky));
    assert!(render(&NavConfig {
        sticky: true,
        ..NavConfig::default()
    })
    .css
    .contains(sticky));
}

#[test]
fn configured_strings_are_escaped() {
    let config = NavConfig {
        profile_img_alt: r#"Jo "JJ" Smith"#.into(),
        links: vec![NavLink::new("Q&A <new>", "/search?q=a&b=c")],
        ..NavConfig::default()
    };
    let out = render(&config);
    assert!(out.html.contains(r#"alt="Jo &quot;JJ&quot; Smith""#));
    assert!(out
        .html
        .contains(r#"<a href="/search?q=a&amp;b=c">Q&amp;A &lt;new&gt;</a>"#));
}

#[test]
fn missing_markers_are_errors() {
    let no_image = BaseTemplate::new(r#"<nav class="nav-links"></nav>"#, "");
    let err = generate(&no_image, &NavConfig::default()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MissingMarker {
            class: PROFILE_IMAGE_CLASS,
            ..
        }
    ));

    let no_links = BaseTemplate::new(r#"<img class="profile-image">"#, "");
    let err = generate(&no_links, &NavConfig::default()).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::MissingMarker {
            class: NAV_LINKS_CLASS,
            ..
        }
    ));
}

#[test]
fn first_marker_wins_and_duplicates_warn() {
    let html = r#"<img class="profile-image" id="a"><img class="profile-image" id="b"><ul class="nav-links"><li>x</li></ul><ul class="nav-links"><li>y</li></ul>"#;
    let out = generate(&BaseTemplate::new(html, ".profile-image { }"), &NavConfig::default()).unwrap();
    assert!(!out.html.contains(r#"id="a""#));
    assert!(out.html.contains(r#"id="b""#));
    assert!(out.html.contains(r##"<ul class="nav-links"><a href="#">Home</a><a href="#">About</a></ul>"##));
    assert!(out.html.contains("<li>y</li>"));
    assert_eq!(out.warnings.len(), 2);
}

#[test]
fn missing_sizing_rule_is_a_warning() {
    let tpl = BaseTemplate::new(BASE_HTML, ".nav-header { display: flex; }");
    let out = generate(&tpl, &NavConfig::default()).unwrap();
    assert_eq!(out.warnings.len(), 1);
    assert!(out.warnings[0].contains(".profile-image"));

    let err = generate_strict(&tpl, &NavConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StrictWarnings(ref w) if w.len() == 1));
}

#[test]
fn image_inside_link_container_is_dropped_with_warning() {
    let html = r#"<nav class="nav-links"><img class="profile-image"><a href="/">Old</a></nav>"#;
    let out = generate(&BaseTemplate::new(html, ".profile-image { }"), &NavConfig::default()).unwrap();
    assert_eq!(
        out.html,
        r##"<nav class="nav-links"><a href="#">Home</a><a href="#">About</a></nav>"##
    );
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn malformed_templates_are_errors() {
    let unclosed = BaseTemplate::new(r#"<header><nav class="nav-links"></header>"#, "");
    assert!(matches!(
        generate(&unclosed, &NavConfig::default()).unwrap_err().kind,
        ErrorKind::UnclosedElement(_)
    ));

    let bad_css = BaseTemplate::new(BASE_HTML, ".nav-header { display: flex;");
    assert!(matches!(
        generate(&bad_css, &NavConfig::default()).unwrap_err().kind,
        ErrorKind::UnbalancedBrace('{')
    ));
}

#[test]
fn validate_reports_template_warnings() {
    assert!(validate_template(&template()).unwrap().is_empty());
    let no_rule = BaseTemplate::new(BASE_HTML, "");
    assert_eq!(validate_template(&no_rule).unwrap().len(), 1);
}
