use logos::{Lexer, Logos};

/// Top-level tokens of an HTML fragment.
///
/// Start tags carry their parsed attributes; every other token is recovered
/// from its span, so the source text is never copied during lexing.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum HtmlToken {
    #[token("<!--", html_comment)]
    Comment,

    /// `<!DOCTYPE html>` and other markup declarations.
    #[regex(r"<![a-zA-Z][^>]*>")]
    Doctype,

    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*", start_tag)]
    StartTag(StartTag),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n\f]*>", end_tag)]
    EndTag(String),

    #[regex(r"[^<]+")]
    Text,
}

/// A parsed start tag. Names are lowercased; attribute values stay raw.
#[derive(Debug, Clone, PartialEq)]
pub struct StartTag {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Tokens inside a start tag, after the tag name.
///
/// Unquoted values lex as `Name`; a lone `/` before `>` marks a
/// self-closing tag.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AttrToken {
    #[regex(r#"[^ \t\r\n\f"'>=]+"#, |lex| lex.slice().to_string())]
    Name(String),

    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#, unquote)]
    #[regex(r"'[^']*'", unquote)]
    Quoted(String),

    #[token(">")]
    Close,
}

/// Tokens of a stylesheet. Only structure matters here: braces, statement
/// ends, comments and strings (which may contain braces). Everything else
/// is an opaque chunk.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum CssToken {
    #[token("/*", css_comment)]
    Comment,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semicolon,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Str,

    #[regex(r#"[^{};"'/]+"#)]
    #[token("/")]
    Chunk,
}

impl CssToken {
    /// Human-readable name for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            CssToken::Comment => "comment",
            CssToken::LBrace => "'{'",
            CssToken::RBrace => "'}'",
            CssToken::Semicolon => "';'",
            CssToken::Str => "string",
            CssToken::Chunk => "text",
        }
    }
}

/// A token with its source location (byte offset span).
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub token: T,
    pub span: std::ops::Range<usize>,
}

fn unquote(lex: &mut Lexer<AttrToken>) -> String {
    let s = lex.slice();
    s[1..s.len() - 1].to_string()
}

fn html_comment(lex: &mut Lexer<HtmlToken>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

fn css_comment(lex: &mut Lexer<CssToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => false,
    }
}

fn end_tag(lex: &mut Lexer<HtmlToken>) -> String {
    lex.slice()[2..]
        .trim_end_matches('>')
        .trim_end()
        .to_ascii_lowercase()
}

/// Lex the attribute list that follows a tag name, then advance the outer
/// lexer past the closing `>`.
fn start_tag(lex: &mut Lexer<HtmlToken>) -> Option<StartTag> {
    let name = lex.slice()[1..].to_ascii_lowercase();
    let mut attrs = Vec::new();
    let mut pending: Option<String> = None;
    let mut awaiting_value = false;
    let mut trailing_slash = false;

    let mut inner = AttrToken::lexer(lex.remainder());
    while let Some(result) = inner.next() {
        let token = result.ok()?;
        if !matches!(token, AttrToken::Close) {
            trailing_slash = false;
        }
        match token {
            AttrToken::Close => {
                if awaiting_value {
                    return None;
                }
                if let Some(name) = pending.take() {
                    attrs.push(Attribute { name, value: None });
                }
                let consumed = inner.span().end;
                lex.bump(consumed);
                return Some(StartTag {
                    name,
                    attrs,
                    self_closing: trailing_slash,
                });
            }
            AttrToken::Name(text) if awaiting_value => {
                attrs.push(Attribute {
                    name: pending.take()?,
                    value: Some(text),
                });
                awaiting_value = false;
            }
            AttrToken::Name(text) => {
                if let Some(name) = pending.take() {
                    attrs.push(Attribute { name, value: None });
                }
                if text == "/" {
                    trailing_slash = true;
                } else {
                    pending = Some(text.to_ascii_lowercase());
                }
            }
            AttrToken::Eq => {
                if pending.is_none() || awaiting_value {
                    return None;
                }
                awaiting_value = true;
            }
            AttrToken::Quoted(text) => {
                if !awaiting_value {
                    return None;
                }
                attrs.push(Attribute {
                    name: pending.take()?,
                    value: Some(text),
                });
                awaiting_value = false;
            }
        }
    }

    // Ran out of input before `>`.
    None
}
