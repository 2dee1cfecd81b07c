use logos::Logos;

use crate::error::{ErrorKind, NavError, Result};
use crate::token::{CssToken, HtmlToken, Spanned};

/// Elements whose content is raw text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Tokenize an HTML fragment into a vector of spanned tokens.
pub fn lex_html(source: &str) -> Result<Vec<Spanned<HtmlToken>>> {
    let mut tokens = Vec::new();
    let mut lexer = HtmlToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let token = match result {
            Ok(token) => token,
            Err(()) => return Err(markup_error(source, span)),
        };

        // `<script>` and friends may contain `<` freely; consume their body
        // as a single text token so the main lexer never sees it.
        let raw_text_end = match &token {
            HtmlToken::StartTag(tag)
                if !tag.self_closing && RAW_TEXT_ELEMENTS.contains(&tag.name.as_str()) =>
            {
                let closing = format!("</{}", tag.name);
                let body = lexer.remainder();
                match body.to_ascii_lowercase().find(&closing) {
                    Some(len) => Some(len),
                    None => {
                        return Err(NavError::at(
                            ErrorKind::UnclosedElement(tag.name.clone()),
                            span,
                        ))
                    }
                }
            }
            _ => None,
        };

        let body_start = span.end;
        tokens.push(Spanned { token, span });

        if let Some(len) = raw_text_end {
            if len > 0 {
                tokens.push(Spanned {
                    token: HtmlToken::Text,
                    span: body_start..body_start + len,
                });
                lexer.bump(len);
            }
        }
    }

    Ok(tokens)
}

/// Tokenize a stylesheet into a vector of spanned tokens.
pub fn lex_css(source: &str) -> Result<Vec<Spanned<CssToken>>> {
    let mut tokens = Vec::new();
    let mut lexer = CssToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => {
                let fragment = &source[span.clone()];
                let kind = if fragment.starts_with("/*") {
                    ErrorKind::UnterminatedComment
                } else {
                    ErrorKind::UnrecognizedMarkup(fragment.to_string())
                };
                return Err(NavError::at(kind, span));
            }
        }
    }

    Ok(tokens)
}

fn markup_error(source: &str, span: std::ops::Range<usize>) -> NavError {
    let fragment = &source[span.clone()];
    if fragment.starts_with("<!--") {
        return NavError::at(ErrorKind::UnterminatedComment, span);
    }
    // Keep the excerpt short; an unterminated tag can swallow the rest of
    // the document.
    let excerpt: String = fragment.chars().take(24).collect();
    NavError::at(ErrorKind::UnrecognizedMarkup(excerpt), span)
}
