//! Structured model of the base stylesheet.
//!
//! Rules are recorded with byte spans so a rule can be cut out of the source
//! without disturbing the surrounding text.

use std::ops::Range;

use crate::error::{ErrorKind, NavError, Result};
use crate::lexer;
use crate::token::{CssToken, Spanned};

/// At-rules whose block holds nested rules rather than declarations.
const GROUPING_AT_RULES: &[&str] = &["@media", "@supports", "@layer", "@container", "@document"];

#[derive(Debug, Clone)]
pub enum CssNode {
    Style(StyleRule),
    At(AtRule),
}

/// `selector { declarations }`
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: String,
    /// From the first selector byte through the closing brace.
    pub span: Range<usize>,
}

/// `@name prelude;` or `@name prelude { ... }`
#[derive(Debug, Clone)]
pub struct AtRule {
    pub prelude: String,
    pub span: Range<usize>,
    /// Nested rules for grouping at-rules; `None` for statements and for
    /// at-rules whose block is opaque (`@font-face`, `@keyframes`).
    pub children: Option<Vec<CssNode>>,
}

impl AtRule {
    pub fn name(&self) -> &str {
        self.prelude
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct Stylesheet {
    pub rules: Vec<CssNode>,
}

impl Stylesheet {
    /// All style rules in source order, descending into grouping at-rules.
    pub fn style_rules(&self) -> Vec<&StyleRule> {
        fn walk<'a>(nodes: &'a [CssNode], out: &mut Vec<&'a StyleRule>) {
            for node in nodes {
                match node {
                    CssNode::Style(rule) => out.push(rule),
                    CssNode::At(at) => {
                        if let Some(children) = &at.children {
                            walk(children, out);
                        }
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.rules, &mut out);
        out
    }

    /// The first style rule that sizes elements with `class`.
    ///
    /// Matches a single selector whose last compound is exactly `.class`,
    /// such as `.profile-image` or `.nav-header .profile-image`.
    pub fn find_class_rule(&self, class: &str) -> Option<&StyleRule> {
        self.style_rules()
            .into_iter()
            .find(|rule| selector_targets_class(&rule.selector, class))
    }
}

fn selector_targets_class(selector: &str, class: &str) -> bool {
    if selector.contains(',') {
        return false;
    }
    let normalized = selector.split_whitespace().collect::<Vec<_>>().join(" ");
    let target = format!(".{class}");
    normalized == target || normalized.ends_with(&format!(" {target}"))
}

/// Parse a stylesheet into its rule tree.
pub fn parse(source: &str) -> Result<Stylesheet> {
    let tokens = lexer::lex_css(source)?;
    let mut parser = RuleParser {
        source,
        tokens,
        pos: 0,
    };
    let rules = parser.parse_block(false)?;
    Ok(Stylesheet { rules })
}

struct RuleParser<'a> {
    source: &'a str,
    tokens: Vec<Spanned<CssToken>>,
    pos: usize,
}

impl<'a> RuleParser<'a> {
    fn peek(&self) -> Option<&Spanned<CssToken>> {
        self.tokens.get(self.pos)
    }

    /// Parse rules until `}` (when `nested`) or end of input.
    fn parse_block(&mut self, nested: bool) -> Result<Vec<CssNode>> {
        let mut nodes = Vec::new();
        let mut prelude_start: Option<usize> = None;

        while let Some(tok) = self.peek().cloned() {
            self.pos += 1;
            match tok.token {
                CssToken::Comment => {}
                CssToken::Chunk | CssToken::Str => {
                    if prelude_start.is_none() {
                        let text = &self.source[tok.span.clone()];
                        let leading = text.len() - text.trim_start().len();
                        if leading < text.len() {
                            prelude_start = Some(tok.span.start + leading);
                        }
                    }
                }
                CssToken::Semicolon => {
                    if let Some(start) = prelude_start.take() {
                        let prelude = self.source[start..tok.span.start].trim().to_string();
                        nodes.push(CssNode::At(AtRule {
                            prelude,
                            span: start..tok.span.end,
                            children: None,
                        }));
                    }
                }
                CssToken::LBrace => {
                    let start = prelude_start.take().unwrap_or(tok.span.start);
                    let prelude = self.source[start..tok.span.start].trim().to_string();
                    nodes.push(self.parse_rule(start, prelude)?);
                }
                CssToken::RBrace => {
                    if nested {
                        return Ok(nodes);
                    }
                    return Err(NavError::at(ErrorKind::UnbalancedBrace('}'), tok.span));
                }
            }
        }

        if nested {
            return Err(ErrorKind::UnbalancedBrace('{').into());
        }
        Ok(nodes)
    }

    /// Parse the block of a rule whose `{` was just consumed.
    fn parse_rule(&mut self, start: usize, prelude: String) -> Result<CssNode> {
        if !prelude.starts_with('@') {
            let end = self.skip_block(start)?;
            return Ok(CssNode::Style(StyleRule {
                selector: prelude,
                span: start..end,
            }));
        }

        let name = prelude
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();
        if GROUPING_AT_RULES.contains(&name.as_str()) {
            let children = self.parse_block(true)?;
            let end = self.tokens[self.pos - 1].span.end;
            Ok(CssNode::At(AtRule {
                prelude,
                span: start..end,
                children: Some(children),
            }))
        } else {
            let end = self.skip_block(start)?;
            Ok(CssNode::At(AtRule {
                prelude,
                span: start..end,
                children: None,
            }))
        }
    }

    /// Skip to the `}` matching an already-consumed `{`, returning the byte
    /// offset just past it.
    fn skip_block(&mut self, start: usize) -> Result<usize> {
        let mut depth = 1usize;
        while let Some(tok) = self.peek() {
            let span = tok.span.clone();
            let token = tok.token;
            self.pos += 1;
            match token {
                CssToken::LBrace => depth += 1,
                CssToken::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(span.end);
                    }
                }
                _ => {}
            }
        }
        Err(NavError::at(
            ErrorKind::UnbalancedBrace('{'),
            start..self.source.len(),
        ))
    }
}
