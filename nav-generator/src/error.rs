use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

/// All errors produced by the navigation generator.
#[derive(Debug)]
pub struct NavError {
    pub kind: ErrorKind,
    pub span: Option<Range<usize>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Lexer hit markup it cannot tokenize (stray `<`, unterminated tag).
    #[error("unrecognized markup: {0}")]
    UnrecognizedMarkup(String),
    /// `<!--` or `/*` without its terminator.
    #[error("unterminated comment")]
    UnterminatedComment,
    /// Closing tag with no matching open element.
    #[error("unexpected closing tag </{0}>")]
    UnexpectedEndTag(String),
    /// Element left open where its end tag is required.
    #[error("element <{0}> is never closed")]
    UnclosedElement(String),
    /// Stylesheet braces do not pair up.
    #[error("unbalanced '{0}' in stylesheet")]
    UnbalancedBrace(char),
    /// The base template lacks an element carrying a marker class.
    #[error("base template has no {element} with class \"{class}\"")]
    MissingMarker {
        element: &'static str,
        class: &'static str,
    },
    /// Strict generation refuses output that produced warnings.
    #[error("{} warning(s) in strict mode: {}", .0.len(), .0.join("; "))]
    StrictWarnings(Vec<String>),
    #[error("unknown configuration field: {0}")]
    UnknownField(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },
    #[error("link index {index} out of range ({len} link(s) configured)")]
    LinkIndexOutOfRange { index: usize, len: usize },
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(span) = &self.span {
            write!(f, " (at byte {}..{})", span.start, span.end)?;
        }

        Ok(())
    }
}

impl std::error::Error for NavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<ErrorKind> for NavError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, span: None }
    }
}

impl From<serde_json::Error> for NavError {
    fn from(e: serde_json::Error) -> Self {
        ErrorKind::Json(e).into()
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

/// Shorthand constructors.
impl NavError {
    pub fn at(kind: ErrorKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span: Some(span),
        }
    }

    pub fn missing_marker(element: &'static str, class: &'static str) -> Self {
        ErrorKind::MissingMarker { element, class }.into()
    }

    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        ErrorKind::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ErrorKind::Io {
            path: path.into(),
            source,
        }
        .into()
    }
}
