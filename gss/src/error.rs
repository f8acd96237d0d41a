//! Error types and the error manager.

use std::error;
use std::fmt;

use cssparser::{BasicParseError, BasicParseErrorKind};

/// A short-lived error from the CSS tokenizer layer.
///
/// The lifetime of the error is the same as the `cssparser::ParserInput` that
/// was used to create a `cssparser::Parser`, i.e. the lifetime of the string
/// data being parsed.  Long-lived diagnostics are [`GssError`].
pub type ParseError<'i> = cssparser::ParseError<'i, ValueErrorKind>;

/// A simple error which refers to a value that could not be handled
#[derive(Debug, Clone)]
pub enum ValueErrorKind {
    /// The value could not be parsed
    Parse(String),

    // The value could be parsed, but is invalid
    Value(String),
}

impl ValueErrorKind {
    pub fn parse_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Parse(s.to_string())
    }

    pub fn value_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Value(s.to_string())
    }
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueErrorKind::Parse(ref s) => write!(f, "parse error: {s}"),

            ValueErrorKind::Value(ref s) => write!(f, "invalid value: {s}"),
        }
    }
}

impl<'a> From<BasicParseError<'a>> for ValueErrorKind {
    fn from(e: BasicParseError<'_>) -> ValueErrorKind {
        let BasicParseError { kind, .. } = e;

        let msg = match kind {
            BasicParseErrorKind::UnexpectedToken(_) => "unexpected token",
            BasicParseErrorKind::EndOfInput => "unexpected end of input",
            BasicParseErrorKind::AtRuleInvalid(_) => "invalid @-rule",
            BasicParseErrorKind::AtRuleBodyInvalid => "invalid @-rule body",
            BasicParseErrorKind::QualifiedRuleInvalid => "invalid qualified rule",
        };

        ValueErrorKind::parse_error(msg)
    }
}

/// A position in one of the compilation's input sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// File name of the source, as given in the job description.
    pub source: String,

    /// 0-based line number, as reported by the tokenizer.
    pub line: u32,

    /// 0-based column number.
    pub column: u32,

    /// Byte offset into the source; used to attach marked comments.
    pub offset: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line + 1, self.column)
    }
}

/// A single user-facing diagnostic with an optional source location.
///
/// Passes do not throw for expected stylesheet-level problems; they build one
/// of these and hand it to the [`ErrorManager`].
#[derive(Debug, Clone)]
pub struct GssError {
    pub message: String,
    pub location: Option<Location>,
}

impl GssError {
    pub fn new(message: impl Into<String>, location: Option<Location>) -> GssError {
        GssError {
            message: message.into(),
            location,
        }
    }
}

impl fmt::Display for GssError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(ref loc) => write!(f, "{}: {}", loc, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Collects the errors and warnings produced during a compilation.
///
/// The driver consults [`ErrorManager::has_errors`] after each pass; passes
/// report and continue, so a single run can surface multiple diagnostics.
#[derive(Debug, Default)]
pub struct ErrorManager {
    errors: Vec<GssError>,
    warnings: Vec<GssError>,
}

impl ErrorManager {
    pub fn new() -> ErrorManager {
        ErrorManager::default()
    }

    pub fn report(&mut self, error: GssError) {
        self.errors.push(error);
    }

    pub fn report_warning(&mut self, warning: GssError) {
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[GssError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[GssError] {
        &self.warnings
    }

    pub fn into_parts(self) -> (Vec<GssError>, Vec<GssError>) {
        (self.errors, self.warnings)
    }
}

/// The error returned from a failed compilation.
///
/// Holds every diagnostic the error manager accumulated, in document order.
#[derive(Debug, Clone)]
pub struct CompileError {
    errors: Vec<GssError>,
}

impl CompileError {
    pub fn new(errors: Vec<GssError>) -> CompileError {
        CompileError { errors }
    }

    pub fn errors(&self) -> &[GssError] {
        &self.errors
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "compilation failed"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                writeln!(f, "{n} errors:")?;
                for e in &self.errors {
                    writeln!(f, "  {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl error::Error for CompileError {}

/// Error for a compilation cancelled through the caller's exit predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compilation cancelled")
    }
}

impl From<Cancelled> for CompileError {
    fn from(_: Cancelled) -> CompileError {
        CompileError::new(vec![GssError::new("compilation cancelled", None)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_errors_and_warnings() {
        let mut em = ErrorManager::new();
        assert!(!em.has_errors());

        em.report_warning(GssError::new("meh", None));
        assert!(!em.has_errors());

        em.report(GssError::new("bad", None));
        assert!(em.has_errors());
        assert_eq!(em.errors().len(), 1);
        assert_eq!(em.warnings().len(), 1);
    }

    #[test]
    fn formats_location() {
        let err = GssError::new(
            "undefined constant \"X\"",
            Some(Location {
                source: "a.gss".to_string(),
                line: 2,
                column: 5,
                offset: 40,
            }),
        );

        assert_eq!(format!("{err}"), "a.gss:3:5: undefined constant \"X\"");
    }
}
