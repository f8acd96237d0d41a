//! Property values: the leaves that declarations, definitions and mixin
//! arguments are made of.
//!
//! Value nodes are plain `Clone` enums rather than tree nodes; a deep copy of
//! a subtree clones them along with the structural node data.  Commas inside
//! function arguments stay in the list as `Literal(",")` elements, so that an
//! `n`-argument call holds `2n - 1` tokens.

use std::fmt;

use float_cmp::approx_eq;

/// One value inside a property value, a `@def` body, or an argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// An identifier, quoted string, or punctuation token kept verbatim.
    Literal(String),

    /// A number with an optional unit (`1px`, `0.82%`, `42`).
    Numeric(NumericValue),

    /// A hexadecimal color, including the leading `#`.
    HexColor(String),

    /// `name(arguments)`.  An empty name is a parenthesized group.
    Function(FunctionValue),

    /// Comma- or space-joined alternatives (`font-family: a, b`).
    Composite(CompositeValue),

    /// An unresolved reference to a `@def` constant.
    ConstantReference(String),

    /// The `!important` priority marker.
    Priority,
}

#[derive(Debug, Clone)]
pub struct NumericValue {
    pub value: f64,
    pub unit: String,
}

impl NumericValue {
    pub fn new(value: f64, unit: &str) -> NumericValue {
        NumericValue {
            value,
            unit: unit.to_string(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        approx_eq!(f64, self.value, other.value, ulps = 2) && self.unit == other.unit
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    pub name: String,
    pub args: Vec<ValueNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeValue {
    pub values: Vec<ValueNode>,
    pub separator: Separator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Space,
    Comma,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Comma => ",",
        }
    }
}

impl ValueNode {
    pub fn literal(s: &str) -> ValueNode {
        ValueNode::Literal(s.to_string())
    }

    pub fn numeric(value: f64, unit: &str) -> ValueNode {
        ValueNode::Numeric(NumericValue::new(value, unit))
    }

    /// Whether this is a `Literal(",")` separator inside an argument list.
    pub fn is_comma(&self) -> bool {
        matches!(self, ValueNode::Literal(s) if s == ",")
    }

    /// Tight punctuation never gets surrounding whitespace in output.
    fn is_tight_punctuation(&self) -> bool {
        matches!(
            self,
            ValueNode::Literal(s) if matches!(s.as_str(), "," | "/" | ":" | "=" | ";")
        )
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueNode::Literal(ref s) => write!(f, "{s}"),
            ValueNode::Numeric(ref n) => write!(f, "{n}"),
            ValueNode::HexColor(ref s) => write!(f, "{s}"),
            ValueNode::Function(ref fun) => {
                write!(f, "{}({})", fun.name, join_values(&fun.args))
            }
            ValueNode::Composite(ref c) => {
                let parts: Vec<String> = c.values.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(c.separator.as_str()))
            }
            ValueNode::ConstantReference(ref name) => write!(f, "{name}"),
            ValueNode::Priority => write!(f, "!important"),
        }
    }
}

/// Minified serialization of a value list: a single space only where two
/// adjacent values would otherwise juxtapose ambiguously.
pub fn join_values(values: &[ValueNode]) -> String {
    let mut out = String::new();

    for (i, value) in values.iter().enumerate() {
        if i > 0 && needs_space(&values[i - 1], value) {
            out.push(' ');
        }
        out.push_str(&value.to_string());
    }

    out
}

fn needs_space(prev: &ValueNode, next: &ValueNode) -> bool {
    if prev.is_tight_punctuation() || next.is_tight_punctuation() {
        return false;
    }

    // `red!important`, `#fff!important`
    !matches!(next, ValueNode::Priority)
}

/// Minified number formatting: at most `fraction_digits` fractional digits,
/// trailing fractional zeros trimmed, and a bare leading `0` dropped
/// (`0.5px` prints as `.5px`).
pub fn format_number_with_precision(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let mut s = format!("{value:.fraction_digits$}");

    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }

    if let Some(stripped) = s.strip_prefix("0.") {
        s = format!(".{stripped}");
    } else if let Some(stripped) = s.strip_prefix("-0.") {
        s = format!("-.{stripped}");
    }

    if s == "-0" || s.is_empty() {
        s = "0".to_string();
    }

    s
}

pub fn format_number(value: f64) -> String {
    format_number_with_precision(value, 6)
}

/// Calls `f` on every value in `values`, recursing into function arguments
/// and composite alternatives.  Used by the in-place rewriting passes.
pub fn walk_values_mut(values: &mut [ValueNode], f: &mut dyn FnMut(&mut ValueNode)) {
    for value in values {
        f(value);

        match value {
            ValueNode::Function(fun) => walk_values_mut(&mut fun.args, f),
            ValueNode::Composite(c) => walk_values_mut(&mut c.values, f),
            _ => (),
        }
    }
}

/// Immutable counterpart of [`walk_values_mut`].
pub fn walk_values(values: &[ValueNode], f: &mut dyn FnMut(&ValueNode)) {
    for value in values {
        f(value);

        match value {
            ValueNode::Function(fun) => walk_values(&fun.args, f),
            ValueNode::Composite(c) => walk_values(&c.values, f),
            _ => (),
        }
    }
}
