//! Representation of selectors as sequences of refinements.
//!
//! This compiler never matches selectors against an element tree; it only
//! rewrites them (splitting, merging, class renaming) and prints them back.
//! So instead of a full matching-engine representation, a selector is a flat
//! sequence of refinements that serializes to exactly the minified text the
//! printer needs.

use std::cmp::Ordering;
use std::fmt;

/// One selector out of a ruleset's selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub refinements: Vec<Refinement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refinement {
    /// A type selector (`div`).
    Type(String),

    /// The universal selector (`*`).
    Universal,

    /// A class selector without the leading dot.
    Class(String),

    /// An id selector without the leading `#`.
    Id(String),

    /// `:name` or `:name(args)`, stored as raw text after the colon.
    PseudoClass(String),

    /// `::name`, stored as raw text after the double colon.
    PseudoElement(String),

    /// `[attr=value]`, stored as the raw text between the brackets.
    Attribute(String),

    Combinator(Combinator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

impl Selector {
    pub fn new(refinements: Vec<Refinement>) -> Selector {
        Selector { refinements }
    }

    /// Selector with a single type refinement; used by tests and synthesized
    /// rulesets.
    pub fn of_type(name: &str) -> Selector {
        Selector::new(vec![Refinement::Type(name.to_string())])
    }
}

impl fmt::Display for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Refinement::Type(ref name) => write!(f, "{name}"),
            Refinement::Universal => write!(f, "*"),
            Refinement::Class(ref name) => write!(f, ".{name}"),
            Refinement::Id(ref name) => write!(f, "#{name}"),
            Refinement::PseudoClass(ref text) => write!(f, ":{text}"),
            Refinement::PseudoElement(ref text) => write!(f, "::{text}"),
            Refinement::Attribute(ref text) => write!(f, "[{text}]"),
            Refinement::Combinator(Combinator::Descendant) => write!(f, " "),
            Refinement::Combinator(Combinator::Child) => write!(f, ">"),
            Refinement::Combinator(Combinator::NextSibling) => write!(f, "+"),
            Refinement::Combinator(Combinator::SubsequentSibling) => write!(f, "~"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.refinements {
            write!(f, "{r}")?;
        }
        Ok(())
    }
}

// Selectors are comparable by their stringified form; the merge passes use
// this to order merged selector lists deterministically.
impl PartialOrd for Selector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Selector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

/// Joins a selector list the way the compact printer prints it.
pub fn join_selectors(selectors: &[Selector]) -> String {
    let strings: Vec<String> = selectors.iter().map(ToString::to_string).collect();
    strings.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_refinements() {
        let sel = Selector::new(vec![
            Refinement::Type("ul".to_string()),
            Refinement::Combinator(Combinator::Child),
            Refinement::Type("li".to_string()),
            Refinement::Class("item".to_string()),
            Refinement::PseudoClass("hover".to_string()),
        ]);
        assert_eq!(sel.to_string(), "ul>li.item:hover");
    }

    #[test]
    fn descendant_combinator_is_a_single_space() {
        let sel = Selector::new(vec![
            Refinement::Id("nav".to_string()),
            Refinement::Combinator(Combinator::Descendant),
            Refinement::Universal,
        ]);
        assert_eq!(sel.to_string(), "#nav *");
    }

    #[test]
    fn orders_by_stringified_form() {
        let mut sels = vec![
            Selector::of_type("c"),
            Selector::of_type("a"),
            Selector::of_type("b"),
        ];
        sels.sort();
        assert_eq!(join_selectors(&sels), "a,b,c");
    }
}
