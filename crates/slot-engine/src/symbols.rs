//! Symbol definitions and matching

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reel symbol or a pattern element of a pay rule.
///
/// Reels hold `Plain` symbols. The other variants only make sense inside rule
/// patterns, where they act as matchers against whatever was drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum Symbol {
    /// Regular symbol, matches the same name
    Plain(String),
    /// Matches every drawn symbol
    Wildcard,
    /// Matches every drawn symbol except the named one
    Negation(String),
    /// Matches the named symbol; only counted by scatter rules
    Scatter(String),
}

impl Symbol {
    /// Create a plain symbol
    pub fn plain(name: impl Into<String>) -> Self {
        Symbol::Plain(name.into())
    }

    /// Negated form of `base`
    pub fn not(base: &Symbol) -> Self {
        Symbol::Negation(base.name().to_string())
    }

    /// Scatter form of `base`
    pub fn scatter(base: &Symbol) -> Self {
        Symbol::Scatter(base.name().to_string())
    }

    /// Symbol name (the base name for negation and scatter)
    pub fn name(&self) -> &str {
        match self {
            Symbol::Plain(name) | Symbol::Negation(name) | Symbol::Scatter(name) => name,
            Symbol::Wildcard => "Any",
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Symbol::Wildcard)
    }

    pub fn is_scatter(&self) -> bool {
        matches!(self, Symbol::Scatter(_))
    }

    /// Check if this is a special matcher (wildcard, negation, scatter)
    pub fn is_special(&self) -> bool {
        !matches!(self, Symbol::Plain(_))
    }

    /// Whether this pattern element accepts `drawn`. Same as
    /// [`matches(drawn, self)`](matches).
    pub fn accepts(&self, drawn: &Symbol) -> bool {
        matches(drawn, self)
    }
}

/// Match a drawn symbol against a rule's pattern element.
///
/// The relation is one-directional: `drawn` always comes off a reel and
/// `pattern` always comes from a rule. `matches(A, Wildcard)` holds, but a
/// drawn wildcard is just a symbol named "Any".
pub fn matches(drawn: &Symbol, pattern: &Symbol) -> bool {
    match pattern {
        Symbol::Plain(name) | Symbol::Scatter(name) => drawn.name() == name,
        Symbol::Wildcard => true,
        Symbol::Negation(name) => drawn.name() != name,
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Plain(name) => write!(f, "{name}"),
            Symbol::Wildcard => write!(f, "*"),
            Symbol::Negation(name) => write!(f, "#{name}"),
            Symbol::Scatter(name) => write!(f, "{name}.s"),
        }
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::plain(name)
    }
}
