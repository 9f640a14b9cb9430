//! Database type to Go type mappings.
//!
//! # Architecture
//!
//! Mapping is driven by [`TYPE_RULES`], an ordered table of
//! `(matcher, non-null type, nullable type)` entries. Rules are evaluated in
//! order and the first match wins. A raw type that matches no rule yields
//! `None`; the caller decides whether that is an error or a pass-through.
//!
//! Nullable columns map to the wrapper types of `gopkg.in/guregu/null`.

use std::fmt;

/// Go types emitted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoType {
    String,
    TimePtr,
    Int64,
    Float64,
    Bool,
    NullString,
    NullTime,
    NullInt,
    NullFloat,
    NullBool,
}

impl GoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::TimePtr => "*time.Time",
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::NullString => "null.String",
            Self::NullTime => "null.Time",
            Self::NullInt => "null.Int",
            Self::NullFloat => "null.Float",
            Self::NullBool => "null.Bool",
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule tests the raw data type.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Raw type equals one of the names.
    Exact(&'static [&'static str]),
    /// Raw type contains one of the fragments.
    Contains(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, data_type: &str) -> bool {
        match self {
            Self::Exact(names) => names.iter().any(|n| *n == data_type),
            Self::Contains(fragments) => fragments.iter().any(|f| data_type.contains(f)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    pub matcher: Matcher,
    pub non_null: GoType,
    pub nullable: GoType,
}

impl TypeRule {
    const fn new(matcher: Matcher, non_null: GoType, nullable: GoType) -> Self {
        Self {
            matcher,
            non_null,
            nullable,
        }
    }

    pub fn target(&self, nullable: bool) -> GoType {
        if nullable { self.nullable } else { self.non_null }
    }
}

/// Mapping rules in priority order.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule::new(Matcher::Exact(&["enum"]), GoType::String, GoType::NullString),
    TypeRule::new(Matcher::Exact(&["date"]), GoType::String, GoType::NullString),
    TypeRule::new(
        Matcher::Exact(&["datetime", "time"]),
        GoType::TimePtr,
        GoType::NullTime,
    ),
    TypeRule::new(Matcher::Contains(&["int"]), GoType::Int64, GoType::NullInt),
    TypeRule::new(
        Matcher::Contains(&["decimal"]),
        GoType::Float64,
        GoType::NullFloat,
    ),
    TypeRule::new(Matcher::Contains(&["boolean"]), GoType::Bool, GoType::NullBool),
    TypeRule::new(
        Matcher::Contains(&["char", "text"]),
        GoType::String,
        GoType::NullString,
    ),
];

/// Map a raw data type to a Go type, or `None` if no rule matches.
pub fn map_type(data_type: &str, nullable: bool) -> Option<GoType> {
    TYPE_RULES
        .iter()
        .find(|rule| rule.matcher.matches(data_type))
        .map(|rule| rule.target(nullable))
}
