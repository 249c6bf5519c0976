//! Built-in operators and the name-to-parser registry.

pub(crate) mod assertion;
pub(crate) mod coercion;
pub(crate) mod collator;
pub(crate) mod comparison;
pub(crate) mod feature_data;
pub(crate) mod get;
pub(crate) mod index_of;
pub(crate) mod interpolate;
pub(crate) mod let_binding;
pub(crate) mod literal;
pub(crate) mod var;
pub(crate) mod zoom;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde_json::Value as Json;

use crate::expression::Expression;
use crate::expression::parsing_context::ParsingContext;

/// Parser for one operator. Receives the whole raw array, operator name included.
pub type ParseFn = fn(&[Json], &mut ParsingContext<'_>) -> Option<Box<dyn Expression>>;

/// Operator name to parser.
#[derive(Clone)]
pub struct Registry {
    parsers: HashMap<String, ParseFn>,
}

impl Registry {
    /// A registry with no operators.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// A fresh registry holding every built-in operator.
    pub fn with_standard_operators() -> Self {
        let mut r = Self::empty();
        r.register("literal", literal::Literal::parse)
            .register("var", var::Var::parse)
            .register("let", let_binding::Let::parse)
            .register("index-of", index_of::IndexOf::parse)
            .register("get", get::Get::parse)
            .register("zoom", zoom::Zoom::parse)
            .register("collator", collator::CollatorExpression::parse)
            .register("resolved-locale", collator::ResolvedLocale::parse)
            .register("interpolate", interpolate::Interpolate::parse)
            .register("interpolate-hcl", interpolate::Interpolate::parse)
            .register("interpolate-lab", interpolate::Interpolate::parse);
        for op in comparison::OPERATORS {
            r.register(*op, comparison::Comparison::parse);
        }
        for op in feature_data::OPERATORS {
            r.register(*op, feature_data::FeatureData::parse);
        }
        for op in assertion::OPERATORS {
            r.register(*op, assertion::Assertion::parse);
        }
        r
    }

    /// Shared registry of built-in operators.
    pub fn standard() -> &'static Registry {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(Self::with_standard_operators)
    }

    /// Add or replace the parser for `name`.
    pub fn register(&mut self, name: impl Into<String>, parse: ParseFn) -> &mut Self {
        self.parsers.insert(name.into(), parse);
        self
    }

    /// Parser registered for `name`.
    pub fn get(&self, name: &str) -> Option<ParseFn> {
        self.parsers.get(name).copied()
    }

    /// Registered operator names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_standard_operators()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("operators", &self.names())
            .finish()
    }
}
