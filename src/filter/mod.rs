// src/filter/mod.rs

//! Path based element filters
//!
//! A filter is an ordered list of criteria of the form `<path>=<value>`.
//! Paths address attributes inside a scope payload, e.g.
//! `/unmanaged_files/files/name`. An element is excluded when one of its
//! attributes equals a value given for that attribute's path.
//!
//! ```text
//! /unmanaged_files/files/name=/tmp
//! \_________________________/ \__/
//!            path             value
//! ```

mod defaults;

pub use defaults::{DEFAULT_INSPECT_CRITERIA, default_inspect_filter};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::scope::Scope;

/// Comparison applied between an attribute and a criterion value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Equals,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
        }
    }
}

/// A single `path=value` rule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Criterion {
    pub path: String,
    pub operator: Operator,
    pub value: String,
}

impl FromStr for Criterion {
    type Err = Error;

    /// Split at the first `=`; the value may itself contain `=`
    fn from_str(s: &str) -> Result<Self> {
        let (path, value) = s
            .split_once('=')
            .ok_or_else(|| Error::InvalidFilter(s.to_string()))?;
        Ok(Self {
            path: path.to_string(),
            operator: Operator::Equals,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.path, self.operator.as_str(), self.value)
    }
}

/// All matchers of a filter for one path, grouped by operator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementFilter {
    pub path: String,
    pub matchers: BTreeMap<Operator, Vec<String>>,
}

impl ElementFilter {
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Values excluded by equality
    pub fn equals(&self) -> &[String] {
        self.matchers
            .get(&Operator::Equals)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    criteria: Vec<Criterion>,
}

impl Filter {
    /// Create an empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from criterion strings, in order
    pub fn parse<I, S>(definitions: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for definition in definitions {
            filter.add_criterion(definition.as_ref())?;
        }
        Ok(filter)
    }

    /// Parse and append one `path=value` criterion
    pub fn add_criterion(&mut self, text: &str) -> Result<()> {
        let criterion = text.parse::<Criterion>()?;
        debug!("Adding filter criterion {}", criterion);
        self.criteria.push(criterion);
        Ok(())
    }

    /// Criteria in insertion order, in their textual form
    pub fn criteria(&self) -> Vec<String> {
        self.criteria.iter().map(Criterion::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Matchers for exactly `path`
    pub fn element_filter_for(&self, path: &str) -> ElementFilter {
        let mut element = ElementFilter {
            path: path.to_string(),
            matchers: BTreeMap::new(),
        };
        for criterion in self.criteria.iter().filter(|c| c.path == path) {
            element
                .matchers
                .entry(criterion.operator)
                .or_default()
                .push(criterion.value.clone());
        }
        element
    }

    /// Whether an attribute at `path` with `value` is excluded
    pub fn matches(&self, path: &str, value: &str) -> bool {
        self.criteria.iter().any(|c| {
            c.path == path && match c.operator {
                Operator::Equals => c.value == value,
            }
        })
    }

    /// Criteria whose path lies inside one of `scopes`, in order
    pub fn criteria_for_scopes(&self, scopes: &[Scope]) -> Vec<String> {
        self.criteria
            .iter()
            .filter(|c| {
                scopes.iter().any(|scope| {
                    let root = scope.filter_root();
                    c.path == root
                        || c.path
                            .strip_prefix(&root)
                            .is_some_and(|rest| rest.starts_with('/'))
                })
            })
            .map(Criterion::to_string)
            .collect()
    }

    /// Remove excluded elements from a scope payload
    ///
    /// Array elements are objects whose string attributes are checked
    /// against the path of the array plus the attribute name. Returns how
    /// many elements were removed.
    pub fn apply(&self, scope: Scope, payload: &mut Value) -> usize {
        if self.criteria.is_empty() {
            return 0;
        }
        let removed = self.prune(&scope.filter_root(), payload);
        if removed > 0 {
            debug!("Filter removed {} element(s) from scope {}", removed, scope);
        }
        removed
    }

    fn prune(&self, path: &str, value: &mut Value) -> usize {
        match value {
            Value::Object(map) => map
                .iter_mut()
                .map(|(key, child)| self.prune(&format!("{}/{}", path, key), child))
                .sum(),
            Value::Array(elements) => {
                let before = elements.len();
                elements.retain(|element| !self.excludes(path, element));
                let mut removed = before - elements.len();
                for element in elements.iter_mut() {
                    removed += self.prune(path, element);
                }
                removed
            }
            _ => 0,
        }
    }

    fn excludes(&self, path: &str, element: &Value) -> bool {
        let Value::Object(attributes) = element else {
            return false;
        };
        attributes.iter().any(|(key, attribute)| {
            attribute
                .as_str()
                .is_some_and(|s| self.matches(&format!("{}/{}", path, key), s))
        })
    }
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse([s])
    }
}
