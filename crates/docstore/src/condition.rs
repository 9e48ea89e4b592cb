//! Condition expression building.
//!
//! Pure data transformation, no I/O. A [`Condition`] is an ordered list
//! of `(attribute, comparator, value)` clauses that renders to a single
//! AND-chained expression string plus the two placeholder binding maps
//! DynamoDB requires, since raw attribute names and values may not be
//! embedded in expression text. There is no OR, nesting, or precedence
//! grouping.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::error::{Result, StoreError};

/// Comparison operator for a single condition clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    /// The DynamoDB expression symbol for this comparator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "<>",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
        }
    }

    /// Parse a comparator from its expression symbol.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "=" | "==" => Some(Comparator::Eq),
            "<>" | "!=" => Some(Comparator::Ne),
            "<" => Some(Comparator::Lt),
            "<=" => Some(Comparator::Le),
            ">" => Some(Comparator::Gt),
            ">=" => Some(Comparator::Ge),
            _ => None,
        }
    }
}

/// An ordered AND-chain of comparison clauses.
///
/// Clause order is insertion order, so the rendered expression is
/// deterministic for a given build sequence.
#[derive(Debug, Clone, Default)]
pub struct Condition {
    clauses: Vec<(String, Comparator, AttributeValue)>,
}

/// A rendered condition: expression text plus placeholder bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltCondition {
    /// Expression string, e.g. `#c0 = :c0 AND #c1 > :c1`.
    pub expression: String,
    /// Placeholder name -> real attribute name (`#c0` -> `id`).
    pub names: HashMap<String, String>,
    /// Placeholder value name -> attribute value (`:c0` -> value).
    pub values: HashMap<String, AttributeValue>,
}

impl Condition {
    /// An empty condition with no clauses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one comparison clause.
    pub fn clause(
        mut self,
        attribute: impl Into<String>,
        comparator: Comparator,
        value: AttributeValue,
    ) -> Self {
        self.clauses.push((attribute.into(), comparator, value));
        self
    }

    /// Build a condition from the two parallel mappings: comparison
    /// values and comparators, keyed by attribute name.
    ///
    /// Clause order follows the iteration order of `values`. Fails with
    /// [`StoreError::MissingComparator`] when an attribute in `values`
    /// has no entry in `comparators`.
    pub fn from_parts(
        values: impl IntoIterator<Item = (String, AttributeValue)>,
        comparators: &HashMap<String, Comparator>,
    ) -> Result<Self> {
        let mut condition = Self::new();
        for (attribute, value) in values {
            let comparator =
                comparators
                    .get(&attribute)
                    .copied()
                    .ok_or_else(|| StoreError::MissingComparator {
                        attribute: attribute.clone(),
                    })?;
            condition.clauses.push((attribute, comparator, value));
        }
        Ok(condition)
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// True when no clauses have been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render the expression string and placeholder binding maps.
    ///
    /// Clause `i` uses placeholders `#ci` and `:ci`; N clauses produce
    /// N-1 ` AND ` separators and N entries in each binding map.
    pub fn build(&self) -> BuiltCondition {
        let mut expression = String::new();
        let mut names = HashMap::with_capacity(self.clauses.len());
        let mut values = HashMap::with_capacity(self.clauses.len());

        for (i, (attribute, comparator, value)) in self.clauses.iter().enumerate() {
            let name_placeholder = format!("#c{}", i);
            let value_placeholder = format!(":c{}", i);

            if i > 0 {
                expression.push_str(" AND ");
            }
            expression.push_str(&format!(
                "{} {} {}",
                name_placeholder,
                comparator.symbol(),
                value_placeholder
            ));

            names.insert(name_placeholder, attribute.clone());
            values.insert(value_placeholder, value.clone());
        }

        BuiltCondition {
            expression,
            names,
            values,
        }
    }
}
