//! Filter expressions over data fields
//!
//! A [`Filter`] is an inspectable expression tree, not a closure. Before any
//! scan it is bound against the collection schema with [`Filter::bind`],
//! which rejects:
//!
//! - fields the schema does not declare
//! - fields that are not indexed
//! - literals the field could never hold (e.g. a string literal on an int field)
//! - comparisons on booleans or against `Null`
//!
//! The resulting [`BoundFilter`] evaluates against records of that schema.
//!
//! ## Equality
//!
//! - Values of different types never match, except that an `Int` literal on a
//!   `Float` field is widened to `f64` at bind time
//! - Float equality is IEEE-754 (`NaN` matches nothing)
//! - A `Null` record value matches only a `Null` literal
//! - Comparisons against a `Null` record value are false

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use stratavec_core::{CollectionSchema, FieldType, FieldValue, Record, VectorError, VectorResult};

/// Comparison operator for [`Filter::Cmp`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmpOp {
    /// `field < value`
    Lt,
    /// `field <= value`
    Le,
    /// `field > value`
    Gt,
    /// `field >= value`
    Ge,
}

impl CmpOp {
    fn accepts(&self, ordering: Ordering) -> bool {
        match self {
            CmpOp::Lt => ordering == Ordering::Less,
            CmpOp::Le => ordering != Ordering::Greater,
            CmpOp::Gt => ordering == Ordering::Greater,
            CmpOp::Ge => ordering != Ordering::Less,
        }
    }
}

/// Filter expression over a record's data fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Exact match: `record[field] == value`
    Eq {
        /// Data field name
        field: String,
        /// Value to match
        value: FieldValue,
    },
    /// Ordered comparison: `record[field] <op> value`
    Cmp {
        /// Data field name
        field: String,
        /// Operator
        op: CmpOp,
        /// Right-hand side
        value: FieldValue,
    },
    /// AND of multiple filters (empty = matches all)
    And(Vec<Filter>),
    /// OR of multiple filters (empty = matches none)
    Or(Vec<Filter>),
    /// NOT of a filter
    Not(Box<Filter>),
}

impl Filter {
    /// `field == value`
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::cmp(field, CmpOp::Lt, value)
    }

    /// `field <= value`
    pub fn le(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::cmp(field, CmpOp::Le, value)
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::cmp(field, CmpOp::Gt, value)
    }

    /// `field >= value`
    pub fn ge(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::cmp(field, CmpOp::Ge, value)
    }

    fn cmp(field: impl Into<String>, op: CmpOp, value: impl Into<FieldValue>) -> Self {
        Filter::Cmp {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// AND of the given filters
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// OR of the given filters
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Negation of a filter
    #[allow(clippy::should_implement_trait)]
    pub fn not(filter: Filter) -> Self {
        Filter::Not(Box::new(filter))
    }

    /// Append an equality condition with AND semantics
    pub fn and_eq(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let next = Filter::eq(field, value);
        match self {
            Filter::And(mut all) => {
                all.push(next);
                Filter::And(all)
            }
            other => Filter::And(vec![other, next]),
        }
    }

    /// Names of every field this filter references, in tree order
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Filter::Eq { field, .. } | Filter::Cmp { field, .. } => out.push(field),
            Filter::And(all) | Filter::Or(all) => all.iter().for_each(|f| f.collect_fields(out)),
            Filter::Not(inner) => inner.collect_fields(out),
        }
    }

    /// Validate against a schema and produce an evaluable filter
    ///
    /// # Errors
    /// - `InvalidFilterField` for unknown or unindexed fields, and for
    ///   literals incompatible with the field's type
    pub fn bind(&self, schema: &CollectionSchema) -> VectorResult<BoundFilter> {
        Ok(BoundFilter {
            node: bind_node(self, schema)?,
        })
    }
}

/// A filter validated against a schema
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFilter {
    node: Node,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Eq { field: String, value: FieldValue },
    Cmp { field: String, op: CmpOp, value: FieldValue },
    And(Vec<Node>),
    Or(Vec<Node>),
    Not(Box<Node>),
}

impl BoundFilter {
    /// Evaluate against a record
    ///
    /// AND and OR short-circuit. A field absent from the record never matches.
    pub fn matches(&self, record: &Record) -> bool {
        eval(&self.node, record)
    }
}

fn eval(node: &Node, record: &Record) -> bool {
    match node {
        Node::Eq { field, value } => match record.field(field) {
            Some(actual) if value.is_null() => actual.is_null(),
            Some(actual) => actual == value,
            None => false,
        },
        Node::Cmp { field, op, value } => record
            .field(field)
            .and_then(|actual| actual.partial_order(value))
            .is_some_and(|ordering| op.accepts(ordering)),
        Node::And(all) => all.iter().all(|n| eval(n, record)),
        Node::Or(any) => any.iter().any(|n| eval(n, record)),
        Node::Not(inner) => !eval(inner, record),
    }
}

fn bind_node(filter: &Filter, schema: &CollectionSchema) -> VectorResult<Node> {
    match filter {
        Filter::Eq { field, value } => {
            let field_type = indexed_field_type(schema, field)?;
            let value = coerce_literal(field, field_type, value)?;
            Ok(Node::Eq {
                field: field.clone(),
                value,
            })
        }
        Filter::Cmp { field, op, value } => {
            let field_type = indexed_field_type(schema, field)?;
            if !field_type.is_ordered() {
                return Err(VectorError::invalid_filter_field(
                    field,
                    format!("{} fields cannot be compared", field_type.name()),
                ));
            }
            if value.is_null() {
                return Err(VectorError::invalid_filter_field(
                    field,
                    "cannot compare against null",
                ));
            }
            let value = coerce_literal(field, field_type, value)?;
            Ok(Node::Cmp {
                field: field.clone(),
                op: *op,
                value,
            })
        }
        Filter::And(all) => Ok(Node::And(
            all.iter()
                .map(|f| bind_node(f, schema))
                .collect::<VectorResult<_>>()?,
        )),
        Filter::Or(any) => Ok(Node::Or(
            any.iter()
                .map(|f| bind_node(f, schema))
                .collect::<VectorResult<_>>()?,
        )),
        Filter::Not(inner) => Ok(Node::Not(Box::new(bind_node(inner, schema)?))),
    }
}

fn indexed_field_type(schema: &CollectionSchema, field: &str) -> VectorResult<FieldType> {
    let Some(spec) = schema.data_field(field) else {
        return Err(VectorError::invalid_filter_field(field, "unknown field"));
    };
    if !spec.indexed {
        return Err(VectorError::invalid_filter_field(
            field,
            "field is not indexed",
        ));
    }
    Ok(spec.field_type)
}

fn coerce_literal(field: &str, field_type: FieldType, value: &FieldValue) -> VectorResult<FieldValue> {
    match (field_type, value) {
        (_, FieldValue::Null) => Ok(FieldValue::Null),
        (FieldType::Float, FieldValue::Int(i)) => Ok(FieldValue::Float(*i as f64)),
        (expected, literal) if literal.field_type() == Some(expected) => Ok(literal.clone()),
        (expected, literal) => Err(VectorError::invalid_filter_field(
            field,
            format!(
                "{} literal cannot match a {} field",
                literal.type_name(),
                expected.name()
            ),
        )),
    }
}
