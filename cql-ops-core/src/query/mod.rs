//! Programmatic builders of DML statements.
//!
//! Values are never inlined into the CQL text. Each one becomes a positional `?` marker
//! and is carried next to the text in the resulting [`BuiltStatement`], in marker order.
//!
//! ```
//! # use cql_ops_core::query::Select;
//! let count = Select::count_all().from("book")?.build()?;
//! assert_eq!(count.cql(), "SELECT COUNT(*) FROM book");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod delete;
mod insert;
mod select;
mod truncate;
mod update;

pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use truncate::Truncate;
pub use update::Update;

use itertools::Itertools;

use crate::identifier::Identifier;
use crate::value::CqlValue;

/// CQL text together with the values bound to its markers.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStatement {
    cql: String,
    values: Vec<Option<CqlValue>>,
}

impl BuiltStatement {
    pub fn new(cql: impl Into<String>, values: Vec<Option<CqlValue>>) -> Self {
        BuiltStatement {
            cql: cql.into(),
            values,
        }
    }

    pub fn cql(&self) -> &str {
        &self.cql
    }

    pub fn values(&self) -> &[Option<CqlValue>] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<Option<CqlValue>>) {
        (self.cql, self.values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Eq,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Operator {
    fn as_cql(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Condition {
    Compare(Identifier, Operator, CqlValue),
    In(Identifier, Vec<CqlValue>),
}

/// Relations of a `WHERE` clause, joined with `AND`.
#[derive(Debug, Clone, Default, PartialEq)]
struct Conditions(Vec<Condition>);

impl Conditions {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders ` WHERE ...` (or nothing) and appends the bound values.
    fn render(&self, values: &mut Vec<Option<CqlValue>>) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let relations = self
            .0
            .iter()
            .map(|condition| match condition {
                Condition::Compare(column, operator, value) => {
                    values.push(Some(value.clone()));
                    format!("{column} {} ?", operator.as_cql())
                }
                Condition::In(column, in_values) => {
                    values.extend(in_values.iter().cloned().map(Some));
                    format!("{column} IN ({})", in_values.iter().map(|_| "?").join(", "))
                }
            })
            .join(" AND ");

        format!(" WHERE {relations}")
    }
}

// The `where_*` family, shared by every builder with a `conditions` field.
macro_rules! impl_where_methods {
    ($builder:ty) => {
        impl $builder {
            fn compare(
                mut self,
                column: impl Into<String>,
                operator: $crate::query::Operator,
                value: impl Into<$crate::value::CqlValue>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                let column = $crate::identifier::Identifier::new(column)?;
                self.conditions
                    .0
                    .push($crate::query::Condition::Compare(column, operator, value.into()));
                Ok(self)
            }

            /// Adds `column = ?`.
            pub fn where_eq(
                self,
                column: impl Into<String>,
                value: impl Into<$crate::value::CqlValue>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                self.compare(column, $crate::query::Operator::Eq, value)
            }

            pub fn where_lt(
                self,
                column: impl Into<String>,
                value: impl Into<$crate::value::CqlValue>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                self.compare(column, $crate::query::Operator::Lt, value)
            }

            pub fn where_gt(
                self,
                column: impl Into<String>,
                value: impl Into<$crate::value::CqlValue>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                self.compare(column, $crate::query::Operator::Gt, value)
            }

            pub fn where_lte(
                self,
                column: impl Into<String>,
                value: impl Into<$crate::value::CqlValue>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                self.compare(column, $crate::query::Operator::Lte, value)
            }

            pub fn where_gte(
                self,
                column: impl Into<String>,
                value: impl Into<$crate::value::CqlValue>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                self.compare(column, $crate::query::Operator::Gte, value)
            }

            /// Adds `column IN (?, ...)` with one marker per value.
            pub fn where_in<V: Into<$crate::value::CqlValue>>(
                mut self,
                column: impl Into<String>,
                values: impl IntoIterator<Item = V>,
            ) -> Result<Self, $crate::errors::BadIdentifier> {
                let column = $crate::identifier::Identifier::new(column)?;
                self.conditions.0.push($crate::query::Condition::In(
                    column,
                    values.into_iter().map(Into::into).collect(),
                ));
                Ok(self)
            }
        }
    };
}

use impl_where_methods;
