//! Conversion of [`CqlValue`]s and [`Row`]s into Rust types.

use std::collections::HashMap;
use std::hash::Hash;
use std::net::IpAddr;

use thiserror::Error;
use uuid::Uuid;

use crate::value::{Counter, CqlTimestamp, CqlValue, Row};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FromRowError {
    #[error("{err} in the column with index {column}")]
    BadCqlVal { err: FromCqlValError, column: usize },
    #[error("Wrong row size: expected {expected}, actual {actual}")]
    WrongRowSize { expected: usize, actual: usize },
    #[error("Column '{0}' is not present in the result")]
    NoSuchColumn(String),
    /// Failure reported by a user-supplied mapper or entity reader.
    #[error("Row mapping failed: {0}")]
    Custom(String),
}

/// This trait defines a way to convert CqlValue or `Option<CqlValue>` into some rust type
// We can't use From trait because impl From<Option<CqlValue>> for String {...}
// is forbidden since neither From nor String are defined in this crate
pub trait FromCqlVal<T>: Sized {
    fn from_cql(cql_val: T) -> Result<Self, FromCqlValError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FromCqlValError {
    /// The value has a different CQL type than the requested Rust type accepts.
    #[error("Bad CQL type: expected {expected}, got {got}")]
    BadCqlType {
        expected: &'static str,
        got: &'static str,
    },
    #[error("Value is null")]
    ValIsNull,
    /// Enum constant lookup by name failed.
    #[error("No constant named '{name}' in enum {type_name}")]
    UnknownEnumConstant {
        type_name: &'static str,
        name: String,
    },
}

/// This trait defines a way to convert CQL Row into some rust type
pub trait FromRow: Sized {
    fn from_row(row: Row) -> Result<Self, FromRowError>;
}

// Implement from_cql<Option<CqlValue>> for every type that has from_cql<CqlValue>
// This tries to unwrap the option or fails with an error
impl<T: FromCqlVal<CqlValue>> FromCqlVal<Option<CqlValue>> for T {
    fn from_cql(cql_val_opt: Option<CqlValue>) -> Result<Self, FromCqlValError> {
        T::from_cql(cql_val_opt.ok_or(FromCqlValError::ValIsNull)?)
    }
}

// Implement from_cql<Option<CqlValue>> for Option<T> for every type that has from_cql<CqlValue>
// Value inside Option gets mapped from CqlValue to T
impl<T: FromCqlVal<CqlValue>> FromCqlVal<Option<CqlValue>> for Option<T> {
    fn from_cql(cql_val_opt: Option<CqlValue>) -> Result<Self, FromCqlValError> {
        match cql_val_opt {
            Some(cql_val) => Ok(Some(T::from_cql(cql_val)?)),
            None => Ok(None),
        }
    }
}

// This macro implements FromCqlVal given a type and method of CqlValue that returns this type
macro_rules! impl_from_cql_val {
    ($T:ty, $convert_func:ident, $expected:literal) => {
        impl FromCqlVal<CqlValue> for $T {
            fn from_cql(cql_val: CqlValue) -> Result<$T, FromCqlValError> {
                let got = cql_val.type_name();
                cql_val.$convert_func().ok_or(FromCqlValError::BadCqlType {
                    expected: $expected,
                    got,
                })
            }
        }
    };
}

impl_from_cql_val!(i32, as_int, "int"); // i32::from_cql<CqlValue>
impl_from_cql_val!(i64, as_bigint, "bigint"); // i64::from_cql<CqlValue>
impl_from_cql_val!(i16, as_smallint, "smallint"); // i16::from_cql<CqlValue>
impl_from_cql_val!(i8, as_tinyint, "tinyint"); // i8::from_cql<CqlValue>
impl_from_cql_val!(f32, as_float, "float"); // f32::from_cql<CqlValue>
impl_from_cql_val!(f64, as_double, "double"); // f64::from_cql<CqlValue>
impl_from_cql_val!(bool, as_boolean, "boolean"); // bool::from_cql<CqlValue>
impl_from_cql_val!(String, into_string, "text"); // String::from_cql<CqlValue>
impl_from_cql_val!(IpAddr, as_inet, "inet"); // IpAddr::from_cql<CqlValue>
impl_from_cql_val!(Uuid, as_uuid, "uuid"); // Uuid::from_cql<CqlValue>
impl_from_cql_val!(Counter, as_counter, "counter"); // Counter::from_cql<CqlValue>
impl_from_cql_val!(CqlTimestamp, as_cql_timestamp, "timestamp"); // CqlTimestamp::from_cql<CqlValue>

impl FromCqlVal<CqlValue> for CqlValue {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        Ok(cql_val)
    }
}

// Vec<T>::from_cql<CqlValue>
impl<T: FromCqlVal<CqlValue>> FromCqlVal<CqlValue> for Vec<T> {
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        let got = cql_val.type_name();
        cql_val
            .into_vec()
            .ok_or(FromCqlValError::BadCqlType {
                expected: "list or set",
                got,
            })?
            .into_iter()
            .map(T::from_cql)
            .collect::<Result<Vec<T>, FromCqlValError>>()
    }
}

impl<T1: FromCqlVal<CqlValue> + Eq + Hash, T2: FromCqlVal<CqlValue>> FromCqlVal<CqlValue>
    for HashMap<T1, T2>
{
    fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
        let got = cql_val.type_name();
        let vec = cql_val.into_pair_vec().ok_or(FromCqlValError::BadCqlType {
            expected: "map",
            got,
        })?;
        let mut res = HashMap::with_capacity(vec.len());
        for (key, value) in vec {
            res.insert(T1::from_cql(key)?, T2::from_cql(value)?);
        }
        Ok(res)
    }
}

// This macro implements FromRow for tuple of types that have FromCqlVal
macro_rules! impl_tuple_from_row {
    ( $($Ti:tt),+ ) => {
        impl<$($Ti),+> FromRow for ($($Ti,)+)
        where
            $($Ti: FromCqlVal<Option<CqlValue>>),+
        {
            fn from_row(row: Row) -> Result<Self, FromRowError> {
                const EXPECTED: usize = [$(stringify!($Ti)),+].len();
                let actual = row.columns.len();
                if actual != EXPECTED {
                    return Err(FromRowError::WrongRowSize { expected: EXPECTED, actual });
                }

                let mut vals_iter = row.columns.into_iter().enumerate();

                Ok((
                    $(
                        {
                            let (column, col_value) = vals_iter
                                .next()
                                .ok_or(FromRowError::WrongRowSize { expected: EXPECTED, actual })?;
                            $Ti::from_cql(col_value)
                                .map_err(|err| FromRowError::BadCqlVal { err, column })?
                        }
                    ,)+
                ))
            }
        }
    }
}

// Implement FromRow for tuples of size up to 10
impl_tuple_from_row!(T1);
impl_tuple_from_row!(T1, T2);
impl_tuple_from_row!(T1, T2, T3);
impl_tuple_from_row!(T1, T2, T3, T4);
impl_tuple_from_row!(T1, T2, T3, T4, T5);
impl_tuple_from_row!(T1, T2, T3, T4, T5, T6);
impl_tuple_from_row!(T1, T2, T3, T4, T5, T6, T7);
impl_tuple_from_row!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_tuple_from_row!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_tuple_from_row!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);

macro_rules! impl_tuple_from_cql {
    ( $($Ti:tt),+ ) => {
        impl<$($Ti),+> FromCqlVal<CqlValue> for ($($Ti,)+)
        where
            $($Ti: FromCqlVal<Option<CqlValue>>),+
        {
            fn from_cql(cql_val: CqlValue) -> Result<Self, FromCqlValError> {
                let tuple_fields = match cql_val {
                    CqlValue::Tuple(fields) => fields,
                    other => return Err(FromCqlValError::BadCqlType {
                        expected: "tuple",
                        got: other.type_name(),
                    }),
                };

                let mut tuple_fields_iter = tuple_fields.into_iter();

                Ok((
                    $(
                        $Ti::from_cql(tuple_fields_iter.next().flatten())?
                    ,)+
                ))
            }
        }
    }
}

impl_tuple_from_cql!(T1);
impl_tuple_from_cql!(T1, T2);
impl_tuple_from_cql!(T1, T2, T3);
impl_tuple_from_cql!(T1, T2, T3, T4);
impl_tuple_from_cql!(T1, T2, T3, T4, T5);
impl_tuple_from_cql!(T1, T2, T3, T4, T5, T6);

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;

    use uuid::Uuid;

    use super::{CqlValue, FromCqlVal, FromCqlValError, FromRow, FromRowError, Row};
    use crate::value::{ColumnSpec, ColumnType};

    fn row(columns: Vec<Option<CqlValue>>) -> Row {
        let specs: Arc<[ColumnSpec]> = (0..columns.len())
            .map(|i| ColumnSpec::new(format!("c{i}"), ColumnType::Int))
            .collect();
        Row::new(specs, columns)
    }

    #[test]
    fn uuid_from_cql() {
        let my_uuid = Uuid::parse_str("936DA01F9ABD4d9d80C702AF85C822A8").unwrap();
        assert_eq!(Ok(my_uuid), Uuid::from_cql(CqlValue::Uuid(my_uuid)));
    }

    #[test]
    fn i32_from_cql() {
        assert_eq!(Ok(1234), i32::from_cql(CqlValue::Int(1234)));
    }

    #[test]
    fn floatingpoints_from_cql() {
        let float: f32 = 2.13;
        let double: f64 = 4.26;
        assert_eq!(Ok(float), f32::from_cql(CqlValue::Float(float)));
        assert_eq!(Ok(double), f64::from_cql(CqlValue::Double(double)));
    }

    #[test]
    fn string_from_cql() {
        assert_eq!(
            Ok("ascii_test".to_string()),
            String::from_cql(CqlValue::Ascii("ascii_test".to_string()))
        );
        assert_eq!(
            Ok("text_test".to_string()),
            String::from_cql(CqlValue::Text("text_test".to_string()))
        );
    }

    #[test]
    fn inet_from_cql() {
        let ip = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
        assert_eq!(Ok(ip), IpAddr::from_cql(CqlValue::Inet(ip)));
    }

    #[test]
    fn mismatched_type_is_not_cast() {
        assert_eq!(
            f32::from_cql(CqlValue::Text("Spring Data Cassandra Cookbook".to_owned())),
            Err(FromCqlValError::BadCqlType {
                expected: "float",
                got: "text"
            })
        );
        assert_eq!(
            i32::from_cql(CqlValue::BigInt(3)),
            Err(FromCqlValError::BadCqlType {
                expected: "int",
                got: "bigint"
            })
        );
    }

    #[test]
    fn option_from_cql() {
        assert_eq!(Ok(None), Option::<i32>::from_cql(None));
        assert_eq!(Ok(Some(7)), Option::<i32>::from_cql(Some(CqlValue::Int(7))));
        assert_eq!(Err(FromCqlValError::ValIsNull), i32::from_cql(None::<CqlValue>));
    }

    #[test]
    fn collections_from_cql() {
        let list = CqlValue::List(vec![CqlValue::Int(1), CqlValue::Int(2)]);
        assert_eq!(Ok(vec![1, 2]), Vec::<i32>::from_cql(list));

        let map = CqlValue::Map(vec![(CqlValue::Text("a".to_owned()), CqlValue::Int(1))]);
        let parsed = std::collections::HashMap::<String, i32>::from_cql(map).unwrap();
        assert_eq!(parsed["a"], 1);
    }

    #[test]
    fn tuple_from_cql() {
        let tuple = CqlValue::Tuple(vec![Some(CqlValue::Int(1)), None]);
        assert_eq!(
            Ok((1, None)),
            <(i32, Option<String>)>::from_cql(tuple)
        );
    }

    #[test]
    fn tuple_from_row() {
        let parsed = <(i32, Option<i32>)>::from_row(row(vec![Some(CqlValue::Int(1)), None]));
        assert_eq!(parsed, Ok((1, None)));

        assert_eq!(
            <(i32,)>::from_row(row(vec![Some(CqlValue::Int(1)), None])),
            Err(FromRowError::WrongRowSize {
                expected: 1,
                actual: 2
            })
        );

        assert_eq!(
            <(i32, String)>::from_row(row(vec![
                Some(CqlValue::Int(1)),
                Some(CqlValue::Int(2))
            ])),
            Err(FromRowError::BadCqlVal {
                err: FromCqlValError::BadCqlType {
                    expected: "text",
                    got: "int"
                },
                column: 1
            })
        );
    }
}
