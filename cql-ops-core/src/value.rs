//! Values returned by (and bound into) CQL statements.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::net::IpAddr;
use std::sync::Arc;

use itertools::Itertools;
use uuid::Uuid;

use crate::cql_to_rust::{FromCqlVal, FromRow, FromRowError};
use crate::literal::CqlLiteral;

/// Native CQL `counter` type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Counter(pub i64);

/// Milliseconds since unix epoch, the native representation of CQL `timestamp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CqlTimestamp(pub i64);

/// A CQL value as handed over by the session collaborator.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum CqlValue {
    Ascii(String),
    Boolean(bool),
    Blob(Vec<u8>),
    Counter(Counter),
    Double(f64),
    Empty,
    Float(f32),
    Int(i32),
    BigInt(i64),
    Text(String),
    /// Milliseconds since unix epoch
    Timestamp(CqlTimestamp),
    Inet(IpAddr),
    List(Vec<CqlValue>),
    Map(Vec<(CqlValue, CqlValue)>),
    Set(Vec<CqlValue>),
    SmallInt(i16),
    TinyInt(i8),
    Timeuuid(Uuid),
    Tuple(Vec<Option<CqlValue>>),
    Uuid(Uuid),
}

impl CqlValue {
    pub fn as_ascii(&self) -> Option<&String> {
        match self {
            Self::Ascii(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&String> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Vec<u8>> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_counter(&self) -> Option<Counter> {
        match self {
            Self::Counter(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bigint(&self) -> Option<i64> {
        match self {
            Self::BigInt(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_smallint(&self) -> Option<i16> {
        match self {
            Self::SmallInt(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_tinyint(&self) -> Option<i8> {
        match self {
            Self::TinyInt(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_cql_timestamp(&self) -> Option<CqlTimestamp> {
        match self {
            Self::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_inet(&self) -> Option<IpAddr> {
        match self {
            Self::Inet(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_timeuuid(&self) -> Option<Uuid> {
        match self {
            Self::Timeuuid(u) => Some(*u),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<CqlValue>> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&Vec<CqlValue>> {
        match self {
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Vec<(CqlValue, CqlValue)>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Self::Ascii(s) => Some(s),
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_blob(self) -> Option<Vec<u8>> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_vec(self) -> Option<Vec<CqlValue>> {
        match self {
            Self::List(s) => Some(s),
            Self::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_pair_vec(self) -> Option<Vec<(CqlValue, CqlValue)>> {
        match self {
            Self::Map(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the CQL type this value belongs to, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ascii(_) => "ascii",
            Self::Boolean(_) => "boolean",
            Self::Blob(_) => "blob",
            Self::Counter(_) => "counter",
            Self::Double(_) => "double",
            Self::Empty => "empty",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Text(_) => "text",
            Self::Timestamp(_) => "timestamp",
            Self::Inet(_) => "inet",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Set(_) => "set",
            Self::SmallInt(_) => "smallint",
            Self::TinyInt(_) => "tinyint",
            Self::Timeuuid(_) => "timeuuid",
            Self::Tuple(_) => "tuple",
            Self::Uuid(_) => "uuid",
        }
    }
}

/// Renders the value as a CQL literal.
impl Display for CqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        CqlLiteral(self).fmt(f)
    }
}

macro_rules! impl_from_native {
    ($T:ty, $variant:ident) => {
        impl From<$T> for CqlValue {
            fn from(value: $T) -> Self {
                CqlValue::$variant(value)
            }
        }
    };
}

impl_from_native!(bool, Boolean);
impl_from_native!(Vec<u8>, Blob);
impl_from_native!(Counter, Counter);
impl_from_native!(f64, Double);
impl_from_native!(f32, Float);
impl_from_native!(i32, Int);
impl_from_native!(i64, BigInt);
impl_from_native!(i16, SmallInt);
impl_from_native!(i8, TinyInt);
impl_from_native!(String, Text);
impl_from_native!(CqlTimestamp, Timestamp);
impl_from_native!(IpAddr, Inet);
impl_from_native!(Uuid, Uuid);

impl From<&str> for CqlValue {
    fn from(value: &str) -> Self {
        CqlValue::Text(value.to_owned())
    }
}

/// CQL data type of a column, rendered in CQL syntax by [`Display`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ColumnType {
    Custom(String),
    Ascii,
    Boolean,
    Blob,
    Counter,
    Date,
    Decimal,
    Double,
    Duration,
    Float,
    Int,
    BigInt,
    Text,
    Timestamp,
    Inet,
    List(Box<ColumnType>),
    Map(Box<ColumnType>, Box<ColumnType>),
    Set(Box<ColumnType>),
    SmallInt,
    TinyInt,
    Time,
    Timeuuid,
    Tuple(Vec<ColumnType>),
    Uuid,
    Varint,
    /// `frozen<...>` wrapper of a collection or tuple type.
    Frozen(Box<ColumnType>),
}

impl ColumnType {
    pub fn list(element: ColumnType) -> Self {
        ColumnType::List(Box::new(element))
    }

    pub fn set(element: ColumnType) -> Self {
        ColumnType::Set(Box::new(element))
    }

    pub fn map(key: ColumnType, value: ColumnType) -> Self {
        ColumnType::Map(Box::new(key), Box::new(value))
    }

    pub fn frozen(inner: ColumnType) -> Self {
        ColumnType::Frozen(Box::new(inner))
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Custom(class) => write!(f, "'{}'", class.replace('\'', "''")),
            ColumnType::Ascii => f.write_str("ascii"),
            ColumnType::Boolean => f.write_str("boolean"),
            ColumnType::Blob => f.write_str("blob"),
            ColumnType::Counter => f.write_str("counter"),
            ColumnType::Date => f.write_str("date"),
            ColumnType::Decimal => f.write_str("decimal"),
            ColumnType::Double => f.write_str("double"),
            ColumnType::Duration => f.write_str("duration"),
            ColumnType::Float => f.write_str("float"),
            ColumnType::Int => f.write_str("int"),
            ColumnType::BigInt => f.write_str("bigint"),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Timestamp => f.write_str("timestamp"),
            ColumnType::Inet => f.write_str("inet"),
            ColumnType::List(element) => write!(f, "list<{element}>"),
            ColumnType::Map(key, value) => write!(f, "map<{key}, {value}>"),
            ColumnType::Set(element) => write!(f, "set<{element}>"),
            ColumnType::SmallInt => f.write_str("smallint"),
            ColumnType::TinyInt => f.write_str("tinyint"),
            ColumnType::Time => f.write_str("time"),
            ColumnType::Timeuuid => f.write_str("timeuuid"),
            ColumnType::Tuple(elements) => {
                write!(f, "tuple<{}>", elements.iter().format(", "))
            }
            ColumnType::Uuid => f.write_str("uuid"),
            ColumnType::Varint => f.write_str("varint"),
            ColumnType::Frozen(inner) => write!(f, "frozen<{inner}>"),
        }
    }
}

/// Name and type of one column of a result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnSpec {
    name: String,
    typ: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, typ: ColumnType) -> Self {
        ColumnSpec {
            name: name.into(),
            typ,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn typ(&self) -> &ColumnType {
        &self.typ
    }
}

/// One row of a result: column values in result order, together with the shared
/// column specifications needed to look them up by name.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    col_specs: Arc<[ColumnSpec]>,
    pub columns: Vec<Option<CqlValue>>,
}

impl Row {
    pub fn new(col_specs: Arc<[ColumnSpec]>, columns: Vec<Option<CqlValue>>) -> Self {
        Row { col_specs, columns }
    }

    pub fn col_specs(&self) -> &[ColumnSpec] {
        &self.col_specs
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of the column called `name`, if the result has one.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.col_specs.iter().position(|spec| spec.name() == name)
    }

    /// Raw value at `index`; `None` both for nulls and for out of range indexes.
    pub fn value(&self, index: usize) -> Option<&CqlValue> {
        self.columns.get(index).and_then(Option::as_ref)
    }

    /// Raw value of the column called `name`.
    pub fn value_by_name(&self, name: &str) -> Option<&CqlValue> {
        self.index_of(name).and_then(|index| self.value(index))
    }

    /// Converts the value at `index` into `T`.
    pub fn get<T: FromCqlVal<Option<CqlValue>>>(&self, index: usize) -> Result<T, FromRowError> {
        let value = self
            .columns
            .get(index)
            .ok_or(FromRowError::WrongRowSize {
                expected: index + 1,
                actual: self.columns.len(),
            })?
            .clone();

        T::from_cql(value).map_err(|err| FromRowError::BadCqlVal { err, column: index })
    }

    /// Converts the value of the column called `name` into `T`.
    pub fn get_by_name<T: FromCqlVal<Option<CqlValue>>>(
        &self,
        name: &str,
    ) -> Result<T, FromRowError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| FromRowError::NoSuchColumn(name.to_owned()))?;
        self.get(index)
    }

    /// Moves the value at `index` out of the row and converts it into `T`.
    pub fn take<T: FromCqlVal<Option<CqlValue>>>(&mut self, index: usize) -> Result<T, FromRowError> {
        let actual = self.columns.len();
        let slot = self.columns.get_mut(index).ok_or(FromRowError::WrongRowSize {
            expected: index + 1,
            actual,
        })?;

        T::from_cql(slot.take()).map_err(|err| FromRowError::BadCqlVal { err, column: index })
    }

    /// Parses the row as the given type.
    pub fn into_typed<R: FromRow>(self) -> Result<R, FromRowError> {
        R::from_row(self)
    }

    /// Column name to value, nulls included.
    pub fn into_map(self) -> HashMap<String, Option<CqlValue>> {
        self.col_specs
            .iter()
            .map(|spec| spec.name().to_owned())
            .zip(self.columns)
            .collect()
    }
}
