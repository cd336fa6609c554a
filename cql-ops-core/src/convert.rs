//! Enum-aware value conversion applied when entity properties are read from or written
//! to rows.
//!
//! Enums are stored by their constant name as CQL text. Which enum a property holds is
//! declared through [`PropertyType`] and resolved against an [`EnumRegistry`] populated
//! at startup, so no runtime type introspection is involved.

use std::collections::HashMap;

use crate::cql_to_rust::FromCqlValError;
use crate::value::CqlValue;

/// A Rust enum whose constants are stored by name.
///
/// Usually implemented with `#[derive(CqlEnum)]`.
pub trait CqlEnum: Sized + 'static {
    /// Name identifying the enum type in an [`EnumRegistry`].
    const TYPE_NAME: &'static str;

    /// Names of all constants, in declaration order.
    const CONSTANTS: &'static [&'static str];

    /// Declared name of this constant.
    fn name(&self) -> &'static str;

    /// Looks up a constant by its exact name.
    fn from_name(name: &str) -> Option<Self>;
}

/// Declared type of an entity property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    /// Anything stored as-is.
    Plain,
    /// An enum registered under the given type name.
    Enum(&'static str),
}

impl PropertyType {
    pub fn of_enum<E: CqlEnum>() -> Self {
        PropertyType::Enum(E::TYPE_NAME)
    }
}

/// Enum constant resolved against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumConstant {
    type_name: &'static str,
    name: &'static str,
}

impl EnumConstant {
    pub fn of<E: CqlEnum>(value: &E) -> Self {
        EnumConstant {
            type_name: E::TYPE_NAME,
            name: value.name(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Converts back into the typed enum, if it belongs to `E`.
    pub fn to_enum<E: CqlEnum>(&self) -> Option<E> {
        if self.type_name != E::TYPE_NAME {
            return None;
        }
        E::from_name(self.name)
    }
}

/// Property value on the Rust side of the conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedValue {
    Value(CqlValue),
    Enum(EnumConstant),
}

/// Maps enum type names to their constants.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: HashMap<&'static str, &'static [&'static str]>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `E`; registering the same enum twice is a no-op.
    pub fn register<E: CqlEnum>(&mut self) -> &mut Self {
        self.enums.insert(E::TYPE_NAME, E::CONSTANTS);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.enums.contains_key(type_name)
    }

    /// Resolves `name` against the constants registered for `type_name`.
    pub fn lookup(&self, type_name: &'static str, name: &str) -> Result<EnumConstant, FromCqlValError> {
        self.enums
            .get(type_name)
            .and_then(|constants| constants.iter().find(|constant| **constant == name))
            .map(|constant| EnumConstant {
                type_name,
                name: constant,
            })
            .ok_or_else(|| FromCqlValError::UnknownEnumConstant {
                type_name,
                name: name.to_owned(),
            })
    }
}

/// Bidirectional conversion between property values and column values.
#[derive(Debug, Clone, Default)]
pub struct ValueConverter {
    registry: EnumRegistry,
}

impl ValueConverter {
    pub fn new(registry: EnumRegistry) -> Self {
        ValueConverter { registry }
    }

    pub fn registry(&self) -> &EnumRegistry {
        &self.registry
    }

    /// Converts a value read from a row into the declared property type.
    ///
    /// Enum properties are looked up by the exact string form of the column value, so a
    /// value naming no constant fails with `UnknownEnumConstant`. Everything else, and
    /// null, passes through unchanged.
    pub fn after_read(
        &self,
        expected: &PropertyType,
        raw: Option<CqlValue>,
    ) -> Result<Option<ConvertedValue>, FromCqlValError> {
        match (expected, raw) {
            (_, None) => Ok(None),
            (PropertyType::Enum(type_name), Some(raw)) => {
                let name = enum_name_of(raw);
                self.registry.lookup(type_name, &name).map(|c| Some(ConvertedValue::Enum(c)))
            }
            (PropertyType::Plain, Some(raw)) => Ok(Some(ConvertedValue::Value(raw))),
        }
    }

    /// Converts a property value into the value to be written to a column.
    ///
    /// Enums become their declared name; everything else, and null, passes through.
    pub fn before_write(&self, value: Option<ConvertedValue>) -> Option<CqlValue> {
        value.map(|value| match value {
            ConvertedValue::Enum(constant) => CqlValue::Text(constant.name().to_owned()),
            ConvertedValue::Value(value) => value,
        })
    }

    /// Typed counterpart of [`after_read`](Self::after_read) which needs no registry.
    pub fn read_enum<E: CqlEnum>(raw: Option<CqlValue>) -> Result<Option<E>, FromCqlValError> {
        raw.map(enum_from_cql::<E>).transpose()
    }

    /// Typed counterpart of [`before_write`](Self::before_write).
    pub fn write_enum<E: CqlEnum>(value: Option<&E>) -> Option<CqlValue> {
        value.map(|value| CqlValue::Text(value.name().to_owned()))
    }
}

/// Reads a non-null column value as a constant of `E`.
pub fn enum_from_cql<E: CqlEnum>(raw: CqlValue) -> Result<E, FromCqlValError> {
    let name = enum_name_of(raw);
    E::from_name(&name).ok_or(FromCqlValError::UnknownEnumConstant {
        type_name: E::TYPE_NAME,
        name,
    })
}

// Enums are written as text, but any stored value names a constant by its string form.
fn enum_name_of(raw: CqlValue) -> String {
    match raw {
        CqlValue::Text(name) | CqlValue::Ascii(name) => name,
        CqlValue::Inet(addr) => addr.to_string(),
        CqlValue::Timestamp(ts) => ts.0.to_string(),
        other => other.to_string(),
    }
}
