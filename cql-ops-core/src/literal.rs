//! Rendering of values as CQL literals, for embedding them in generated statements.

use std::fmt::{self, Display, Formatter};

use chrono::{LocalResult, TimeZone, Utc};
use itertools::Itertools;

use crate::value::CqlValue;

/// A value written the way it would appear in CQL text, e.g. in a `WITH` clause.
pub(crate) struct CqlLiteral<'a>(pub(crate) &'a CqlValue);

impl Display for CqlLiteral<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            CqlValue::Ascii(s) | CqlValue::Text(s) => StringLiteral(s).fmt(f),
            CqlValue::Blob(bytes) => {
                f.write_str("0x")?;
                bytes.iter().try_for_each(|b| write!(f, "{b:02x}"))
            }
            CqlValue::Empty => f.write_str("0x"),
            CqlValue::Float(v) => FloatLiteral(*v).fmt(f),
            CqlValue::Double(v) => FloatLiteral(*v).fmt(f),
            CqlValue::Boolean(v) => write!(f, "{v}"),
            CqlValue::Int(v) => write!(f, "{v}"),
            CqlValue::BigInt(v) => write!(f, "{v}"),
            CqlValue::SmallInt(v) => write!(f, "{v}"),
            CqlValue::TinyInt(v) => write!(f, "{v}"),
            CqlValue::Counter(c) => write!(f, "{}", c.0),
            CqlValue::Inet(addr) => write!(f, "'{addr}'"),
            CqlValue::Uuid(u) | CqlValue::Timeuuid(u) => write!(f, "{u}"),
            // Millisecond integers are valid timestamp literals too.
            CqlValue::Timestamp(ts) => match Utc.timestamp_millis_opt(ts.0) {
                LocalResult::Single(at) => write!(f, "{}", at.format("'%Y-%m-%d %H:%M:%S%.3f%z'")),
                LocalResult::Ambiguous(_, _) | LocalResult::None => write!(f, "{}", ts.0),
            },
            CqlValue::List(items) => write!(f, "[{}]", items.iter().map(CqlLiteral).format(", ")),
            CqlValue::Set(items) => write!(f, "{{{}}}", items.iter().map(CqlLiteral).format(", ")),
            CqlValue::Map(entries) => write!(
                f,
                "{{{}}}",
                entries.iter().format_with(", ", |(key, value), g| {
                    g(&format_args!("{}: {}", CqlLiteral(key), CqlLiteral(value)))
                })
            ),
            CqlValue::Tuple(fields) => write!(
                f,
                "({})",
                fields.iter().format_with(", ", |field, g| match field {
                    Some(value) => g(&CqlLiteral(value)),
                    None => g(&"null"),
                })
            ),
        }
    }
}

/// Floating point literal, with CQL's spelling of the non-finite values.
struct FloatLiteral<T>(T);

impl<T: Display + Copy + Into<f64>> Display for FloatLiteral<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let wide: f64 = self.0.into();
        if wide.is_nan() {
            f.write_str("NaN")
        } else if wide == f64::INFINITY {
            f.write_str("Infinity")
        } else if wide == f64::NEG_INFINITY {
            f.write_str("-Infinity")
        } else {
            self.0.fmt(f)
        }
    }
}

/// Single-quoted string literal; inner quotes are doubled.
pub(crate) struct StringLiteral<'a>(pub(crate) &'a str);

impl Display for StringLiteral<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0.split('\'').format("''"))
    }
}
