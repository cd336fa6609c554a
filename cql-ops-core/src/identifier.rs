//! Validation and quoting of CQL identifiers (keyspace, table, column and index names).

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::BadIdentifier;

/// Maximum length of a schema object name.
pub const MAX_IDENTIFIER_LENGTH: usize = 48;

// Sorted, so that it can be binary searched.
const RESERVED_KEYWORDS: &[&str] = &[
    "ADD",
    "ALLOW",
    "ALTER",
    "AND",
    "APPLY",
    "ASC",
    "AUTHORIZE",
    "BATCH",
    "BEGIN",
    "BY",
    "COLUMNFAMILY",
    "CREATE",
    "DELETE",
    "DESC",
    "DESCRIBE",
    "DROP",
    "ENTRIES",
    "EXECUTE",
    "FROM",
    "FULL",
    "GRANT",
    "IF",
    "IN",
    "INDEX",
    "INFINITY",
    "INSERT",
    "INTO",
    "KEYSPACE",
    "LIMIT",
    "MATERIALIZED",
    "MODIFY",
    "NAN",
    "NORECURSIVE",
    "NOT",
    "NULL",
    "OF",
    "ON",
    "OR",
    "ORDER",
    "PRIMARY",
    "RENAME",
    "REPLACE",
    "REVOKE",
    "SCHEMA",
    "SELECT",
    "SET",
    "TABLE",
    "TO",
    "TOKEN",
    "TRUNCATE",
    "UNLOGGED",
    "UPDATE",
    "USE",
    "USING",
    "VIEW",
    "WHERE",
    "WITH",
];

/// This type can only hold a valid identifier.
///
/// Its [`Display`] implementation yields the form that can be embedded in CQL text:
/// names which would be case-folded or clash with a keyword are double-quoted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    name: String,
    needs_quoting: bool,
}

impl Identifier {
    /// Validates `name`, see [`validate`].
    pub fn new(name: impl Into<String>) -> Result<Self, BadIdentifier> {
        validate(name.into())
    }

    /// The name as the database stores it, without quotes.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Whether the name must be double-quoted in CQL text.
    pub fn is_quoted(&self) -> bool {
        self.needs_quoting
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.needs_quoting {
            write!(f, "\"{}\"", self.name.replace('"', "\"\""))
        } else {
            f.write_str(&self.name)
        }
    }
}

impl FromStr for Identifier {
    type Err = BadIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = BadIdentifier;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

impl TryFrom<String> for Identifier {
    type Error = BadIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Identifier::new(value)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

/// Verifies that `name` is a legal CQL identifier.
///
/// Unquoted names can have up to 48 alphanumeric characters and underscores and have to
/// start with a letter. Names wrapped in double quotes (with inner quotes doubled) may
/// contain any character; the 48 character limit applies to their unquoted content.
pub fn validate(name: impl Into<String>) -> Result<Identifier, BadIdentifier> {
    let name = name.into();

    if let Some(inner) = quoted_content(&name) {
        let unescaped = unescape_quoted(inner).ok_or_else(|| BadIdentifier::UnescapedQuote(name.clone()))?;
        verify_length(&name, &unescaped)?;
        return Ok(Identifier {
            name: unescaped,
            needs_quoting: true,
        });
    }

    verify_length(&name, &name)?;
    verify_unquoted_grammar(&name)?;

    let needs_quoting = requires_quoting(&name);
    Ok(Identifier { name, needs_quoting })
}

/// Returns `name` in the form that can be embedded in CQL text.
///
/// Already quoted names are returned unchanged, so quoting is idempotent.
pub fn quote(name: &str) -> String {
    if let Some(inner) = quoted_content(name) {
        if unescape_quoted(inner).is_some() {
            return name.to_owned();
        }
    }

    if verify_unquoted_grammar(name).is_ok() && !requires_quoting(name) {
        return name.to_owned();
    }

    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Conventional name of a secondary index on `table`.`column`.
pub fn derived_index_name(table: &str, column: &str) -> String {
    format!("{table}_{column}_idx")
}

/// Whether `word` is a reserved CQL keyword, case-insensitively.
pub fn is_reserved_keyword(word: &str) -> bool {
    let upper = word.to_ascii_uppercase();
    RESERVED_KEYWORDS.binary_search(&upper.as_str()).is_ok()
}

fn quoted_content(name: &str) -> Option<&str> {
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        Some(&name[1..name.len() - 1])
    } else {
        None
    }
}

// Every double quote inside a quoted identifier has to be doubled.
fn unescape_quoted(inner: &str) -> Option<String> {
    let mut unescaped = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '"' && chars.next() != Some('"') {
            return None;
        }
        unescaped.push(c);
    }
    Some(unescaped)
}

fn verify_length(original: &str, content: &str) -> Result<(), BadIdentifier> {
    if content.is_empty() {
        return Err(BadIdentifier::Empty);
    }

    let len = content.chars().count();
    if len > MAX_IDENTIFIER_LENGTH {
        return Err(BadIdentifier::TooLong(original.to_owned(), len));
    }

    Ok(())
}

fn verify_unquoted_grammar(name: &str) -> Result<(), BadIdentifier> {
    for character in name.chars() {
        match character {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => {}
            _ => {
                return Err(BadIdentifier::IllegalCharacter(
                    name.to_owned(),
                    character,
                ));
            }
        };
    }

    match name.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => Ok(()),
        Some(_) => Err(BadIdentifier::BadFirstCharacter(name.to_owned())),
        None => Err(BadIdentifier::Empty),
    }
}

// Unquoted names are folded to lower case by the database, and keywords can't be used bare.
fn requires_quoting(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_uppercase()) || is_reserved_keyword(name)
}
