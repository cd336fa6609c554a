//! Errors raised while building CQL: bad identifiers and specifications that cannot be rendered.
//!
//! Conversion errors live next to the conversion traits in [`crate::cql_to_rust`].

use thiserror::Error;

/// Invalid identifier passed to a specification, statement builder or template.
///
/// Raised by the setter that received the name, never deferred to rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BadIdentifier {
    /// Identifier is empty
    #[error("Identifier is empty")]
    Empty,

    /// Identifier too long, must be up to 48 characters
    #[error("Identifier too long, must be up to 48 characters, found {1} characters. Bad identifier: '{0}'")]
    TooLong(String, usize),

    /// Illegal character - only alpha-numeric and underscores allowed in unquoted identifiers.
    #[error("Illegal character found: '{1}', only alpha-numeric and underscores allowed. Bad identifier: '{0}'")]
    IllegalCharacter(String, char),

    /// Unquoted identifiers have to start with a letter.
    #[error("Unquoted identifier has to start with a letter. Bad identifier: '{0}'")]
    BadFirstCharacter(String),

    /// A quoted identifier contains a lone double quote.
    #[error("Quoted identifier contains an unescaped double quote. Bad identifier: '{0}'")]
    UnescapedQuote(String),
}

/// Rendering was attempted before every required part of a statement was set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot render {statement}: {missing} is not set")]
pub struct IncompleteSpecification {
    /// Statement kind, e.g. `CREATE INDEX`.
    pub statement: &'static str,
    /// Name of the missing part.
    pub missing: &'static str,
}

impl IncompleteSpecification {
    pub(crate) fn new(statement: &'static str, missing: &'static str) -> Self {
        IncompleteSpecification { statement, missing }
    }
}

/// Two instructions were combined that CQL only accepts in separate statements,
/// e.g. `ADD` and `DROP` in one `ALTER TABLE`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot render {statement}: {first} and {second} must be issued as separate statements")]
pub struct ConflictingInstructions {
    /// Statement kind, e.g. `ALTER TABLE`.
    pub statement: &'static str,
    /// Keyword of the instruction set first.
    pub first: &'static str,
    /// Keyword of the instruction that cannot join it.
    pub second: &'static str,
}

impl ConflictingInstructions {
    pub(crate) fn new(statement: &'static str, first: &'static str, second: &'static str) -> Self {
        ConflictingInstructions {
            statement,
            first,
            second,
        }
    }
}

/// Failure to render a [specification](crate::spec::Specification) to CQL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecificationError {
    #[error(transparent)]
    Incomplete(#[from] IncompleteSpecification),

    #[error(transparent)]
    Conflicting(#[from] ConflictingInstructions),
}
