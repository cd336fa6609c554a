use assert_matches::assert_matches;
use cql_ops::errors::{
    BadIdentifier, ConflictingInstructions, IncompleteSpecification, OperationError,
};
use cql_ops::spec::{
    AlterTableSpecification, CreateIndexSpecification, CreateKeyspaceSpecification, CreateTableSpecification,
    DropIndexSpecification, DropTableSpecification, IndexNameSpecification,
    KeyspaceNameSpecification, ReplicationStrategy, TableNameSpecification,
};
use cql_ops::ColumnType;

use crate::utils::{setup_tracing, ScriptedSession};

#[test]
fn test_schema_changes_are_executed_as_rendered() {
    setup_tracing();
    let (template, session) = ScriptedSession::new().into_template();

    let keyspace = CreateKeyspaceSpecification::new()
        .name("library")
        .unwrap()
        .if_not_exists()
        .replication(ReplicationStrategy::Simple {
            replication_factor: 3,
        });
    let table = CreateTableSpecification::new()
        .name("book")
        .and_then(|s| s.partition_key_column("isbn", ColumnType::Text))
        .and_then(|s| s.column("title", ColumnType::Text))
        .unwrap();
    let index = CreateIndexSpecification::new()
        .table("book")
        .and_then(|s| s.column("title"))
        .and_then(|s| s.default_name("book", "title"))
        .unwrap();
    let drop_index = DropIndexSpecification::new()
        .default_name("book", "title")
        .unwrap()
        .if_exists();

    for rs in [
        template.execute_specification(&keyspace),
        template.execute_specification(&table),
        template.execute_specification(&index),
        template.execute_specification(drop_index),
    ] {
        assert!(!rs.unwrap().is_rows());
    }

    assert_eq!(
        session.executed_cql(),
        [
            "CREATE KEYSPACE IF NOT EXISTS library WITH replication = \
             {'class': 'SimpleStrategy', 'replication_factor': 3}",
            "CREATE TABLE book (isbn text, title text, PRIMARY KEY ((isbn)))",
            "CREATE INDEX book_title_idx ON book (title)",
            "DROP INDEX IF EXISTS book_title_idx",
        ]
    );
}

#[test]
fn test_incomplete_specification_is_not_executed() {
    let (template, session) = ScriptedSession::new().into_template();

    assert_matches!(
        template.execute_specification(DropTableSpecification::new()),
        Err(OperationError::IncompleteSpecification(IncompleteSpecification {
            statement: "DROP TABLE",
            missing: "table name"
        }))
    );
    assert!(session.executed().is_empty());
}

#[test]
fn test_alter_table_takes_one_instruction_per_statement() {
    let (template, session) = ScriptedSession::new().into_template();
    let book = || AlterTableSpecification::new().name("book").unwrap();

    let add = book()
        .add("author", ColumnType::Text)
        .and_then(|s| s.add("year", ColumnType::Int))
        .unwrap();
    let options = book().with("comment", "x").unwrap();
    template.execute_specification(&add).unwrap();
    template.execute_specification(&options).unwrap();

    let mixed = add
        .drop("blurb")
        .and_then(|s| s.with("comment", "x"))
        .unwrap();
    assert_matches!(
        template.execute_specification(mixed),
        Err(OperationError::ConflictingInstructions(ConflictingInstructions {
            first: "ADD",
            second: "WITH",
            ..
        }))
    );

    assert_eq!(
        session.executed_cql(),
        [
            "ALTER TABLE book ADD (author text, year int)",
            "ALTER TABLE book WITH comment = 'x'",
        ]
    );
}

#[test]
fn test_keywords_and_mixed_case_are_quoted() {
    let (template, session) = ScriptedSession::new().into_template();

    template
        .execute_specification(DropTableSpecification::new().name("select").unwrap())
        .unwrap();
    template
        .execute_specification(DropTableSpecification::new().name("BookShelf").unwrap())
        .unwrap();
    assert_eq!(
        session.executed_cql(),
        ["DROP TABLE \"select\"", "DROP TABLE \"BookShelf\""]
    );
}

#[test]
fn test_bad_names_are_rejected_by_builders() {
    assert_matches!(
        DropTableSpecification::new().name("book-shelf"),
        Err(BadIdentifier::IllegalCharacter(_, '-'))
    );
    assert_matches!(
        CreateKeyspaceSpecification::new().name("1library"),
        Err(BadIdentifier::BadFirstCharacter(_))
    );
    assert_matches!(
        CreateIndexSpecification::new().table(""),
        Err(BadIdentifier::Empty)
    );
}
