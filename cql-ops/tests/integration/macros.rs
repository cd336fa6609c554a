use assert_matches::assert_matches;
use cql_ops::convert::{ConvertedValue, EnumConstant, EnumRegistry, PropertyType, ValueConverter};
use cql_ops::cql_to_rust::{FromCqlValError, FromRowError};
use cql_ops::errors::OperationError;
use cql_ops::{ColumnSpec, ColumnType, CqlEnum, CqlValue, FromRow, TableEntity, TemplateConfig};

use crate::utils::{setup_tracing, text, ScriptedSession};

#[derive(cql_ops::CqlEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Genre {
    Fiction,
    #[cql_ops(rename = "NON_FICTION")]
    NonFiction,
}

#[derive(cql_ops::FromRow, Debug, PartialEq)]
struct Book {
    isbn: String,
    #[cql_ops(rename = "book_title")]
    title: String,
    genre: Option<Genre>,
    pages: Option<i32>,
}

impl TableEntity for Book {
    fn table_name() -> &'static str {
        "book"
    }
}

const SELECT_BOOKS: &str = "SELECT * FROM book";

fn library() -> ScriptedSession {
    ScriptedSession::new().with_rows(
        SELECT_BOOKS,
        vec![
            ColumnSpec::new("pages", ColumnType::Int),
            ColumnSpec::new("genre", ColumnType::Text),
            ColumnSpec::new("book_title", ColumnType::Text),
            ColumnSpec::new("isbn", ColumnType::Text),
        ],
        vec![
            vec![Some(CqlValue::Int(320)), text("Fiction"), text("Dune"), text("1234")],
            vec![None, text("NON_FICTION"), text("Cosmos"), text("2345")],
            vec![None, None, text("Untitled"), text("3456")],
        ],
    )
}

#[test]
fn test_derived_enum_names() {
    assert_eq!(Genre::TYPE_NAME, "Genre");
    assert_eq!(Genre::CONSTANTS, ["Fiction", "NON_FICTION"]);
    assert_eq!(Genre::NonFiction.name(), "NON_FICTION");
    assert_eq!(Genre::from_name("NON_FICTION"), Some(Genre::NonFiction));
    assert_eq!(Genre::from_name("NonFiction"), None);
    assert_eq!(CqlValue::from(Genre::Fiction), CqlValue::Text("Fiction".to_owned()));
}

#[test]
fn test_get_all_reads_derived_entities() {
    setup_tracing();
    let (template, session) = library().into_template();

    let books = template.get_all::<Book>().unwrap().execute().unwrap();
    assert_eq!(session.executed_cql(), [SELECT_BOOKS]);
    assert_eq!(
        books[0],
        Book {
            isbn: "1234".to_owned(),
            title: "Dune".to_owned(),
            genre: Some(Genre::Fiction),
            pages: Some(320),
        }
    );
    assert_eq!(books[1].genre, Some(Genre::NonFiction));
    assert_eq!(books[2].genre, None);
    assert_eq!(books[2].pages, None);
}

#[test]
fn test_typed_rows() {
    let (template, _) = library().into_template();

    let titles: Vec<String> = template
        .query(SELECT_BOOKS)
        .typed::<Book>()
        .execute()
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(titles, ["Dune", "Cosmos", "Untitled"]);
}

#[test]
fn test_unknown_enum_constant_fails_the_row() {
    let (template, _) = ScriptedSession::new()
        .with_rows(
            SELECT_BOOKS,
            vec![
                ColumnSpec::new("isbn", ColumnType::Text),
                ColumnSpec::new("book_title", ColumnType::Text),
                ColumnSpec::new("genre", ColumnType::Text),
                ColumnSpec::new("pages", ColumnType::Int),
            ],
            vec![vec![text("1234"), text("Dune"), text("Poetry"), None]],
        )
        .into_template();

    assert_matches!(
        template.get_all::<Book>().unwrap().execute(),
        Err(OperationError::FromRow(FromRowError::BadCqlVal {
            err: FromCqlValError::UnknownEnumConstant { type_name: "Genre", .. },
            column: 2
        }))
    );
}

#[test]
fn test_missing_column_fails_the_row() {
    let (template, _) = ScriptedSession::new()
        .with_rows(
            SELECT_BOOKS,
            vec![ColumnSpec::new("isbn", ColumnType::Text)],
            vec![vec![text("1234")]],
        )
        .into_template();

    assert_matches!(
        template.get_all::<Book>().unwrap().execute(),
        Err(OperationError::FromRow(FromRowError::NoSuchColumn(column))) if column == "book_title"
    );
}

#[test]
fn test_value_converter_from_template_config() {
    let mut registry = EnumRegistry::new();
    registry.register::<Genre>();
    let config = TemplateConfig::builder()
        .value_converter(ValueConverter::new(registry))
        .build();
    let template = cql_ops::Template::with_config(std::sync::Arc::new(ScriptedSession::new()), config);
    let converter = template.value_converter();

    let read = converter
        .after_read(&PropertyType::of_enum::<Genre>(), text("NON_FICTION"))
        .unwrap();
    assert_matches!(&read, Some(ConvertedValue::Enum(constant)) if constant.to_enum::<Genre>() == Some(Genre::NonFiction));
    assert_eq!(converter.before_write(read), text("NON_FICTION"));

    assert_eq!(
        converter.before_write(Some(ConvertedValue::Enum(EnumConstant::of(&Genre::Fiction)))),
        text("Fiction")
    );
    assert_eq!(
        converter.after_read(&PropertyType::Plain, Some(CqlValue::Int(7))),
        Ok(Some(ConvertedValue::Value(CqlValue::Int(7))))
    );
    assert_eq!(converter.after_read(&PropertyType::of_enum::<Genre>(), None), Ok(None));
    assert_matches!(
        converter.after_read(&PropertyType::of_enum::<Genre>(), text("Poetry")),
        Err(FromCqlValError::UnknownEnumConstant { .. })
    );
}

#[test]
fn test_derived_from_row_ignores_column_order() {
    let row = cql_ops::Row::new(
        vec![
            ColumnSpec::new("book_title", ColumnType::Text),
            ColumnSpec::new("isbn", ColumnType::Text),
            ColumnSpec::new("pages", ColumnType::Int),
            ColumnSpec::new("genre", ColumnType::Text),
        ]
        .into(),
        vec![text("Dune"), text("1234"), None, None],
    );
    assert_eq!(
        Book::from_row(row).unwrap(),
        Book {
            isbn: "1234".to_owned(),
            title: "Dune".to_owned(),
            genre: None,
            pages: None,
        }
    );
}
