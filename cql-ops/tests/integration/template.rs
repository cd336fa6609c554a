use std::net::{IpAddr, Ipv4Addr};

use assert_matches::assert_matches;
use cql_ops::cql_to_rust::{FromCqlValError, FromRowError};
use cql_ops::errors::{ExecutionError, OperationError, SingleRowError};
use cql_ops::processing::ResultProcessor;
use cql_ops::query::Select;
use cql_ops::session::{Host, Session};
use cql_ops::statement::source::{SimplePreparedStatementCreator, ValuesBinder};
use cql_ops::statement::{
    BoundStatement, PreparedStatement, SimpleStatement, Statement, StatementSource,
};
use cql_ops::{ColumnSpec, ColumnType, CqlValue, ResultSet, Row};

use crate::utils::{books, setup_tracing, text, ScriptedSession, BOOKS};

fn isbn_of(row: Row, _: usize) -> Result<String, FromRowError> {
    row.get_by_name("isbn")
}

#[test]
fn test_map_preserves_row_order() {
    setup_tracing();
    let (template, _) = books().into_template();

    let isbns = template.query(BOOKS).map(isbn_of).execute().unwrap();
    assert_eq!(isbns, ["1234", "2345", "3456"]);
}

#[test]
fn test_for_each_and_transform() {
    setup_tracing();
    let (template, _) = books().into_template();

    let mut titles = String::new();
    template
        .query(BOOKS)
        .for_each(|row: Row| -> Result<(), FromRowError> {
            titles.push_str(&row.get_by_name::<String>("title")?);
            Ok(())
        })
        .execute()
        .unwrap();
    assert_eq!(titles, "ABC");

    let last = template
        .query(BOOKS)
        .transform(|rs: ResultSet| -> Result<Option<String>, OperationError> {
            let mut last = None;
            for row in rs {
                last = Some(row?.get_by_name::<String>("isbn")?);
            }
            Ok(last)
        })
        .execute()
        .unwrap();
    assert_eq!(last.as_deref(), Some("3456"));
}

#[test]
fn test_single_result_cardinality() {
    setup_tracing();
    let one = "SELECT isbn, title FROM book WHERE isbn = ?";
    let none = "SELECT isbn, title FROM book WHERE isbn = '999999999'";
    let specs = vec![
        ColumnSpec::new("isbn", ColumnType::Text),
        ColumnSpec::new("title", ColumnType::Text),
    ];
    let (template, _) = books()
        .with_rows(one, specs.clone(), vec![vec![text("1234"), text("A")]])
        .with_rows(none, specs, Vec::new())
        .into_template();

    let isbn = template
        .query(SimpleStatement::with_values(one, vec![text("1234")]))
        .single_result()
        .first_column::<String>()
        .execute()
        .unwrap();
    assert_eq!(isbn, "1234");

    assert_matches!(
        template.query(none).single_result().map(isbn_of).execute(),
        Err(OperationError::SingleRow(SingleRowError::EmptyResult))
    );
    assert_matches!(
        template.query(BOOKS).single_result().map(isbn_of).execute(),
        Err(OperationError::SingleRow(SingleRowError::NonUniqueResult))
    );
}

#[test]
fn test_first_column_does_not_cast() {
    let (template, _) = books().into_template();

    assert_matches!(
        template.query(BOOKS).first_column::<f32>().execute(),
        Err(OperationError::FromRow(FromRowError::BadCqlVal {
            err: FromCqlValError::BadCqlType {
                expected: "float",
                got: "text"
            },
            column: 0
        }))
    );
}

#[test]
fn test_count_with_built_statement() {
    let count_cql = "SELECT COUNT(*) FROM book";
    let (template, _) = books()
        .with_rows(
            count_cql,
            vec![ColumnSpec::new("count", ColumnType::BigInt)],
            vec![vec![Some(CqlValue::BigInt(3))]],
        )
        .into_template();

    let statement = Select::count_all().from("book").unwrap().build().unwrap();
    let count = template
        .query(statement)
        .single_result()
        .first_column::<i64>()
        .execute()
        .unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_truncate() {
    let (template, session) = books().into_template();

    template.truncate("book").unwrap().execute().unwrap();
    assert_eq!(session.executed_cql(), ["TRUNCATE book"]);
}

#[test]
fn test_prepared_statements() {
    let one = "SELECT isbn, title FROM book WHERE isbn = ?";
    let (template, session) = books()
        .with_rows(
            one,
            vec![ColumnSpec::new("isbn", ColumnType::Text)],
            vec![vec![text("2345")]],
        )
        .into_template();

    let isbn = template
        .query(StatementSource::prepared(
            SimplePreparedStatementCreator(one.to_owned()),
            ValuesBinder(vec![text("2345")]),
        ))
        .single_result()
        .first_column::<String>()
        .execute()
        .unwrap();
    assert_eq!(isbn, "2345");

    let creator = |session: &dyn Session| -> Result<PreparedStatement, OperationError> {
        Ok(session.prepare(one)?)
    };
    let binder = |prepared: &PreparedStatement| -> Result<BoundStatement, OperationError> {
        Ok(prepared.bind(vec![text("2345")]))
    };
    template
        .execute(StatementSource::prepared(creator, binder))
        .unwrap();

    assert_eq!(session.prepared(), [one, one]);
    let executed = session.executed();
    assert_matches!(&executed[1], Statement::Bound(bound) if bound.get_values() == [text("2345")]);
}

#[test]
fn test_statement_creator_failures_are_returned() {
    let (template, session) = books().into_template();

    let failing = || -> Result<Statement, OperationError> {
        Err(ExecutionError::BadStatement("no statement".to_owned()).into())
    };
    assert_matches!(
        template.query(StatementSource::from_creator(failing)).execute(),
        Err(OperationError::Execution(ExecutionError::BadStatement(_)))
    );
    assert!(session.executed().is_empty());
}

#[test]
fn test_post_hoc_processing_reuses_one_result() {
    let (template, _) = books().into_template();

    let rows = template.execute(BOOKS).unwrap().into_rows().unwrap();
    let specs = rows[0].col_specs().to_vec();
    let replay = || {
        ResultSet::buffered(
            specs.clone(),
            rows.iter().map(|row| row.columns.clone()).collect(),
        )
    };

    assert_eq!(
        template.process_first_column::<String>(replay()).unwrap(),
        ["1234", "2345", "3456"]
    );
    assert_eq!(template.process_as_map(replay()).unwrap()[1]["title"], text("B"));
    assert_eq!(
        template.process_one(replay(), isbn_of, false).unwrap(),
        Some("1234".to_owned())
    );
    assert_matches!(
        template.process_one_as_map(replay()),
        Err(OperationError::SingleRow(SingleRowError::NonUniqueResult))
    );
    assert_eq!(
        template
            .process(replay(), ResultProcessor::rows(isbn_of))
            .and_then(|processed| processed.into_many())
            .unwrap()
            .len(),
        3
    );
}

#[test]
fn test_execute_in_session() {
    let (template, _) = books().into_template();

    let hosts = template
        .execute_in_session(|session| Ok(session.describe_ring()?.len()))
        .unwrap();
    assert_eq!(hosts, 0);
}

#[test]
fn test_describe_ring() {
    setup_tracing();
    let first = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));
    let second = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let (template, _) = ScriptedSession::new()
        .with_host(first, "eu-west", "r1")
        .with_host(second, "eu-west", "r2")
        .into_template();

    let members = template.describe_ring().unwrap();
    assert_eq!(
        members.iter().map(|member| member.address).collect::<Vec<_>>(),
        [first, second]
    );
    assert_eq!(members[1].host_name, "10.0.0.1");
    assert_eq!(members[1].rack.as_deref(), Some("r2"));

    let racks = template
        .describe_ring_with(|host: &Host| host.rack.clone().unwrap_or_default())
        .unwrap();
    assert_eq!(racks, ["r1", "r2"]);
}

#[tokio::test]
async fn test_async_and_sync_results_are_equal() {
    setup_tracing();
    let (template, _) = books().into_template();

    let sync = template.query(BOOKS).map(isbn_of).execute().unwrap();
    let not_sync = template
        .query(BOOKS)
        .map(isbn_of)
        .execute_async()
        .await
        .unwrap();
    assert_eq!(sync, not_sync);

    let sync = template.query(BOOKS).as_map().execute().unwrap();
    let not_sync = template.query(BOOKS).as_map().execute_async().await.unwrap();
    assert_eq!(sync, not_sync);
}

#[tokio::test]
async fn test_async_single_result_pulls_two_rows() {
    setup_tracing();
    let (template, session) = books().into_template();

    let result = template
        .query(BOOKS)
        .single_result()
        .map(isbn_of)
        .execute_async()
        .await;
    assert_matches!(
        result,
        Err(OperationError::SingleRow(SingleRowError::NonUniqueResult))
    );
    assert_eq!(session.pulled_rows(), 2);
}

#[tokio::test]
async fn test_async_failures_surface_on_resolution() {
    setup_tracing();
    let (template, session) = books().into_template();

    let fut = template.execute_async("SELECT * FROM missing");
    assert!(session.executed().is_empty());
    assert_matches!(
        fut.await,
        Err(OperationError::Execution(ExecutionError::DbError(_, _)))
    );
}

#[test]
fn test_blocking_wait() {
    let (template, _) = books().into_template();

    let titles = template
        .query(BOOKS)
        .map(|row: Row, _: usize| row.get_by_name::<String>("title"))
        .execute_async()
        .map(|titles| titles.join(""))
        .wait()
        .unwrap();
    assert_eq!(titles, "ABC");
}
