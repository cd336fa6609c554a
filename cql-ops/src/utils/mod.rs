#[cfg(test)]
pub(crate) mod test_utils;

use std::error::Error;

use tracing::{debug, field::display, Span};

pub(crate) trait RecordError {
    fn record_error(self, span: &Span) -> Self;
}

impl<T, E> RecordError for Result<T, E>
where
    E: Error,
{
    fn record_error(self, span: &Span) -> Self {
        if let Err(ref err) = self {
            span.record("error", display(err));
            span.in_scope(|| debug!("{}", "Finished with error"));
        }
        self
    }
}
