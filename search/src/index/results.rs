use super::error::IndexError;
use crate::engine::error::EngineError;
use labelidx_core::types::{DocId, IndexName};

/// Forward-only sequence of document ids matched by one query.
///
/// Carries the name of the index it was opened against and reads only from
/// that index. Once exhausted it stays exhausted.
pub struct QueryResults<R> {
    index: IndexName,
    inner: R,
    done: bool,
}

impl<R> QueryResults<R>
where
    R: Iterator<Item = Result<DocId, EngineError>>,
{
    pub(crate) fn new(index: IndexName, inner: R) -> Self {
        Self {
            index,
            inner,
            done: false,
        }
    }

    /// Index the query was opened against.
    pub fn index(&self) -> &IndexName {
        &self.index
    }

    /// Returns the next id, or `None` at the end of results.
    pub fn advance(&mut self) -> Result<Option<DocId>, IndexError> {
        if self.done {
            return Ok(None);
        }
        match self.inner.next() {
            Some(Ok(id)) => Ok(Some(id)),
            Some(Err(e)) => Err(e.into()),
            None => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

impl<R> Iterator for QueryResults<R>
where
    R: Iterator<Item = Result<DocId, EngineError>>,
{
    type Item = Result<DocId, IndexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}

impl<R> std::iter::FusedIterator for QueryResults<R> where
    R: Iterator<Item = Result<DocId, EngineError>>
{
}
