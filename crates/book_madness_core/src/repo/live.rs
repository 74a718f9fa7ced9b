//! Live query handles.
//!
//! A [`LiveQuery`] pairs a loader closure with a receiver on the store's
//! change counter. The first [`LiveQuery::next`] call yields the current
//! result at once; each later call waits for the counter to move and then
//! re-runs the loader. Writes that land between two polls coalesce into one
//! emission carrying the latest state.

use crate::repo::book_store::{RepoError, RepoResult};
use futures_util::stream::{self, Stream};
use tokio::sync::watch;

type Loader<T> = Box<dyn Fn() -> RepoResult<T> + Send + Sync>;

/// Continuously updated query result.
///
/// Dropping the handle is the only way to end the subscription.
pub struct LiveQuery<T> {
    changes: watch::Receiver<u64>,
    load: Loader<T>,
    primed: bool,
}

impl<T: 'static> LiveQuery<T> {
    pub(crate) fn new(
        changes: watch::Receiver<u64>,
        load: impl Fn() -> RepoResult<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            changes,
            load: Box::new(load),
            primed: false,
        }
    }

    /// Waits for the next emission.
    ///
    /// Returns `None` once every handle to the owning store has been dropped.
    /// The query itself runs synchronously on the polling thread while holding
    /// the store's connection lock.
    pub async fn next(&mut self) -> Option<RepoResult<T>> {
        if self.primed {
            self.changes.changed().await.ok()?;
        } else {
            self.primed = true;
            let _ = self.changes.borrow_and_update();
        }
        match (self.load)() {
            Err(RepoError::StoreClosed) => None,
            result => Some(result),
        }
    }

    /// Runs the query once without touching the subscription state.
    pub fn current(&self) -> RepoResult<T> {
        (self.load)()
    }

    /// Whether a write landed since the last emission.
    pub fn has_pending_change(&self) -> bool {
        !self.primed || self.changes.has_changed().unwrap_or(false)
    }

    /// Derives a new live query that applies `f` to every emission.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> LiveQuery<U> {
        let load = self.load;
        LiveQuery {
            changes: self.changes,
            load: Box::new(move || load().map(&f)),
            primed: self.primed,
        }
    }

    /// Adapts the handle into a [`Stream`] of emissions.
    pub fn into_stream(self) -> impl Stream<Item = RepoResult<T>> + Send
    where
        T: Send,
    {
        stream::unfold(self, |mut query| async move {
            let item = query.next().await?;
            Some((item, query))
        })
    }
}
