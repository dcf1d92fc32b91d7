use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::HistoryError;

/// Pending navigation, settles when the consumer signals completion
///
/// Returned by [`HistoryStore::navigate`](crate::HistoryStore::navigate). It
/// resolves on the next
/// [`on_transition_complete`](crate::HistoryStore::on_transition_complete),
/// even if later navigations were issued in between. There is no timeout: a
/// consumer that never signals completion leaves it pending.
#[derive(Debug)]
pub struct Transition {
    receiver: oneshot::Receiver<()>,
}

impl Transition {
    pub(crate) fn new(receiver: oneshot::Receiver<()>) -> Self {
        Transition { receiver }
    }
}

impl Future for Transition {
    type Output = Result<(), HistoryError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.map_err(|_| HistoryError::StoreDropped))
    }
}
