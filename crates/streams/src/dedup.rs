//! Suppression of consecutive structurally-equal emissions.

use std::pin::Pin;
use std::task::{Context, Poll, ready};

use futures::Stream;
use pin_project_lite::pin_project;

/// Extension methods for deduplicating stream emissions.
pub trait StreamDedupExt: Stream + Sized {
    /// Suppress an item structurally equal to the previously emitted item.
    fn dedup(self) -> Dedup<Self, Self::Item>
    where
        Self::Item: Clone + PartialEq,
    {
        Dedup { inner: self, last: None }
    }

    /// Like [`dedup`](Self::dedup) for fallible streams: only `Ok` values
    /// participate in comparison, and errors always pass through (an error
    /// is an event, not a snapshot).
    fn dedup_ok<T, E>(self) -> DedupOk<Self, T>
    where
        Self: Stream<Item = Result<T, E>>,
        T: Clone + PartialEq,
    {
        DedupOk { inner: self, last: None }
    }
}

impl<S: Stream + Sized> StreamDedupExt for S {}

pin_project! {
    /// Stream returned by [`StreamDedupExt::dedup`].
    #[must_use = "streams do nothing unless polled"]
    pub struct Dedup<S, T> {
        #[pin]
        inner: S,
        last: Option<T>,
    }
}

impl<S> Stream for Dedup<S, S::Item>
where
    S: Stream,
    S::Item: Clone + PartialEq,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(item) => {
                    if this.last.as_ref() == Some(&item) {
                        continue;
                    }
                    *this.last = Some(item.clone());
                    return Poll::Ready(Some(item));
                },
                None => return Poll::Ready(None),
            }
        }
    }
}

pin_project! {
    /// Stream returned by [`StreamDedupExt::dedup_ok`].
    #[must_use = "streams do nothing unless polled"]
    pub struct DedupOk<S, T> {
        #[pin]
        inner: S,
        last: Option<T>,
    }
}

impl<S, T, E> Stream for DedupOk<S, T>
where
    S: Stream<Item = Result<T, E>>,
    T: Clone + PartialEq,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(item)) => {
                    if this.last.as_ref() == Some(&item) {
                        continue;
                    }
                    *this.last = Some(item.clone());
                    return Poll::Ready(Some(Ok(item)));
                },
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => return Poll::Ready(None),
            }
        }
    }
}
