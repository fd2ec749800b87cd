//! AND-join over independent fallible streams.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::{Stream, StreamExt};
use pin_project_lite::pin_project;

/// Combine two fallible streams into a stream of latest-value pairs.
///
/// No combined item is emitted until *both* sources have produced at least
/// one `Ok` value. From then on, every emission from either side yields a
/// new pair built from the latest value of each slot (last write wins, no
/// buffering). The first `Err` from either side is yielded once and ends
/// the stream; partial state is discarded rather than shown inconsistently.
/// The stream completes when both sources complete, and dropping it drops
/// both children as a group.
pub fn combine_latest<A, B, TA, TB, E>(left: A, right: B) -> CombineLatest2<A, B, TA, TB>
where
    A: Stream<Item = Result<TA, E>>,
    B: Stream<Item = Result<TB, E>>,
    TA: Clone,
    TB: Clone,
{
    CombineLatest2 {
        left,
        right,
        left_done: false,
        right_done: false,
        latest_left: None,
        latest_right: None,
        failed: false,
    }
}

/// Three-source AND-join, built by nesting [`combine_latest`].
pub fn combine_latest3<A, B, C, TA, TB, TC, E>(
    a: A,
    b: B,
    c: C,
) -> impl Stream<Item = Result<(TA, TB, TC), E>>
where
    A: Stream<Item = Result<TA, E>>,
    B: Stream<Item = Result<TB, E>>,
    C: Stream<Item = Result<TC, E>>,
    TA: Clone,
    TB: Clone,
    TC: Clone,
{
    combine_latest(combine_latest(a, b), c).map(|result| result.map(|((a, b), c)| (a, b, c)))
}

pin_project! {
    /// Stream returned by [`combine_latest`].
    #[must_use = "streams do nothing unless polled"]
    pub struct CombineLatest2<A, B, TA, TB> {
        #[pin]
        left: A,
        #[pin]
        right: B,
        left_done: bool,
        right_done: bool,
        latest_left: Option<TA>,
        latest_right: Option<TB>,
        failed: bool,
    }
}

impl<A, B, TA, TB, E> Stream for CombineLatest2<A, B, TA, TB>
where
    A: Stream<Item = Result<TA, E>>,
    B: Stream<Item = Result<TB, E>>,
    TA: Clone,
    TB: Clone,
{
    type Item = Result<(TA, TB), E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        if *this.failed {
            return Poll::Ready(None);
        }
        let mut dirty = false;
        // Drain whatever each side has ready; bursts coalesce into one
        // combined emission, which is exactly the latest-wins contract.
        while !*this.left_done {
            match this.left.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(item))) => {
                    *this.latest_left = Some(item);
                    dirty = true;
                },
                Poll::Ready(Some(Err(err))) => {
                    *this.failed = true;
                    return Poll::Ready(Some(Err(err)));
                },
                Poll::Ready(None) => *this.left_done = true,
                Poll::Pending => break,
            }
        }
        while !*this.right_done {
            match this.right.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(item))) => {
                    *this.latest_right = Some(item);
                    dirty = true;
                },
                Poll::Ready(Some(Err(err))) => {
                    *this.failed = true;
                    return Poll::Ready(Some(Err(err)));
                },
                Poll::Ready(None) => *this.right_done = true,
                Poll::Pending => break,
            }
        }
        if dirty {
            if let (Some(left), Some(right)) = (this.latest_left.as_ref(), this.latest_right.as_ref()) {
                return Poll::Ready(Some(Ok((left.clone(), right.clone()))));
            }
        }
        if *this.left_done && *this.right_done {
            return Poll::Ready(None);
        }
        Poll::Pending
    }
}
