//! Terminal consumers: drive a sequence to a single awaited value.
//!
//! Each terminal stops at the first error it pulls and returns it; elements
//! after the error are never requested.

use crate::error::Result;
use futures_core::{ready, Stream};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// See [`SeqExt::reduce`](crate::SeqExt::reduce).
#[must_use = "futures do nothing unless awaited"]
pub struct Fold<S, A, F> {
    stream: S,
    acc: Option<A>,
    f: F,
}

impl<S, A, F> Unpin for Fold<S, A, F> {}

impl<S, A, F> Fold<S, A, F> {
    pub(crate) const fn new(stream: S, init: A, f: F) -> Self {
        Self {
            stream,
            acc: Some(init),
            f,
        }
    }
}

impl<T, S, A, F> Future for Fold<S, A, F>
where
    S: Stream<Item = Result<T>> + Unpin,
    F: FnMut(A, T) -> A,
{
    type Output = Result<A>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.stream).poll_next(cx)) {
                Some(Ok(x)) => {
                    if let Some(acc) = this.acc.take() {
                        this.acc = Some((this.f)(acc, x));
                    }
                }
                Some(Err(e)) => return Poll::Ready(Err(e)),
                None => {
                    return match this.acc.take() {
                        Some(acc) => Poll::Ready(Ok(acc)),
                        None => panic!("`Fold` polled after completion"),
                    }
                }
            }
        }
    }
}

/// See [`SeqExt::take_first`](crate::SeqExt::take_first).
#[must_use = "futures do nothing unless awaited"]
pub struct TakeFirst<S> {
    stream: S,
}

impl<S> Unpin for TakeFirst<S> {}

impl<S> TakeFirst<S> {
    pub(crate) const fn new(stream: S) -> Self {
        Self { stream }
    }
}

impl<T, S> Future for TakeFirst<S>
where
    S: Stream<Item = Result<T>> + Unpin,
{
    type Output = Result<Option<T>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let item = ready!(Pin::new(&mut this.stream).poll_next(cx));
        Poll::Ready(item.transpose())
    }
}

/// See [`SeqExt::collect`](crate::SeqExt::collect).
#[must_use = "futures do nothing unless awaited"]
pub struct Collect<S, C> {
    stream: S,
    out: Option<C>,
}

impl<S, C> Unpin for Collect<S, C> {}

impl<S, C: Default> Collect<S, C> {
    pub(crate) fn new(stream: S) -> Self {
        Self {
            stream,
            out: Some(C::default()),
        }
    }
}

impl<T, S, C> Future for Collect<S, C>
where
    S: Stream<Item = Result<T>> + Unpin,
    C: Extend<T>,
{
    type Output = Result<C>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.stream).poll_next(cx)) {
                Some(Ok(x)) => {
                    if let Some(out) = this.out.as_mut() {
                        out.extend(Some(x));
                    }
                }
                Some(Err(e)) => return Poll::Ready(Err(e)),
                None => {
                    return match this.out.take() {
                        Some(out) => Poll::Ready(Ok(out)),
                        None => panic!("`Collect` polled after completion"),
                    }
                }
            }
        }
    }
}
