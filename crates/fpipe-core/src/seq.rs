//! Sequence adapter: one pull-based cursor shape for eager and suspending sources.
//!
//! A *lazy sequence* is anything implementing [`Seq<T>`]: a
//! [`Stream`](futures_core::Stream) of `Result<T>` that can be polled without
//! pinning (`Unpin`). Two kinds of source feed it:
//!
//! - [`Eager`]: an in-memory iterator; every pull completes immediately.
//! - [`Cursor`]: any asynchronous stream; a pull may suspend until the next
//!   value (or the end) is available.
//!
//! Both are fused: pulling again after exhaustion keeps returning `None`.
//! Sources that do not have the cursor shape are rejected at compile time by
//! the `Stream` bound.

use crate::error::Result;
use futures_core::{ready, FusedStream, Stream};
use std::future::Future;
use std::ops::RangeInclusive;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A lazy, fallible, single-pass sequence of `T`.
///
/// Blanket-implemented; never implement it by hand.
pub trait Seq<T>: Stream<Item = Result<T>> + Unpin {}

impl<T, S> Seq<T> for S where S: Stream<Item = Result<T>> + Unpin + ?Sized {}

/// Type-erased sequence, handy when the concrete source differs by branch.
pub type BoxSeq<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/* ------------------------------ eager source ------------------------------ */

/// Sequence over an already-materialized iterator.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless pulled"]
pub struct Eager<I> {
    iter: Option<I>,
}

impl<I> Unpin for Eager<I> {}

impl<I: Iterator> Stream for Eager<I> {
    type Item = Result<I::Item>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let next = this.iter.as_mut().and_then(Iterator::next);
        if next.is_none() {
            this.iter = None;
        }
        Poll::Ready(next.map(Ok))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.as_ref().map_or((0, Some(0)), Iterator::size_hint)
    }
}

impl<I: Iterator> FusedStream for Eager<I> {
    fn is_terminated(&self) -> bool {
        self.iter.is_none()
    }
}

/// Lift any iterable into a lazy sequence.
pub fn from_iter<I: IntoIterator>(items: I) -> Eager<I::IntoIter> {
    Eager {
        iter: Some(items.into_iter()),
    }
}

/// `from ..= to`, lazily.
pub fn range_inclusive<T>(from: T, to: T) -> Eager<RangeInclusive<T>>
where
    RangeInclusive<T>: Iterator<Item = T>,
{
    from_iter(from..=to)
}

/* ----------------------------- suspending source -------------------------- */

/// Fused wrapper around an asynchronous stream of `Result<T>`.
#[derive(Debug)]
#[must_use = "sequences do nothing unless pulled"]
pub struct Cursor<S> {
    stream: S,
    done: bool,
}

impl<S> Cursor<S> {
    /// Consume the cursor, returning the wrapped stream.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<T, S> Stream for Cursor<S>
where
    S: Stream<Item = Result<T>> + Unpin,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        let item = ready!(Pin::new(&mut this.stream).poll_next(cx));
        if item.is_none() {
            this.done = true;
        }
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            self.stream.size_hint()
        }
    }
}

impl<T, S> FusedStream for Cursor<S>
where
    S: Stream<Item = Result<T>> + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}

/// Adapt an asynchronous stream into a lazy sequence.
pub fn from_stream<T, S>(stream: S) -> Cursor<S>
where
    S: Stream<Item = Result<T>> + Unpin,
{
    Cursor {
        stream,
        done: false,
    }
}

/* --------------------------------- unfold --------------------------------- */

/// Unbounded `seed, f(seed), f(f(seed)), …`.
///
/// `f` only runs when the next element is pulled.
#[must_use = "sequences do nothing unless pulled"]
pub struct Iterate<T, F> {
    seed: Option<T>,
    last: Option<T>,
    f: F,
}

impl<T, F> Unpin for Iterate<T, F> {}

impl<T, F> Stream for Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(seed) = this.seed.take() {
            this.last = Some(seed.clone());
            return Poll::Ready(Some(Ok(seed)));
        }
        let Some(prev) = this.last.as_ref() else {
            return Poll::Ready(None);
        };
        let next = (this.f)(prev);
        this.last = Some(next.clone());
        Poll::Ready(Some(Ok(next)))
    }
}

/// Emit `seed`, then repeatedly apply `f` to the previous element.
pub fn iterate<T, F>(seed: T, f: F) -> Iterate<T, F>
where
    T: Clone,
    F: FnMut(&T) -> T,
{
    Iterate {
        seed: Some(seed),
        last: None,
        f,
    }
}

/// [`Iterate`] with a suspending, fallible step. Ends after the first error.
#[must_use = "sequences do nothing unless pulled"]
pub struct IterateAsync<T, F, Fut> {
    seed: Option<T>,
    last: Option<T>,
    pending: Option<Pin<Box<Fut>>>,
    f: F,
}

impl<T, F, Fut> Unpin for IterateAsync<T, F, Fut> {}

impl<T, F, Fut> Stream for IterateAsync<T, F, Fut>
where
    T: Clone,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if let Some(seed) = this.seed.take() {
            this.last = Some(seed.clone());
            return Poll::Ready(Some(Ok(seed)));
        }
        loop {
            if let Some(fut) = this.pending.as_mut() {
                let out = ready!(fut.as_mut().poll(cx));
                this.pending = None;
                return Poll::Ready(Some(match out {
                    Ok(next) => {
                        this.last = Some(next.clone());
                        Ok(next)
                    }
                    Err(e) => {
                        this.last = None;
                        Err(e)
                    }
                }));
            }
            match this.last.as_ref() {
                Some(prev) => this.pending = Some(Box::pin((this.f)(prev))),
                None => return Poll::Ready(None),
            }
        }
    }
}

/// Emit `seed`, then repeatedly await `f` on the previous element.
pub fn iterate_async<T, F, Fut>(seed: T, f: F) -> IterateAsync<T, F, Fut>
where
    T: Clone,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    IterateAsync {
        seed: Some(seed),
        last: None,
        pending: None,
        f,
    }
}
