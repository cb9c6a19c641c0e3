//! Pipeline stages: lazy sequence → lazy sequence.
//!
//! Every stage pulls from its upstream only when it is itself pulled, keeps
//! input order, and forwards upstream errors untouched. Once upstream reports
//! its end, a stage keeps reporting the end without polling upstream again,
//! so stages are safe over streams that are not fused. Closures handed to the
//! `*_async` variants return futures that are boxed while they run, so the
//! stages themselves stay `Unpin`.
//!
//! Construct stages through [`SeqExt`](crate::SeqExt); the structs are public so
//! callers can name pipeline types.

use crate::error::{FpError, Result};
use crate::seq::Seq;
use futures_core::{ready, FusedStream, Stream};
use std::collections::VecDeque;
use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

#[inline]
fn pull<T, S: Seq<T>>(stream: &mut S, cx: &mut Context<'_>) -> Poll<Option<Result<T>>> {
    Pin::new(stream).poll_next(cx)
}

/// Like [`pull`], but once upstream has ended it is never polled again.
#[inline]
fn pull_fused<T, S: Seq<T>>(
    stream: &mut S,
    done: &mut bool,
    cx: &mut Context<'_>,
) -> Poll<Option<Result<T>>> {
    if *done {
        return Poll::Ready(None);
    }
    let item = ready!(pull(stream, cx));
    *done = item.is_none();
    Poll::Ready(item)
}

/* ----------------------------------- map ---------------------------------- */

/// See [`SeqExt::map`](crate::SeqExt::map).
#[must_use = "sequences do nothing unless pulled"]
pub struct Map<S, F> {
    stream: S,
    f: F,
    done: bool,
}

impl<S, F> Unpin for Map<S, F> {}

impl<S, F> Map<S, F> {
    pub(crate) const fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            done: false,
        }
    }
}

impl<T, U, S, F> Stream for Map<S, F>
where
    S: Stream<Item = Result<T>> + Unpin,
    F: FnMut(T) -> U,
{
    type Item = Result<U>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let item = ready!(pull_fused(&mut this.stream, &mut this.done, cx));
        Poll::Ready(item.map(|r| r.map(&mut this.f)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// See [`SeqExt::map_async`](crate::SeqExt::map_async).
#[must_use = "sequences do nothing unless pulled"]
pub struct MapAsync<S, F, Fut> {
    stream: S,
    f: F,
    pending: Option<Pin<Box<Fut>>>,
    done: bool,
}

impl<S, F, Fut> Unpin for MapAsync<S, F, Fut> {}

impl<S, F, Fut> MapAsync<S, F, Fut> {
    pub(crate) const fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            pending: None,
            done: false,
        }
    }
}

impl<T, S, F, Fut> Stream for MapAsync<S, F, Fut>
where
    S: Stream<Item = Result<T>> + Unpin,
    F: FnMut(T) -> Fut,
    Fut: Future,
{
    type Item = Result<Fut::Output>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(fut) = this.pending.as_mut() {
                let out = ready!(fut.as_mut().poll(cx));
                this.pending = None;
                return Poll::Ready(Some(Ok(out)));
            }
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) => this.pending = Some(Box::pin((this.f)(x))),
                Some(Err(e)) => return Poll::Ready(Some(Err(e))),
                None => return Poll::Ready(None),
            }
        }
    }
}

/* --------------------------------- filter --------------------------------- */

/// See [`SeqExt::filter`](crate::SeqExt::filter).
#[must_use = "sequences do nothing unless pulled"]
pub struct Filter<S, P> {
    stream: S,
    p: P,
    done: bool,
}

impl<S, P> Unpin for Filter<S, P> {}

impl<S, P> Filter<S, P> {
    pub(crate) const fn new(stream: S, p: P) -> Self {
        Self {
            stream,
            p,
            done: false,
        }
    }
}

impl<T, S, P> Stream for Filter<S, P>
where
    S: Stream<Item = Result<T>> + Unpin,
    P: FnMut(&T) -> bool,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) if !(this.p)(&x) => {}
                other => return Poll::Ready(other),
            }
        }
    }
}

/// See [`SeqExt::filter_async`](crate::SeqExt::filter_async).
#[must_use = "sequences do nothing unless pulled"]
pub struct FilterAsync<S, T, P, Fut> {
    stream: S,
    p: P,
    pending: Option<(T, Pin<Box<Fut>>)>,
    done: bool,
}

impl<S, T, P, Fut> Unpin for FilterAsync<S, T, P, Fut> {}

impl<S, T, P, Fut> FilterAsync<S, T, P, Fut> {
    pub(crate) const fn new(stream: S, p: P) -> Self {
        Self {
            stream,
            p,
            pending: None,
            done: false,
        }
    }
}

impl<T, S, P, Fut> Stream for FilterAsync<S, T, P, Fut>
where
    S: Stream<Item = Result<T>> + Unpin,
    P: FnMut(&T) -> Fut,
    Fut: Future<Output = bool>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some((_, fut)) = this.pending.as_mut() {
                let keep = ready!(fut.as_mut().poll(cx));
                if let Some((x, _)) = this.pending.take() {
                    if keep {
                        return Poll::Ready(Some(Ok(x)));
                    }
                }
                continue;
            }
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) => {
                    let fut = Box::pin((this.p)(&x));
                    this.pending = Some((x, fut));
                }
                other => return Poll::Ready(other),
            }
        }
    }
}

/* -------------------------------- flat_map -------------------------------- */

/// See [`SeqExt::flat_map`](crate::SeqExt::flat_map).
#[must_use = "sequences do nothing unless pulled"]
pub struct FlatMap<S, F, U> {
    stream: S,
    f: F,
    inner: Option<U>,
    done: bool,
}

impl<S, F, U> Unpin for FlatMap<S, F, U> {}

impl<S, F, U> FlatMap<S, F, U> {
    pub(crate) const fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            inner: None,
            done: false,
        }
    }
}

impl<T, V, S, F, U> Stream for FlatMap<S, F, U>
where
    S: Stream<Item = Result<T>> + Unpin,
    F: FnMut(T) -> U,
    U: Stream<Item = Result<V>> + Unpin,
{
    type Item = Result<V>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(inner) = this.inner.as_mut() {
                match ready!(pull(inner, cx)) {
                    Some(item) => return Poll::Ready(Some(item)),
                    None => this.inner = None,
                }
            }
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) => this.inner = Some((this.f)(x)),
                Some(Err(e)) => return Poll::Ready(Some(Err(e))),
                None => return Poll::Ready(None),
            }
        }
    }
}

/* -------------------------------- for_each -------------------------------- */

/// See [`SeqExt::for_each`](crate::SeqExt::for_each).
#[must_use = "sequences do nothing unless pulled"]
pub struct ForEach<S, F> {
    stream: S,
    f: F,
    done: bool,
}

impl<S, F> Unpin for ForEach<S, F> {}

impl<S, F> ForEach<S, F> {
    pub(crate) const fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            done: false,
        }
    }
}

impl<T, S, F> Stream for ForEach<S, F>
where
    S: Stream<Item = Result<T>> + Unpin,
    F: FnMut(&T),
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let item = ready!(pull_fused(&mut this.stream, &mut this.done, cx));
        if let Some(Ok(x)) = item.as_ref() {
            (this.f)(x);
        }
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// See [`SeqExt::for_each_async`](crate::SeqExt::for_each_async).
#[must_use = "sequences do nothing unless pulled"]
pub struct ForEachAsync<S, T, F, Fut> {
    stream: S,
    f: F,
    pending: Option<(T, Pin<Box<Fut>>)>,
    done: bool,
}

impl<S, T, F, Fut> Unpin for ForEachAsync<S, T, F, Fut> {}

impl<S, T, F, Fut> ForEachAsync<S, T, F, Fut> {
    pub(crate) const fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            pending: None,
            done: false,
        }
    }
}

impl<T, S, F, Fut> Stream for ForEachAsync<S, T, F, Fut>
where
    S: Stream<Item = Result<T>> + Unpin,
    F: FnMut(&T) -> Fut,
    Fut: Future<Output = ()>,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.pending.is_none() {
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) => {
                    let fut = Box::pin((this.f)(&x));
                    this.pending = Some((x, fut));
                }
                other => return Poll::Ready(other),
            }
        }
        if let Some((_, fut)) = this.pending.as_mut() {
            ready!(fut.as_mut().poll(cx));
        }
        Poll::Ready(this.pending.take().map(|(x, _)| Ok(x)))
    }
}

/* ------------------------------- accumulate ------------------------------- */

/// See [`SeqExt::accumulate`](crate::SeqExt::accumulate).
#[must_use = "sequences do nothing unless pulled"]
pub struct Accumulate<S, A, F> {
    stream: S,
    acc: Option<A>,
    f: F,
    done: bool,
}

impl<S, A, F> Unpin for Accumulate<S, A, F> {}

impl<S, A, F> Accumulate<S, A, F> {
    pub(crate) const fn new(stream: S, init: A, f: F) -> Self {
        Self {
            stream,
            acc: Some(init),
            f,
            done: false,
        }
    }
}

impl<T, A, S, F> Stream for Accumulate<S, A, F>
where
    S: Stream<Item = Result<T>> + Unpin,
    A: Clone,
    F: FnMut(A, T) -> A,
{
    type Item = Result<A>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
            Some(Ok(x)) => {
                let Some(acc) = this.acc.take() else {
                    return Poll::Ready(None);
                };
                let next = (this.f)(acc, x);
                this.acc = Some(next.clone());
                Poll::Ready(Some(Ok(next)))
            }
            Some(Err(e)) => Poll::Ready(Some(Err(e))),
            None => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/* --------------------------------- window --------------------------------- */

/// See [`SeqExt::window`](crate::SeqExt::window).
///
/// The buffer is emitted *before* the element that would overflow it is
/// accepted, so the final full window is never emitted.
#[must_use = "sequences do nothing unless pulled"]
pub struct Window<S, T> {
    stream: S,
    n: usize,
    buf: VecDeque<T>,
    done: bool,
}

impl<S, T> Unpin for Window<S, T> {}

impl<S, T> Window<S, T> {
    pub(crate) fn new(stream: S, n: usize) -> Self {
        Self {
            stream,
            n,
            buf: VecDeque::with_capacity(n),
            done: false,
        }
    }
}

impl<T, S> Stream for Window<S, T>
where
    S: Stream<Item = Result<T>> + Unpin,
    T: Clone,
{
    type Item = Result<Vec<T>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) if this.buf.len() < this.n => this.buf.push_back(x),
                Some(Ok(x)) => {
                    let full: Vec<T> = this.buf.iter().cloned().collect();
                    if this.n > 0 {
                        this.buf.pop_front();
                        this.buf.push_back(x);
                    }
                    return Poll::Ready(Some(Ok(full)));
                }
                Some(Err(e)) => return Poll::Ready(Some(Err(e))),
                None => return Poll::Ready(None),
            }
        }
    }
}

enum Held<T> {
    Empty,
    One(T),
    Two(T, T),
}

/// See [`SeqExt::pairs`](crate::SeqExt::pairs). Same emission rule as a window of two.
#[must_use = "sequences do nothing unless pulled"]
pub struct Pairs<S, T> {
    stream: S,
    held: Held<T>,
    done: bool,
}

impl<S, T> Unpin for Pairs<S, T> {}

impl<S, T> Pairs<S, T> {
    pub(crate) const fn new(stream: S) -> Self {
        Self {
            stream,
            held: Held::Empty,
            done: false,
        }
    }
}

impl<T, S> Stream for Pairs<S, T>
where
    S: Stream<Item = Result<T>> + Unpin,
    T: Clone,
{
    type Item = Result<(T, T)>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let x = match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) => x,
                Some(Err(e)) => return Poll::Ready(Some(Err(e))),
                None => return Poll::Ready(None),
            };
            this.held = match mem::replace(&mut this.held, Held::Empty) {
                Held::Empty => Held::One(x),
                Held::One(a) => Held::Two(a, x),
                Held::Two(a, b) => {
                    this.held = Held::Two(b.clone(), x);
                    return Poll::Ready(Some(Ok((a, b))));
                }
            };
        }
    }
}

/* --------------------------- take / skip by predicate --------------------- */

/// See [`SeqExt::take_until`](crate::SeqExt::take_until).
#[must_use = "sequences do nothing unless pulled"]
pub struct TakeUntil<S, P> {
    stream: S,
    p: P,
    done: bool,
}

impl<S, P> Unpin for TakeUntil<S, P> {}

impl<S, P> TakeUntil<S, P> {
    pub(crate) const fn new(stream: S, p: P) -> Self {
        Self {
            stream,
            p,
            done: false,
        }
    }
}

impl<T, S, P> Stream for TakeUntil<S, P>
where
    S: Stream<Item = Result<T>> + Unpin,
    P: FnMut(&T) -> bool,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        match ready!(pull(&mut this.stream, cx)) {
            Some(Ok(x)) if (this.p)(&x) => {
                this.done = true;
                Poll::Ready(None)
            }
            None => {
                this.done = true;
                Poll::Ready(None)
            }
            other => Poll::Ready(other),
        }
    }
}

impl<T, S, P> FusedStream for TakeUntil<S, P>
where
    S: Stream<Item = Result<T>> + Unpin,
    P: FnMut(&T) -> bool,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}

/// See [`SeqExt::skip_until_after`](crate::SeqExt::skip_until_after).
#[must_use = "sequences do nothing unless pulled"]
pub struct SkipUntilAfter<S, P> {
    stream: S,
    p: P,
    skipping: bool,
    done: bool,
}

impl<S, P> Unpin for SkipUntilAfter<S, P> {}

impl<S, P> SkipUntilAfter<S, P> {
    pub(crate) const fn new(stream: S, p: P) -> Self {
        Self {
            stream,
            p,
            skipping: true,
            done: false,
        }
    }
}

impl<T, S, P> Stream for SkipUntilAfter<S, P>
where
    S: Stream<Item = Result<T>> + Unpin,
    P: FnMut(&T) -> bool,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(pull_fused(&mut this.stream, &mut this.done, cx)) {
                Some(Ok(x)) if this.skipping => {
                    if (this.p)(&x) {
                        this.skipping = false;
                    }
                }
                other => return Poll::Ready(other),
            }
        }
    }
}

/* ---------------------------- assert_each_not_null ------------------------ */

/// See [`SeqOptExt::assert_each_not_null`](crate::SeqOptExt::assert_each_not_null).
#[must_use = "sequences do nothing unless pulled"]
pub struct AssertEachNotNull<S> {
    stream: S,
    seen: usize,
    done: bool,
}

impl<S> Unpin for AssertEachNotNull<S> {}

impl<S> AssertEachNotNull<S> {
    pub(crate) const fn new(stream: S) -> Self {
        Self {
            stream,
            seen: 0,
            done: false,
        }
    }
}

impl<T, S> Stream for AssertEachNotNull<S>
where
    S: Stream<Item = Result<Option<T>>> + Unpin,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let item = ready!(pull_fused(&mut this.stream, &mut this.done, cx));
        Poll::Ready(item.map(|r| {
            let idx = this.seen;
            this.seen += 1;
            r?.ok_or_else(|| FpError::type_error(format!("element {idx} is null")))
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/* ----------------------------------- zip ---------------------------------- */

/// Lockstep zip over any number of same-typed sequences.
///
/// Each round pulls one element from every input, in order. The first round
/// in which some input is exhausted is still emitted, with `None` in the
/// exhausted slots; after that the zip is done. No inputs means no rounds.
#[must_use = "sequences do nothing unless pulled"]
pub struct Zip<S, T> {
    inputs: Vec<S>,
    row: Vec<Option<T>>,
    exhausted: bool,
    done: bool,
}

impl<S, T> Unpin for Zip<S, T> {}

/// Zip `inputs` row by row; see [`Zip`].
pub fn zip<T, S: Seq<T>>(inputs: Vec<S>) -> Zip<S, T> {
    let width = inputs.len();
    Zip {
        done: width == 0,
        inputs,
        row: Vec::with_capacity(width),
        exhausted: false,
    }
}

impl<T, S> Stream for Zip<S, T>
where
    S: Stream<Item = Result<T>> + Unpin,
{
    type Item = Result<Vec<Option<T>>>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done {
            return Poll::Ready(None);
        }
        // `row.len()` doubles as the index of the next input to pull.
        while let Some(input) = this.inputs.get_mut(this.row.len()) {
            match ready!(pull(input, cx)) {
                Some(Ok(x)) => this.row.push(Some(x)),
                Some(Err(e)) => {
                    this.done = true;
                    this.row.clear();
                    return Poll::Ready(Some(Err(e)));
                }
                None => {
                    this.exhausted = true;
                    this.row.push(None);
                }
            }
        }
        if this.exhausted {
            this.done = true;
        }
        let width = this.inputs.len();
        Poll::Ready(Some(Ok(mem::replace(
            &mut this.row,
            Vec::with_capacity(width),
        ))))
    }
}

impl<T, S> FusedStream for Zip<S, T>
where
    S: Stream<Item = Result<T>> + Unpin,
{
    fn is_terminated(&self) -> bool {
        self.done
    }
}
