//! Fluent combinator surface for every [`Seq`].
//!
//! ```
//! use fpipe_core::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let evens = from_iter(1..=10)
//!     .filter(|x| x % 2 == 0)
//!     .map(|x| x * x)
//!     .collect_vec()
//!     .await?;
//! assert_eq!(evens, vec![4, 16, 36, 64, 100]);
//! # Ok::<_, FpError>(())
//! # }).unwrap();
//! ```

use crate::seq::{BoxSeq, Seq};
use crate::stage::{
    Accumulate, AssertEachNotNull, Filter, FilterAsync, FlatMap, ForEach, ForEachAsync, Map,
    MapAsync, Pairs, SkipUntilAfter, TakeUntil, Window,
};
use crate::terminal::{Collect, Fold, TakeFirst};
use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;
use std::ops::Add;

/// Stage and terminal methods, blanket-implemented for every `Seq<T>`.
///
/// Stages take `self` by value; to consume a prefix and keep the rest,
/// build the stage on `&mut seq` instead.
pub trait SeqExt<T>: Seq<T> + Sized {
    /// Apply `f` to every element.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: FnMut(T) -> U,
    {
        Map::new(self, f)
    }

    /// Apply a suspending `f` to every element, one at a time.
    fn map_async<F, Fut>(self, f: F) -> MapAsync<Self, F, Fut>
    where
        F: FnMut(T) -> Fut,
        Fut: Future,
    {
        MapAsync::new(self, f)
    }

    /// Keep elements for which `p` holds.
    fn filter<P>(self, p: P) -> Filter<Self, P>
    where
        P: FnMut(&T) -> bool,
    {
        Filter::new(self, p)
    }

    /// Keep elements for which the awaited `p` holds.
    fn filter_async<P, Fut>(self, p: P) -> FilterAsync<Self, T, P, Fut>
    where
        P: FnMut(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        FilterAsync::new(self, p)
    }

    /// Replace every element by the sequence `f` returns, fully drained in order.
    fn flat_map<V, U, F>(self, f: F) -> FlatMap<Self, F, U>
    where
        F: FnMut(T) -> U,
        U: Seq<V>,
    {
        FlatMap::new(self, f)
    }

    /// Observe each element before passing it on unchanged.
    fn for_each<F>(self, f: F) -> ForEach<Self, F>
    where
        F: FnMut(&T),
    {
        ForEach::new(self, f)
    }

    /// Like [`for_each`](Self::for_each), awaiting `f` before the element is emitted.
    fn for_each_async<F, Fut>(self, f: F) -> ForEachAsync<Self, T, F, Fut>
    where
        F: FnMut(&T) -> Fut,
        Fut: Future<Output = ()>,
    {
        ForEachAsync::new(self, f)
    }

    /// Running fold: emits the accumulator after each element (never `init` itself).
    fn accumulate<A, F>(self, init: A, f: F) -> Accumulate<Self, A, F>
    where
        A: Clone,
        F: FnMut(A, T) -> A,
    {
        Accumulate::new(self, init, f)
    }

    /// Sliding windows of length `n`; a source of length `L` yields `L - n` of them.
    fn window(self, n: usize) -> Window<Self, T>
    where
        T: Clone,
    {
        Window::new(self, n)
    }

    /// Adjacent pairs under the [`window`](Self::window) rule.
    fn pairs(self) -> Pairs<Self, T>
    where
        T: Clone,
    {
        Pairs::new(self)
    }

    /// Pass elements until `p` holds; the matching element is consumed, not emitted.
    fn take_until<P>(self, p: P) -> TakeUntil<Self, P>
    where
        P: FnMut(&T) -> bool,
    {
        TakeUntil::new(self, p)
    }

    /// Drop elements up to and including the first one for which `p` holds.
    fn skip_until_after<P>(self, p: P) -> SkipUntilAfter<Self, P>
    where
        P: FnMut(&T) -> bool,
    {
        SkipUntilAfter::new(self, p)
    }

    /// Erase the concrete pipeline type.
    fn boxed<'a>(self) -> BoxSeq<'a, T>
    where
        Self: Send + 'a,
    {
        Box::pin(self)
    }

    /* ------------------------------ terminals ----------------------------- */

    /// Fold all elements into one value.
    fn reduce<A, F>(self, init: A, f: F) -> Fold<Self, A, F>
    where
        F: FnMut(A, T) -> A,
    {
        Fold::new(self, init, f)
    }

    /// Number of elements.
    fn count(self) -> Fold<Self, usize, fn(usize, T) -> usize> {
        Fold::new(self, 0, |n, _| n + 1)
    }

    /// Sum of all elements, starting from `T::default()`.
    fn sum(self) -> Fold<Self, T, fn(T, T) -> T>
    where
        T: Add<Output = T> + Default,
    {
        Fold::new(self, T::default(), |a, x| a + x)
    }

    /// The first element, or `None` for an empty sequence. Pulls exactly once.
    fn take_first(self) -> TakeFirst<Self> {
        TakeFirst::new(self)
    }

    /// Gather into any default-constructible collection.
    fn collect<C>(self) -> Collect<Self, C>
    where
        C: Default + Extend<T>,
    {
        Collect::new(self)
    }

    /// Gather into a `Vec`, keeping order.
    fn collect_vec(self) -> Collect<Self, Vec<T>> {
        Collect::new(self)
    }

    /// Gather into a `HashSet`.
    fn collect_set(self) -> Collect<Self, HashSet<T>>
    where
        T: Eq + Hash,
    {
        Collect::new(self)
    }

    /// Drive the sequence to the end, discarding elements but surfacing errors.
    fn drain(self) -> Fold<Self, (), fn((), T)> {
        Fold::new(self, (), |(), _| ())
    }
}

impl<T, S: Seq<T>> SeqExt<T> for S {}

/// Methods that only make sense on sequences of optional elements.
pub trait SeqOptExt<U>: Seq<Option<U>> + Sized {
    /// Unwrap `Some` elements; a `None` becomes a [`FpError::Type`](crate::FpError::Type).
    fn assert_each_not_null(self) -> AssertEachNotNull<Self> {
        AssertEachNotNull::new(self)
    }
}

impl<U, S: Seq<Option<U>>> SeqOptExt<U> for S {}
