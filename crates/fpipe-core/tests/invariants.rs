//! Invariants for sequence stages, terminals and the integer helpers.
//!
//! Stages are checked against the obvious slice/iterator model: same order,
//! same elements, same counts. Terminals are checked for first-error
//! short-circuiting.

use fpipe_core::prelude::*;
use fpipe_core::Result;
use proptest::prelude::*;
use std::cell::Cell;
use std::future::Future;

/// Drive a pipeline to completion on a throwaway current-thread runtime.
#[track_caller]
fn block_on<F: Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(fut)
}

fn collect<T>(fut: impl Future<Output = Result<Vec<T>>>) -> Vec<T> {
    block_on(fut).expect("pipeline failed")
}

#[test]
fn accumulate_running_sum() {
    let v = collect(from_iter([1, 2, 3]).accumulate(0, |a, x| a + x).collect_vec());
    assert_eq!(v, vec![1, 3, 6]);
}

#[test]
fn reduce_sum() {
    assert_eq!(block_on(from_iter([1, 2, 3]).reduce(0, |a, x| a + x)).unwrap(), 6);
}

#[test]
fn pairs_skip_last_adjacent_pair() {
    let v = collect(from_iter([1, 2, 3, 4]).pairs().collect_vec());
    assert_eq!(v, vec![(1, 2), (2, 3)]);
}

#[test]
fn rem_fixed_points() {
    assert_eq!(rem(-1, 100), 99);
    assert_eq!(rem(250, 100), 50);
}

#[test]
fn memo_computes_each_key_once() {
    let calls = Cell::new(0usize);
    let fib = memo(|recur: &dyn Fn(u32) -> u128, n: u32| {
        calls.set(calls.get() + 1);
        if n < 2 {
            u128::from(n)
        } else {
            recur(n - 1) + recur(n - 2)
        }
    });
    assert_eq!(fib.get(100), 354_224_848_179_261_915_075);
    assert_eq!(calls.get(), 101);
}

#[test]
fn take_until_then_rest_splits_a_shared_source() {
    let mut lines = from_iter(["3-5", "10-14", "", "1", "5"]);
    let head = collect((&mut lines).take_until(|l| l.is_empty()).collect_vec());
    let tail = collect(lines.collect_vec());
    assert_eq!(head, vec!["3-5", "10-14"]);
    assert_eq!(tail, vec!["1", "5"]);
}

#[test]
fn first_error_short_circuits_every_terminal() {
    let src = || from_iter([Some(1), None, Some(3)]).assert_each_not_null();
    assert!(block_on(src().count()).is_err());
    assert!(block_on(src().sum()).is_err());
    assert!(block_on(src().collect_vec()).is_err());
    // The error sits at index 1; the first element is still fine.
    assert_eq!(block_on(src().take_first()).unwrap(), Some(1));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64, // good CI/runtime balance
        .. ProptestConfig::default()
    })]

    // Property: map/filter agree with the iterator model.
    #[test]
    fn map_filter_match_iterators(v in proptest::collection::vec(-1000i64..1000, 0..64)) {
        let got = collect(from_iter(v.clone()).map(|x| x * 3).filter(|x| x % 2 == 0).collect_vec());
        let want: Vec<i64> = v.iter().map(|x| x * 3).filter(|x| x % 2 == 0).collect();
        prop_assert_eq!(got, want);
    }

    // Property: count/sum agree with the slice; map(id) and filter(true) are identities.
    #[test]
    fn identity_laws_and_aggregates(v in proptest::collection::vec(-1000i64..1000, 0..64)) {
        prop_assert_eq!(block_on(from_iter(v.clone()).count()).unwrap(), v.len());
        prop_assert_eq!(block_on(from_iter(v.clone()).sum()).unwrap(), v.iter().sum::<i64>());
        prop_assert_eq!(collect(from_iter(v.clone()).map(|x| x).collect_vec()), v.clone());
        prop_assert_eq!(collect(from_iter(v.clone()).filter(|_| true).collect_vec()), v.clone());
        prop_assert!(collect(from_iter(v).filter(|_| false).collect_vec()).is_empty());
    }

    // Property: window(n) yields exactly L - n windows, each a contiguous slice.
    #[test]
    fn window_count_and_contents(
        v in proptest::collection::vec(any::<u8>(), 0..40),
        n in 1usize..6,
    ) {
        let got = collect(from_iter(v.clone()).window(n).collect_vec());
        prop_assert_eq!(got.len(), v.len().saturating_sub(n));
        for (i, w) in got.iter().enumerate() {
            prop_assert_eq!(w.as_slice(), &v[i..i + n]);
        }
    }

    // Property: accumulate has one output per input and ends at the total.
    #[test]
    fn accumulate_ends_at_total(v in proptest::collection::vec(-50i64..50, 0..64)) {
        let got = collect(from_iter(v.clone()).accumulate(0i64, |a, x| a + x).collect_vec());
        prop_assert_eq!(got.len(), v.len());
        if let Some(last) = got.last() {
            prop_assert_eq!(*last, v.iter().sum::<i64>());
        }
    }

    // Property: take_until + skip_until_after partition the source around the first match.
    #[test]
    fn take_and_skip_partition(v in proptest::collection::vec(0u8..5, 0..40)) {
        let head = collect(from_iter(v.clone()).take_until(|x| *x == 0).collect_vec());
        let tail = collect(from_iter(v.clone()).skip_until_after(|x| *x == 0).collect_vec());
        match v.iter().position(|x| *x == 0) {
            Some(i) => {
                prop_assert_eq!(&head[..], &v[..i]);
                prop_assert_eq!(&tail[..], &v[i + 1..]);
            }
            None => {
                prop_assert_eq!(&head[..], &v[..]);
                prop_assert!(tail.is_empty());
            }
        }
    }

    // Property: zip emits min length + 1 rows (the exhausting round included).
    #[test]
    fn zip_row_count(
        a in proptest::collection::vec(any::<u16>(), 0..20),
        b in proptest::collection::vec(any::<u16>(), 0..20),
    ) {
        let rows = collect(zip(vec![from_iter(a.clone()), from_iter(b.clone())]).collect_vec());
        prop_assert_eq!(rows.len(), a.len().min(b.len()) + 1);
        let last = rows.last().cloned().unwrap_or_default();
        prop_assert!(last.iter().any(Option::is_none));
    }

    // Property: rem lands in [0, b) and is congruent to a.
    #[test]
    fn rem_is_canonical(a in any::<i32>(), b in 1i64..1_000_000) {
        let a = i64::from(a);
        let r = rem(a, b);
        prop_assert!((0..b).contains(&r));
        prop_assert_eq!((a - r) % b, 0);
        prop_assert_eq!(trunc_div(a, b) * b + (a % b), a);
    }
}
