//! fpipe-core — lazy, pull-based sequence pipelines.
//!
//! This crate is the shared toolkit the solvers are written against:
//! - a single **sequence** shape ([`Seq`]) for eager iterables and
//!   asynchronous streams alike, with fused cursors and unbounded generators,
//! - **stage** combinators (map, filter, windows, pairs, running folds, …)
//!   that pull from upstream only on demand and keep order,
//! - **terminals** that drive a sequence to one awaited value,
//! - a recursion-aware **memoizer**, integer helpers and assertions, and
//! - [`all`] to run independent pipelines concurrently.
//!
//! Errors ride inside the sequence as `Result` items. A failure while pulling
//! an element propagates through every stage unchanged and ends the terminal
//! that observes it.
//!
//! ```
//! use fpipe_core::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let dial = from_iter(["R10", "L30", "R20"])
//!     .map(|s| s[1..].parse::<i64>().ok().map(|n| if s.starts_with('L') { -n } else { n }))
//!     .assert_each_not_null()
//!     .accumulate(0, |pos, d| rem(pos + d, 100))
//!     .collect_vec()
//!     .await?;
//! assert_eq!(dial, vec![10, 80, 0]);
//! # Ok::<_, FpError>(())
//! # }).unwrap();
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

/// Error kinds and the crate-wide `Result` alias.
pub mod error;
/// Fluent combinator traits implemented by every sequence.
pub mod ext;
/// Recursion-aware memoization.
pub mod memo;
/// Integer helpers and assertion primitives.
pub mod scalar;
/// Sources: the sequence trait, eager and suspending adapters, generators.
pub mod seq;
/// Stage combinators (sequence → sequence).
pub mod stage;
/// Concurrent fan-out over independent pipelines.
pub mod task;
/// Terminal consumers (sequence → awaited value).
pub mod terminal;

// ---- Re-exports ----
pub use error::{FpError, Result};
pub use ext::{SeqExt, SeqOptExt};
pub use memo::{memo, Memo};
pub use scalar::{abs, assert_equal, assert_true, decimal_shift, digit_count, rem, trunc_div};
pub use seq::{
    from_iter, from_stream, iterate, iterate_async, range_inclusive, BoxSeq, Cursor, Eager,
    Iterate, IterateAsync, Seq,
};
pub use stage::{zip, Zip};
pub use task::all;

/// Everything a pipeline author usually needs, in one glob import.
pub mod prelude {
    pub use crate::{
        abs, all, assert_equal, assert_true, decimal_shift, digit_count, from_iter, from_stream,
        iterate, iterate_async, memo, range_inclusive, rem, trunc_div, zip, BoxSeq, FpError, Memo,
        Seq, SeqExt, SeqOptExt,
    };
}
