//! fpipe-solvers — the 2025 puzzle solvers and the registry that runs them.
//!
//! Each `dayNN` module exposes the same surface:
//! - `part_one(lines)` / `part_two(lines)`: pipelines over any line sequence,
//! - `solve_both(path)`: both parts over a file, run concurrently with
//!   [`fpipe_core::all`] (day 02 runs them one after the other),
//! - `check_solution()`: solve the bundled input and assert the known answers.
//!
//! [`registry`] lists the solvers in order and implements the runner the CLI
//! uses (index selection, timing).

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use anyhow::bail;
use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

/// 2025/01: rotary dial, landings on and passes over zero.
pub mod day01;
/// 2025/02: ids made of a repeated digit block.
pub mod day02;
/// 2025/03: largest joltage from N batteries per bank (memoized recursion).
pub mod day03;
/// 2025/04: accessible paper rolls, removed until nothing changes.
pub mod day04;
/// 2025/05: fresh ingredient ids and merged id ranges.
pub mod day05;
/// Ordered solver table and the selection/timing runner.
pub mod registry;

pub use registry::{run, select, Solver, SOLVERS};

/// Numeric answer type shared by every part.
pub type Answer = i64;

/// Pipeline future for one part, ready to hand to [`fpipe_core::all`].
pub type PartFuture = BoxFuture<'static, fpipe_core::Result<Answer>>;

/// Path of a bundled input file.
pub fn input_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("inputs").join(name)
}

pub(crate) fn tally(n: usize) -> Answer {
    Answer::try_from(n).unwrap_or(Answer::MAX)
}

/// Run two parts concurrently and return `(one, two)`.
pub(crate) async fn both_parts(
    one: PartFuture,
    two: PartFuture,
) -> anyhow::Result<(Answer, Answer)> {
    let out = fpipe_core::all([one, two]).await?;
    match out[..] {
        [a, b] => Ok((a, b)),
        _ => bail!("expected two answers, got {}", out.len()),
    }
}
