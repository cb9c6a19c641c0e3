use crate::{day01, day02, day03, day04, day05};
use anyhow::{Context, Result};
use futures_util::future::BoxFuture;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

/// One runnable, self-checking solver.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    /// Identifier printed before the solver runs (`"2025/01"`).
    pub id: &'static str,
    /// Solve the bundled input and assert the known answers.
    pub check: fn() -> BoxFuture<'static, Result<()>>,
}

/// Every solver, in the order the CLI numbers them (1-based).
pub static SOLVERS: &[Solver] = &[
    Solver {
        id: "2025/01",
        check: day01::check,
    },
    Solver {
        id: "2025/02",
        check: day02::check,
    },
    Solver {
        id: "2025/03",
        check: day03::check,
    },
    Solver {
        id: "2025/04",
        check: day04::check,
    },
    Solver {
        id: "2025/05",
        check: day05::check,
    },
];

/// Resolve 1-based CLI arguments into 0-based indices into a table of `len`.
///
/// No arguments selects everything in order. Otherwise each argument that
/// parses to an index in `1..=len` is kept once, at its first position; the
/// rest are dropped without complaint.
pub fn select<S: AsRef<str>>(args: &[S], len: usize) -> Vec<usize> {
    if args.is_empty() {
        return (0..len).collect();
    }
    let mut picked = Vec::with_capacity(args.len());
    for idx in args
        .iter()
        .filter_map(|a| a.as_ref().trim().parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter(|&i| i < len)
    {
        if !picked.contains(&idx) {
            picked.push(idx);
        }
    }
    picked
}

/// Run the solvers picked by `args`, printing each id and its elapsed time to `out`.
///
/// Stops at the first failing solver and returns its error.
pub async fn run<S: AsRef<str>, W: Write>(
    solvers: &[Solver],
    args: &[S],
    out: &mut W,
) -> Result<()> {
    let picks = select(args, solvers.len());
    debug!(?picks, "selected solvers");
    for solver in picks.into_iter().filter_map(|i| solvers.get(i)) {
        writeln!(out, "{}", solver.id).context("write solver id")?;
        let started = Instant::now();
        (solver.check)()
            .await
            .with_context(|| format!("solver {} failed", solver.id))?;
        writeln!(out, "{}: {:.3?}", solver.id, started.elapsed()).context("write timing")?;
        debug!(id = solver.id, "solver passed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static RUNS: [AtomicUsize; 3] = [
        AtomicUsize::new(0),
        AtomicUsize::new(0),
        AtomicUsize::new(0),
    ];

    fn bump(i: usize) -> BoxFuture<'static, Result<()>> {
        RUNS[i].fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, anyhow::Error>(()) }.boxed()
    }

    fn first() -> BoxFuture<'static, Result<()>> {
        bump(0)
    }

    fn second() -> BoxFuture<'static, Result<()>> {
        bump(1)
    }

    fn third() -> BoxFuture<'static, Result<()>> {
        bump(2)
    }

    fn failing() -> BoxFuture<'static, Result<()>> {
        async { fpipe_core::assert_equal(1, 2).map_err(anyhow::Error::from) }.boxed()
    }

    fn not_reached() -> BoxFuture<'static, Result<()>> {
        async { Err(anyhow::anyhow!("ran after a failure")) }.boxed()
    }

    const TABLE: [Solver; 3] = [
        Solver { id: "a", check: first },
        Solver { id: "b", check: second },
        Solver { id: "c", check: third },
    ];

    #[test]
    fn selection_dedupes_and_drops_invalid() {
        assert_eq!(select(&["2", "2", "9"], 5), vec![1]);
        assert_eq!(select(&["3", "1", "3", "0", "x", "-1"], 5), vec![2, 0]);
        assert_eq!(select::<&str>(&[], 3), vec![0, 1, 2]);
        assert!(select(&["7"], 5).is_empty());
    }

    #[tokio::test]
    async fn duplicate_and_out_of_range_args_run_one_solver_once() {
        let mut out = Vec::new();
        run(&TABLE, &["2", "2", "9"], &mut out).await.unwrap();
        let runs: Vec<usize> = RUNS.iter().map(|r| r.load(Ordering::SeqCst)).collect();
        assert_eq!(runs, vec![0, 1, 0]);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("b\nb: "), "{text}");
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn failure_stops_the_run() {
        let table = [
            Solver { id: "bad", check: failing },
            Solver { id: "never", check: not_reached },
        ];
        let mut out = Vec::new();
        let err = run(&table, &[] as &[&str], &mut out).await.unwrap_err();
        assert!(format!("{err:#}").contains("AssertionError: 1 !== 2"));
        assert_eq!(String::from_utf8(out).unwrap(), "bad\n");
    }

    #[test]
    fn table_is_ordered_by_day() {
        let ids: Vec<_> = SOLVERS.iter().map(|s| s.id).collect();
        assert_eq!(ids, ["2025/01", "2025/02", "2025/03", "2025/04", "2025/05"]);
    }
}
