//! Each line is a bank of batteries, one digit (1..=9) per battery. Turning
//! on `size` batteries, kept in bank order, reads as a `size`-digit number;
//! find the largest one per bank and sum over all banks. Part one uses two
//! batteries, part two twelve.

use crate::{both_parts, input_path, Answer};
use fpipe_core::prelude::*;
use fpipe_io::file_lines;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::Path;

const INPUT: &str = "2025-03.txt";

type Key = (usize, String);

/// Largest `size`-digit reading of `bank`, or -1 when the bank is too short.
///
/// Tries the first occurrence of each digit as the leading battery and
/// recurses on what follows it.
fn max_jolts(recur: &dyn Fn(Key) -> Answer, (size, bank): Key) -> Answer {
    let mut best = -1;
    for d in 1..=9u8 {
        let Some(i) = bank.find(char::from(b'0' + d)) else {
            continue;
        };
        let lead = Answer::from(d);
        let cand = if size > 1 {
            let sub = recur((size - 1, bank[i + 1..].to_owned()));
            if sub < 0 {
                continue;
            }
            let Some(shift) = decimal_shift(sub.unsigned_abs())
                .and_then(|s| Answer::try_from(s).ok())
            else {
                continue;
            };
            lead * shift + sub
        } else {
            lead
        };
        best = best.max(cand);
    }
    best
}

/// Sum over banks of the best `size`-battery reading.
pub async fn solve_with_size<S: Seq<String>>(
    lines: S,
    size: usize,
) -> fpipe_core::Result<Answer> {
    let jolts = memo(max_jolts);
    lines.map(move |bank| jolts.get((size, bank))).sum().await
}

/// Two batteries per bank.
pub async fn part_one<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    solve_with_size(lines, 2).await
}

/// Twelve batteries per bank.
pub async fn part_two<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    solve_with_size(lines, 12).await
}

/// Both parts over the file at `path`, concurrently.
pub async fn solve_both(path: &Path) -> anyhow::Result<(Answer, Answer)> {
    let one = part_one(file_lines(path).await?).boxed();
    let two = part_two(file_lines(path).await?).boxed();
    both_parts(one, two).await
}

/// Solve the bundled input and compare with the known answers.
pub async fn check_solution() -> anyhow::Result<()> {
    let (one, two) = solve_both(&input_path(INPUT)).await?;
    assert_equal(one, 357)?;
    assert_equal(two, 3_121_910_778_619)?;
    Ok(())
}

pub(crate) fn check() -> BoxFuture<'static, anyhow::Result<()>> {
    check_solution().boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_pairs_per_bank() {
        let m = memo(max_jolts);
        assert_eq!(m.get((2, "987654321111111".into())), 98);
        assert_eq!(m.get((2, "811111111111119".into())), 89);
        assert_eq!(m.get((2, "234234234234278".into())), 78);
        assert_eq!(m.get((2, "818181911112111".into())), 92);
    }

    #[test]
    fn short_bank_has_no_reading() {
        let m = memo(max_jolts);
        assert_eq!(m.get((3, "12".into())), -1);
        assert_eq!(m.get((1, String::new())), -1);
    }

    #[test]
    fn subproblems_are_shared() {
        let m = memo(max_jolts);
        m.get((12, "987654321111111".into()));
        let after_first = m.len();
        m.get((11, "87654321111111".into()));
        assert_eq!(m.len(), after_first);
    }

    #[tokio::test]
    async fn bundled_input_checks_out() {
        check_solution().await.unwrap();
    }
}
