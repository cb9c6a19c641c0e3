//! Input is a comma-separated list of inclusive id ranges (`11-22,95-115`).
//! An id is invalid when its decimal form is one digit block repeated: exactly
//! twice for part one (`6464`), at least twice for part two (`123123123`).
//! Both parts sum the invalid ids.

use crate::{input_path, Answer};
use fpipe_core::prelude::*;
use fpipe_io::file_lines;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::Path;

const INPUT: &str = "2025-02.txt";

fn parse_range(s: &str) -> Option<(Answer, Answer)> {
    let (from, to) = s.trim().split_once('-')?;
    Some((from.parse().ok()?, to.parse().ok()?))
}

/// Every id covered by the ranges on `lines`, in input order.
fn ids<S: Seq<String>>(lines: S) -> impl Seq<Answer> {
    lines
        .flat_map(|line| from_iter(line.split(',').map(str::to_owned).collect::<Vec<_>>()))
        .map(|s| parse_range(&s))
        .assert_each_not_null()
        .flat_map(|(from, to)| range_inclusive(from, to))
}

fn repeated_twice(id: Answer) -> bool {
    let s = id.to_string();
    let half = s.len() / 2;
    s.len() % 2 == 0 && s[..half] == s[half..]
}

fn repeated_at_least_twice(id: Answer) -> bool {
    let s = id.to_string();
    let digits = s.as_bytes();
    (1..=digits.len() / 2)
        .filter(|n| digits.len() % n == 0)
        .any(|n| digits.chunks(n).all(|block| block == &digits[..n]))
}

/// Sum of ids made of a block repeated exactly twice.
pub async fn part_one<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    ids(lines).filter(|id| repeated_twice(*id)).sum().await
}

/// Sum of ids made of a block repeated two or more times.
pub async fn part_two<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    ids(lines).filter(|id| repeated_at_least_twice(*id)).sum().await
}

/// Both parts over the file at `path`, one after the other.
pub async fn solve_both(path: &Path) -> anyhow::Result<(Answer, Answer)> {
    let one = part_one(file_lines(path).await?).await?;
    let two = part_two(file_lines(path).await?).await?;
    Ok((one, two))
}

/// Solve the bundled input and compare with the known answers.
pub async fn check_solution() -> anyhow::Result<()> {
    let path = input_path(INPUT);
    assert_equal(part_one(file_lines(&path).await?).await?, 1_227_775_554)?;
    assert_equal(part_two(file_lines(&path).await?).await?, 4_174_379_265)?;
    Ok(())
}

pub(crate) fn check() -> BoxFuture<'static, anyhow::Result<()>> {
    check_solution().boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_double_repeats() {
        assert!(repeated_twice(11));
        assert!(repeated_twice(6464));
        assert!(repeated_twice(123_123));
        assert!(!repeated_twice(111));
        assert!(!repeated_twice(121_212));
    }

    #[test]
    fn any_repeat_count() {
        assert!(repeated_at_least_twice(111));
        assert!(repeated_at_least_twice(121_212));
        assert!(repeated_at_least_twice(1_188_511_885));
        assert!(!repeated_at_least_twice(7));
        assert!(!repeated_at_least_twice(1_698_528));
    }

    #[tokio::test]
    async fn ranges_expand_in_order() {
        let got = ids(from_iter(vec!["3-5,8-9".to_owned(), "1-1".to_owned()]))
            .collect_vec()
            .await
            .unwrap();
        assert_eq!(got, vec![3, 4, 5, 8, 9, 1]);
    }

    #[tokio::test]
    async fn bundled_input_checks_out() {
        check_solution().await.unwrap();
    }
}
