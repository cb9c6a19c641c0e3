//! The input holds inclusive "fresh" id ranges, a blank line, then ingredient
//! ids. Part one counts ids that fall in some range; part two counts every id
//! the ranges cover, overlaps counted once.

use crate::{both_parts, input_path, tally, Answer};
use fpipe_core::prelude::*;
use fpipe_io::file_lines;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::Path;

const INPUT: &str = "2025-05.txt";

type Range = (Answer, Answer);

fn parse_range(line: &str) -> Option<Range> {
    let (from, to) = line.split_once('-')?;
    Some((from.trim().parse().ok()?, to.trim().parse().ok()?))
}

/// Split the input at the first blank line: ranges are collected, ids stay lazy.
async fn parse_input<S: Seq<String>>(
    mut lines: S,
) -> fpipe_core::Result<(Vec<Range>, impl Seq<Answer>)> {
    let ranges = (&mut lines)
        .take_until(String::is_empty)
        .map(|l| parse_range(&l))
        .assert_each_not_null()
        .collect_vec()
        .await?;
    let ids = lines
        .map(|l| l.trim().parse::<Answer>().ok())
        .assert_each_not_null();
    Ok((ranges, ids))
}

/// Coalesce overlapping ranges; `sorted` must be ordered by start.
fn merge_ranges(sorted: Vec<Range>) -> Vec<Range> {
    let mut merged: Vec<Range> = Vec::with_capacity(sorted.len());
    for (from, to) in sorted {
        match merged.last_mut() {
            Some(last) if last.1 >= from => last.1 = last.1.max(to),
            _ => merged.push((from, to)),
        }
    }
    merged
}

/// Ids that fall inside at least one range.
pub async fn part_one<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    let (ranges, ids) = parse_input(lines).await?;
    ids.filter(move |x| ranges.iter().any(|&(from, to)| from <= *x && *x <= to))
        .count()
        .await
        .map(tally)
}

/// Distinct ids covered by the ranges.
pub async fn part_two<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    let (mut ranges, _) = parse_input(lines).await?;
    ranges.sort_unstable_by_key(|&(from, _)| from);
    from_iter(merge_ranges(ranges))
        .map(|(from, to)| to - from + 1)
        .sum()
        .await
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
    assert_equal(one, 3)?;
    assert_equal(two, 14)?;
    Ok(())
}

pub(crate) fn check() -> BoxFuture<'static, anyhow::Result<()>> {
    check_solution().boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_overlapping_and_touching_ranges() {
        let merged = merge_ranges(vec![(3, 5), (5, 7), (10, 14), (12, 18), (16, 20), (30, 30)]);
        assert_eq!(merged, vec![(3, 7), (10, 20), (30, 30)]);
        assert!(merge_ranges(Vec::new()).is_empty());
    }

    #[tokio::test]
    async fn ids_resume_after_the_blank_line() {
        let lines = ["1-2", "", "7", "8"].map(str::to_owned);
        let (ranges, ids) = parse_input(from_iter(lines)).await.unwrap();
        assert_eq!(ranges, vec![(1, 2)]);
        assert_eq!(ids.collect_vec().await.unwrap(), vec![7, 8]);
    }

    #[tokio::test]
    async fn bad_range_line_is_a_type_error() {
        let lines = ["1-x", "", "7"].map(str::to_owned);
        let err = part_two(from_iter(lines)).await.unwrap_err();
        assert!(matches!(err, FpError::Type(_)));
    }

    #[tokio::test]
    async fn bundled_input_checks_out() {
        check_solution().await.unwrap();
    }
}
