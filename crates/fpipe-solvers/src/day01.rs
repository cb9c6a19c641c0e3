//! A dial numbered 0..=99 starts at 50. Each line is a rotation (`L68` turns
//! left by 68, `R48` right by 48). Part one counts rotations that leave the
//! dial on 0; part two counts every time the dial points at 0, including
//! passes in the middle of a rotation.

use crate::{both_parts, input_path, tally, Answer};
use fpipe_core::prelude::*;
use fpipe_io::file_lines;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::Path;

const INPUT: &str = "2025-01.txt";
const START: i64 = 50;
const DIAL: i64 = 100;

fn parse_rotation(line: &str) -> Option<i64> {
    if let Some(n) = line.strip_prefix('L') {
        return n.parse::<i64>().ok().map(|n| -n);
    }
    line.strip_prefix('R')?.parse().ok()
}

/// Times the dial passes or lands on 0 while applying `rotation` from `position`.
fn zero_passes(position: i64, rotation: i64) -> i64 {
    if rotation > 0 {
        trunc_div(position + rotation, DIAL)
    } else {
        trunc_div(rem(DIAL - position, DIAL) + abs(rotation), DIAL)
    }
}

/// Rotations that end with the dial on 0.
pub async fn part_one<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    lines
        .map(|l| parse_rotation(&l))
        .assert_each_not_null()
        .accumulate(START, |pos, rot| pos + rot)
        .filter(|pos| pos % DIAL == 0)
        .count()
        .await
        .map(tally)
}

/// Clicks that point the dial at 0, mid-rotation passes included.
pub async fn part_two<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    let (_, passes) = lines
        .map(|l| parse_rotation(&l))
        .assert_each_not_null()
        .reduce((START, 0), |(pos, passes), rot| {
            (rem(pos + rot, DIAL), passes + zero_passes(pos, rot))
        })
        .await?;
    Ok(passes)
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
    assert_equal(two, 6)?;
    Ok(())
}

pub(crate) fn check() -> BoxFuture<'static, anyhow::Result<()>> {
    check_solution().boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpipe_io::reader_lines;

    #[test]
    fn parses_signed_rotations() {
        assert_eq!(parse_rotation("L68"), Some(-68));
        assert_eq!(parse_rotation("R9"), Some(9));
        assert_eq!(parse_rotation("X1"), None);
        assert_eq!(parse_rotation(""), None);
    }

    #[test]
    fn passes_count_full_turns() {
        assert_eq!(zero_passes(50, 1000), 10);
        assert_eq!(zero_passes(50, -68), 1);
        assert_eq!(zero_passes(0, -5), 0);
        assert_eq!(zero_passes(5, -5), 1);
    }

    #[tokio::test]
    async fn four_rotation_walkthrough() {
        let input: &[u8] = b"L68\nR43\nL23\nR9\n";
        assert_eq!(part_one(reader_lines(input)).await.unwrap(), 0);
        assert_eq!(part_two(reader_lines(input)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn malformed_line_is_a_type_error() {
        let input: &[u8] = b"L1\nforward 3\n";
        let err = part_one(reader_lines(input)).await.unwrap_err();
        assert!(matches!(err, FpError::Type(_)));
    }

    #[tokio::test]
    async fn bundled_input_checks_out() {
        check_solution().await.unwrap();
    }
}
