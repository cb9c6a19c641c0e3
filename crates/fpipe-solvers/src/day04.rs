//! A grid of paper rolls (`@`) and floor (`.`). A roll is accessible when
//! fewer than four of its eight neighbours are rolls. Part one counts the
//! accessible rolls; part two keeps removing every accessible roll until a
//! round removes nothing, and reports how many were removed in total.

use crate::{both_parts, input_path, tally, Answer};
use fpipe_core::prelude::*;
use fpipe_io::file_lines;
use futures_util::future::{BoxFuture, FutureExt};
use std::path::Path;
use tracing::debug;

const INPUT: &str = "2025-04.txt";
const ROLL: u8 = b'@';
const FLOOR: u8 = b'.';
const CROWDED: usize = 4;

type Grid = Vec<Vec<u8>>;

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Cell at `(row, col)`; anything off the grid reads as floor.
fn at(grid: &Grid, (row, col): (usize, usize)) -> u8 {
    grid.get(row)
        .and_then(|r| r.get(col))
        .copied()
        .unwrap_or(FLOOR)
}

fn neighbours((row, col): (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?))
    })
}

fn all_coords(grid: &Grid) -> impl Iterator<Item = (usize, usize)> + '_ {
    grid.iter()
        .enumerate()
        .flat_map(|(row, cells)| (0..cells.len()).map(move |col| (row, col)))
}

/// Coordinates of the rolls a forklift can reach, in row-major order.
fn accessible(grid: &Grid) -> impl Seq<(usize, usize)> + '_ {
    from_iter(all_coords(grid))
        .filter(move |&p| at(grid, p) == ROLL)
        .filter(move |&p| neighbours(p).filter(|&n| at(grid, n) == ROLL).count() < CROWDED)
}

async fn read_grid<S: Seq<String>>(lines: S) -> fpipe_core::Result<Grid> {
    lines.map(String::into_bytes).collect_vec().await
}

#[derive(Debug, Clone)]
struct Removal {
    removed: usize,
    grid: Grid,
}

impl Removal {
    /// One round: clear every currently accessible roll.
    async fn step(mut self) -> fpipe_core::Result<Self> {
        let reachable = accessible(&self.grid).collect_vec().await?;
        for &(row, col) in &reachable {
            if let Some(cell) = self.grid.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = FLOOR;
            }
        }
        self.removed += reachable.len();
        Ok(self)
    }
}

/// Rolls accessible in the initial grid.
pub async fn part_one<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    let grid = read_grid(lines).await?;
    accessible(&grid).count().await.map(tally)
}

/// Rolls removed once removal reaches a fixed point.
pub async fn part_two<S: Seq<String>>(lines: S) -> fpipe_core::Result<Answer> {
    let grid = read_grid(lines).await?;
    let settled = iterate_async(Removal { removed: 0, grid }, |state| state.clone().step())
        .for_each(|state| debug!(removed = state.removed, "removal round"))
        .pairs()
        .filter(|(prev, cur)| cur.removed == prev.removed)
        .map(|(_, cur)| cur.removed)
        .take_first()
        .await?;
    settled
        .map(tally)
        .ok_or_else(|| FpError::type_error("roll removal ended without settling"))
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
    assert_equal(one, 13)?;
    assert_equal(two, 43)?;
    Ok(())
}

pub(crate) fn check() -> BoxFuture<'static, anyhow::Result<()>> {
    check_solution().boxed()
}
