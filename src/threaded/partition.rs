//! Row-block assignment for the parallel kernels.
//!
//! Workers don't get their block up front. Each one calls
//! [`RowPartitioner::claim`], which takes the next worker index from a
//! mutex-protected counter and splits that worker's rows off the unclaimed
//! tail of the output buffer. Blocks are handed out in index order, so the
//! tail always starts at the next block's first row.

use std::ops::Range;
use std::sync::{Mutex, PoisonError};

use tracing::trace;

/// Output rows `[start, end)` owned by `worker`.
///
/// Every worker gets `rows / num_threads` rows; the last one also takes the
/// remainder, so all `rows` rows are covered. With 10 rows over 4 workers
/// the blocks are `0..2`, `2..4`, `4..6`, `6..10`.
///
/// # Panics
///
/// Panics if `num_threads == 0` or `worker >= num_threads`.
pub fn row_range(worker: usize, rows: usize, num_threads: usize) -> Range<usize> {
    assert!(num_threads > 0, "thread count must be at least 1");
    assert!(
        worker < num_threads,
        "worker {worker} out of range for {num_threads} threads"
    );

    let rows_per_thread = rows / num_threads;
    let start = rows_per_thread * worker;
    let end = if worker + 1 == num_threads {
        rows
    } else {
        rows_per_thread * (worker + 1)
    };
    start..end
}

/// One worker's share of the output.
#[derive(Debug)]
pub struct RowBlock<'a, T> {
    pub worker: usize,
    pub rows: Range<usize>,
    /// Exactly the cells of `rows`, row-major.
    pub out: &'a mut [T],
}

struct DispatchState<'a, T> {
    next_worker: usize,
    unclaimed: &'a mut [T],
}

/// Hands out `num_threads` disjoint row blocks of one output buffer.
pub struct RowPartitioner<'a, T> {
    state: Mutex<DispatchState<'a, T>>,
    rows: usize,
    cols: usize,
    num_threads: usize,
}

impl<'a, T> RowPartitioner<'a, T> {
    /// # Panics
    ///
    /// Panics if `num_threads == 0` or `out.len() != rows * cols`.
    pub fn new(out: &'a mut [T], rows: usize, cols: usize, num_threads: usize) -> Self {
        assert!(num_threads > 0, "thread count must be at least 1");
        assert_eq!(
            out.len(),
            rows * cols,
            "C: expected {}x{}={} elements",
            rows,
            cols,
            rows * cols
        );

        Self {
            state: Mutex::new(DispatchState {
                next_worker: 0,
                unclaimed: out,
            }),
            rows,
            cols,
            num_threads,
        }
    }

    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Claims the next row block, or `None` once all `num_threads` are out.
    ///
    /// The lock covers only the counter bump and the split; the caller does
    /// its computation after it has been released.
    pub fn claim(&self) -> Option<RowBlock<'a, T>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let worker = state.next_worker;
        if worker >= self.num_threads {
            return None;
        }
        state.next_worker += 1;

        let rows = row_range(worker, self.rows, self.num_threads);
        let unclaimed = std::mem::take(&mut state.unclaimed);
        let (out, rest) = unclaimed.split_at_mut(rows.len() * self.cols);
        state.unclaimed = rest;
        drop(state);

        trace!(worker, start = rows.start, end = rows.end, "claimed row block");
        Some(RowBlock { worker, rows, out })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_goes_to_last_worker() {
        let ranges: Vec<_> = (0..4).map(|w| row_range(w, 10, 4)).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..10]);
    }

    #[test]
    fn even_split() {
        let ranges: Vec<_> = (0..4).map(|w| row_range(w, 8, 4)).collect();
        assert_eq!(ranges, vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn more_threads_than_rows() {
        let ranges: Vec<_> = (0..5).map(|w| row_range(w, 3, 5)).collect();
        assert_eq!(ranges, vec![0..0, 0..0, 0..0, 0..0, 0..3]);
    }

    #[test]
    #[should_panic(expected = "at least 1")]
    fn zero_threads_panics() {
        row_range(0, 10, 0);
    }

    #[test]
    fn claims_are_disjoint_and_cover_output() {
        let mut out = vec![0u32; 10 * 3];
        let partitioner = RowPartitioner::new(&mut out, 10, 3, 4);

        let mut blocks = Vec::new();
        while let Some(block) = partitioner.claim() {
            blocks.push(block);
        }
        assert_eq!(blocks.len(), 4);
        assert!(partitioner.claim().is_none());

        for block in &mut blocks {
            assert_eq!(block.out.len(), block.rows.len() * 3);
            for cell in block.out.iter_mut() {
                *cell += block.worker as u32 + 1;
            }
        }
        drop(blocks);
        drop(partitioner);

        // Every cell written exactly once, by the worker owning its row.
        let expected: Vec<u32> = (0..10)
            .flat_map(|row| {
                let owner = (0..4).find(|&w| row_range(w, 10, 4).contains(&row)).unwrap();
                std::iter::repeat(owner as u32 + 1).take(3)
            })
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn concurrent_claims_get_unique_workers() {
        let mut out = vec![0.0f64; 64];
        let partitioner = RowPartitioner::new(&mut out, 16, 4, 8);

        let mut workers: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| partitioner.claim().map(|b| b.worker)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        workers.sort_unstable();
        assert_eq!(workers, (0..8).collect::<Vec<_>>());
    }
}
