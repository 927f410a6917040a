use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Controls how the downsampling kernels walk the output rows.
///
/// Both strategies produce bit-identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    #[default]
    Serial,

    /// Use the global Rayon thread pool to process output rows in parallel.
    ParallelRows,
}

/// Apply a function to every output row of a 2x downsampling.
///
/// `src` is a single channel buffer with `src_cols` columns and `dst` a single
/// channel buffer with `dst_cols` columns. For output row `y` the function
/// receives source rows `2y` and `2y + 1` and the output row. A trailing odd
/// source row has no partner and is never visited.
pub(crate) fn iter_row_pairs<S, D>(
    src: &[S],
    src_cols: usize,
    dst: &mut [D],
    dst_cols: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(&[S], &[S], &mut [D]) + Send + Sync,
) where
    S: Sync,
    D: Send,
{
    if dst.is_empty() || dst_cols == 0 {
        return;
    }

    let op = |(pair, dst_row): (&[S], &mut [D])| {
        let (top, bottom) = pair.split_at(src_cols);
        f(top, bottom, dst_row);
    };

    match strategy {
        ExecutionStrategy::Serial => {
            src.chunks_exact(2 * src_cols)
                .zip(dst.chunks_exact_mut(dst_cols))
                .for_each(op);
        }
        ExecutionStrategy::ParallelRows => {
            src.par_chunks_exact(2 * src_cols)
                .zip(dst.par_chunks_exact_mut(dst_cols))
                .for_each(op);
        }
    }
}
