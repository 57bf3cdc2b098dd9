use rayon::prelude::*;
use thiserror::Error;

use warpkit_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how the rows of a destination image are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool, one task per destination row.
    #[default]
    Parallel,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Fill every row of `dst` with a fallible per-row function.
///
/// The rows are disjoint slices of the destination buffer, so the closure only
/// ever writes to the row it was handed. The first error aborts the remaining
/// work and is returned.
///
/// # Arguments
///
/// * `dst` - The destination image.
/// * `strategy` - How rows are scheduled.
/// * `f` - Called with the row index and the row's interleaved pixel data.
pub fn par_iter_rows_indexed<T, const C: usize, E, F>(
    dst: &mut Image<T, C>,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), E>
where
    T: Copy + Send + Sync,
    E: From<ParallelError> + Send,
    F: Fn(usize, &mut [T]) -> Result<(), E> + Send + Sync,
{
    let row_len = dst.cols() * C;
    let data = dst.as_slice_mut();

    match strategy {
        ExecutionStrategy::Serial => data
            .chunks_exact_mut(row_len)
            .enumerate()
            .try_for_each(|(r, row)| f(r, row)),
        ExecutionStrategy::Parallel => data
            .par_chunks_exact_mut(row_len)
            .enumerate()
            .try_for_each(|(r, row)| f(r, row)),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n).into());
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                data.par_chunks_exact_mut(row_len)
                    .enumerate()
                    .try_for_each(|(r, row)| f(r, row))
            })
        }
    }
}

/// Apply a function to each pixel of `src`, writing the matching pixel of `dst`.
///
/// Both images must have the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Copy + Send + Sync,
    T2: Copy + Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(C1 * cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}
