//! Execution modes for per-group work.

#[cfg(feature = "parallel-io")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How per-group work is executed.
///
/// Both modes produce identical output in identical order; `Parallel` only changes how many
/// groups are serialized at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum ExecMode {
    #[default]
    Sequential,
    Parallel { threads: Option<usize> },
}

impl ExecMode {
    /// Parallel mode sized to the machine.
    pub fn parallel() -> Self {
        ExecMode::Parallel {
            threads: Some(num_cpus::get().max(1)),
        }
    }
}

/// Apply `f` to every item, returning results in input order.
///
/// Stops at the first error in sequential mode; in parallel mode the error of the lowest-indexed
/// failing item is not guaranteed, only that some error is returned.
pub fn map_ordered<T, U, F>(items: &[T], mode: ExecMode, f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    match mode {
        ExecMode::Sequential => items.iter().map(f).collect(),
        ExecMode::Parallel { threads } => map_parallel(items, threads, f),
    }
}

#[cfg(feature = "parallel-io")]
fn map_parallel<T, U, F>(items: &[T], threads: Option<usize>, f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    let run = || items.par_iter().map(&f).collect::<Result<Vec<U>>>();
    match threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n.max(1))
                .build()
                .map_err(std::io::Error::other)?;
            pool.install(run)
        }
        None => run(),
    }
}

#[cfg(not(feature = "parallel-io"))]
fn map_parallel<T, U, F>(items: &[T], _threads: Option<usize>, f: F) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Sync + Send,
{
    items.iter().map(f).collect()
}
