use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::common::io_error_msg;
use crate::partition::{FileRegion, partition};
use crate::scan::{TokenScanner, count_region_lines, count_region_words};
use crate::unique::{self, TableOverflow, UniqueWordTable};

/// Fixed worker pool size used by the binary.
pub const DEFAULT_WORKERS: usize = 3;

/// Which single count a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMode {
    Words,
    Lines,
    UniqueWords,
}

/// Per-worker totals, written only by the owning worker and read by the
/// reducer after the join barrier.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerResult {
    pub words: u64,
    pub lines: u64,
}

/// Fatal conditions. Any of these aborts the run with no partial total:
/// a missed partition would silently undercount.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("cannot open '{}': {}", path.display(), io_error_msg(source))]
    FileOpen { path: PathBuf, source: io::Error },

    #[error("read error in worker {}: {}", worker_id, io_error_msg(source))]
    WorkerRead { worker_id: usize, source: io::Error },

    #[error(transparent)]
    UniqueTableOverflow(#[from] TableOverflow),
}

/// Count words, lines, or unique words in `path` with `worker_count`
/// concurrent workers, each scanning one contiguous byte region through
/// its own file handle.
pub fn count_file(path: &Path, mode: CountMode, worker_count: usize) -> Result<u64, CountError> {
    count_file_with_capacity(path, mode, worker_count, unique::DEFAULT_CAPACITY)
}

/// [`count_file`] with an explicit bound on distinct tokens for
/// unique-word mode. Reaching the bound on a genuinely new token fails
/// the run with [`CountError::UniqueTableOverflow`].
pub fn count_file_with_capacity(
    path: &Path,
    mode: CountMode,
    worker_count: usize,
    unique_capacity: usize,
) -> Result<u64, CountError> {
    if worker_count == 0 {
        return Err(CountError::InvalidInput(
            "worker count must be at least 1".into(),
        ));
    }

    let file_size = std::fs::metadata(path)
        .map_err(|e| CountError::FileOpen {
            path: path.to_path_buf(),
            source: e,
        })?
        .len();
    let regions = partition(file_size, worker_count);
    let table = UniqueWordTable::with_capacity(unique_capacity);

    // One scoped thread per region. Worker outcomes are only reachable
    // through the join below, so no result can be read before every
    // worker has terminated.
    let outcomes: Vec<Result<WorkerResult, CountError>> = std::thread::scope(|s| {
        let handles: Vec<_> = regions
            .iter()
            .enumerate()
            .map(|(worker_id, &region)| {
                let table = &table;
                s.spawn(move || run_worker(path, worker_id, region, mode, table))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Join barrier passed. The first failing worker (by id) decides the
    // reported error; a mixed total is never produced.
    let mut totals = WorkerResult::default();
    for outcome in outcomes {
        let result = outcome?;
        totals.words += result.words;
        totals.lines += result.lines;
    }

    Ok(match mode {
        CountMode::Words => totals.words,
        CountMode::Lines => totals.lines,
        CountMode::UniqueWords => table.len() as u64,
    })
}

/// One worker: open an independent handle (a shared cursor under
/// concurrent seek+read would interleave unpredictably) and run the
/// strategy for `mode` over `region`.
fn run_worker(
    path: &Path,
    worker_id: usize,
    region: FileRegion,
    mode: CountMode,
    table: &UniqueWordTable,
) -> Result<WorkerResult, CountError> {
    let file = File::open(path).map_err(|e| CountError::FileOpen {
        path: path.to_path_buf(),
        source: e,
    })?;
    let read_err = |e: io::Error| CountError::WorkerRead {
        worker_id,
        source: e,
    };

    let mut result = WorkerResult::default();
    match mode {
        CountMode::Words => {
            result.words = count_region_words(file, region).map_err(read_err)?;
        }
        CountMode::Lines => {
            result.lines = count_region_lines(file, region).map_err(read_err)?;
        }
        CountMode::UniqueWords => {
            let mut scanner = TokenScanner::new(file, region).map_err(read_err)?;
            let mut buf = Vec::with_capacity(64);
            while scanner.next_token(&mut buf).map_err(read_err)? {
                table.record(&buf)?;
            }
        }
    }
    Ok(result)
}
