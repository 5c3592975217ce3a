/// A contiguous half-open byte range `[start, end)` of the input file,
/// assigned to exactly one worker.
///
/// The union of all regions for a run covers `[0, file_size)` with no gap
/// and no overlap. A tokenizer may *read* past `end` to finish the last
/// token it owns, but ownership of byte indices never overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRegion {
    pub start: u64,
    pub end: u64,
}

impl FileRegion {
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, file_size)` into `worker_count` ordered, contiguous regions.
///
/// `region[i].start = ceil(i * file_size / n)` and
/// `region[i].end = ceil((i+1) * file_size / n)`, so regions may differ in
/// length by one byte but always join exactly: `region[i].end ==
/// region[i+1].start` and the last region ends at `file_size`.
///
/// With `file_size == 0` every region is empty and every worker reports
/// zero. Callers must pass `worker_count >= 1`; the pool entry point
/// rejects zero before calling here.
pub fn partition(file_size: u64, worker_count: usize) -> Vec<FileRegion> {
    debug_assert!(worker_count >= 1);
    let n = worker_count as u128;
    let size = file_size as u128;
    // ceil(i * size / n) in u128: i * size can exceed u64 for large files.
    let bound = |i: u128| ((i * size + n - 1) / n) as u64;

    (0..worker_count as u128)
        .map(|i| FileRegion {
            start: bound(i),
            end: bound(i + 1),
        })
        .collect()
}
