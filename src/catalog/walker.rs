//! Candidate ID sequences for the two walk modes.

/// Unbounded ascending walk from a fixed starting offset (scan mode).
///
/// The sequence is deliberately infinite: the walk only stops when the
/// process does, under external supervision. Resumption after a restart is
/// re-derived from the configured start offset; progress is never
/// persisted.
#[derive(Debug, Clone)]
pub struct ScanWalker {
    next: i64,
}

impl ScanWalker {
    pub fn new(start: i64) -> Self {
        Self { next: start }
    }
}

impl Iterator for ScanWalker {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let id = self.next;
        self.next += 1;
        Some(id)
    }
}

/// Fixed-size contiguous ID ranges covering `[start, start + count)`, used
/// by discovery mode to pre-populate the known-ID index before the detail
/// walk. The final batch is truncated at the range end.
pub fn batches(start: i64, count: i64, batch_size: i64) -> impl Iterator<Item = Vec<i64>> {
    let end = start + count.max(0);
    let step = batch_size.max(1);
    (start..end)
        .step_by(step as usize)
        .map(move |lo| (lo..(lo + step).min(end)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_walker_counts_up_from_the_offset() {
        let ids: Vec<i64> = ScanWalker::new(500_168).take(3).collect();
        assert_eq!(ids, vec![500_168, 500_169, 500_170]);
    }

    #[test]
    fn batches_cover_the_range_exactly_once() {
        let all: Vec<i64> = batches(1, 10, 4).flatten().collect();
        assert_eq!(all, (1..=10).collect::<Vec<i64>>());
    }

    #[test]
    fn final_batch_is_truncated() {
        let sizes: Vec<usize> = batches(1, 10, 4).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }

    #[test]
    fn empty_range_yields_no_batches() {
        assert_eq!(batches(1, 0, 4).count(), 0);
    }
}
