use std::ops::Range;

/// Split `[0, n)` into `workers` contiguous blocks.
///
/// Worker `i` ends at `round(n / workers * (i + 1))` and starts where worker
/// `i - 1` ended, so block sizes differ by at most one and the last block always
/// ends at `n`. With `workers > n` some blocks are empty.
pub fn block_ranges(n: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }

    let share = n as f64 / workers as f64;
    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;

    for i in 0..workers {
        let end = if i + 1 == workers {
            n
        } else {
            ((share * (i + 1) as f64).round() as usize).clamp(start, n)
        };
        ranges.push(start..end);
        start = end;
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_partition(n: usize, workers: usize) {
        let ranges = block_ranges(n, workers);
        assert_eq!(ranges.len(), workers);

        let mut expected_start = 0;
        for range in &ranges {
            assert_eq!(range.start, expected_start, "gap or overlap for n={} w={}", n, workers);
            assert!(range.start <= range.end);
            expected_start = range.end;
        }
        assert_eq!(expected_start, n);

        let min = ranges.iter().map(|r| r.len()).min().unwrap();
        let max = ranges.iter().map(|r| r.len()).max().unwrap();
        assert!(max - min <= 1, "n={} w={} sizes {}..{}", n, workers, min, max);
    }

    #[test]
    fn test_partition_properties() {
        for n in 0..=130 {
            for workers in 1..=n + 5 {
                assert_partition(n, workers);
            }
        }
        assert_partition(1_000_003, 7);
    }

    #[test]
    fn test_known_split() {
        assert_eq!(block_ranges(10, 4), vec![0..3, 3..5, 5..8, 8..10]);
        assert_eq!(block_ranges(100, 3), vec![0..33, 33..67, 67..100]);
    }

    #[test]
    fn test_more_workers_than_items() {
        let ranges = block_ranges(3, 5);
        assert_eq!(ranges.iter().map(|r| r.len()).sum::<usize>(), 3);
        assert_eq!(ranges.iter().filter(|r| r.is_empty()).count(), 2);
    }
}
