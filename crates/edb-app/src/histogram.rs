// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const BIN_COUNT: usize = 10;

/// Ten equal-width bins over `[0, ceiling]`. Values at or above the ceiling
/// land in the last bin, negative values in the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    ceiling: i64,
    bins: [usize; BIN_COUNT],
}

impl Histogram {
    pub fn from_scores(scores: impl IntoIterator<Item = i64>, ceiling: i64) -> Self {
        let ceiling = ceiling.max(1);
        let mut bins = [0; BIN_COUNT];
        for score in scores {
            let index = score.saturating_mul(BIN_COUNT as i64) / ceiling;
            let index = index.clamp(0, BIN_COUNT as i64 - 1) as usize;
            bins[index] += 1;
        }
        Self { ceiling, bins }
    }

    pub fn bins(&self) -> &[usize; BIN_COUNT] {
        &self.bins
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().copied().max().unwrap_or(0).max(1)
    }

    /// Lower and upper bound of a bin, as printed in its label.
    pub fn bin_range(&self, bin: usize) -> (i64, i64) {
        let bin = bin as i64;
        let count = BIN_COUNT as i64;
        (bin * self.ceiling / count, (bin + 1) * self.ceiling / count)
    }

    /// Bar length proportional to the fullest bin, floored, with one column
    /// minimum for any non-empty bin.
    pub fn bar_len(&self, bin: usize, width: usize) -> usize {
        let count = self.bins.get(bin).copied().unwrap_or(0);
        let len = count * width / self.max_count();
        if count > 0 { len.max(1) } else { len }
    }
}

#[cfg(test)]
mod tests {
    use super::Histogram;

    #[test]
    fn extremes_fill_first_and_last_bins() {
        let histogram = Histogram::from_scores([0, 0, 1000, 1000], 1000);
        assert_eq!(histogram.bins(), &[2, 0, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(histogram.bar_len(0, 24), histogram.bar_len(9, 24));
        assert!(histogram.bar_len(0, 24) >= 1);
        assert_eq!(histogram.bar_len(4, 24), 0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let histogram = Histogram::from_scores([-50, 5_000, 399], 400);
        assert_eq!(histogram.bins()[0], 1);
        assert_eq!(histogram.bins()[9], 2);
    }

    #[test]
    fn small_bins_keep_a_visible_bar() {
        let mut scores = vec![50; 100];
        scores.push(950);
        let histogram = Histogram::from_scores(scores, 1000);
        assert_eq!(histogram.bar_len(0, 24), 24);
        assert_eq!(histogram.bar_len(9, 24), 1);
    }

    #[test]
    fn empty_scores_produce_empty_bars() {
        let histogram = Histogram::from_scores(Vec::new(), 1000);
        assert_eq!(histogram.max_count(), 1);
        assert!((0..10).all(|bin| histogram.bar_len(bin, 24) == 0));
    }

    #[test]
    fn bin_ranges_follow_ceiling() {
        let histogram = Histogram::from_scores(Vec::new(), 400);
        assert_eq!(histogram.bin_range(0), (0, 40));
        assert_eq!(histogram.bin_range(9), (360, 400));
    }
}
