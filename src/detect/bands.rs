//! Consolidation of solid line indices into split bands
//!
//! Raw detector output is a list of y (or x) indices whose whole line is
//! one uniform color. Consolidation turns that list into half-open bands:
//!
//! 1. sort and deduplicate the indices;
//! 2. collapse every maximal run of consecutive indices to its median,
//!    rounded half-up (`(first + last + 1) / 2`), the run's separator;
//! 3. join the interior separators with the implicit bounds `0` and
//!    `max`, pairing neighbors into bands. A separator index belongs to
//!    no band: the band after it starts at `separator + 1`;
//! 4. merge any band shorter than `min_fraction` of the dimension into
//!    the following band (a trailing short band folds backward), so
//!    detector noise never produces degenerate micro-slices.

/// Fraction of the dimension below which a band is considered noise
pub const DEFAULT_MIN_BAND_FRACTION: f32 = 0.10;

/// Half-open range along one axis: covers indices `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub start: u32,
    pub end: u32,
}

impl Band {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Consolidate raw solid indices along one axis of length `max` into
/// bands. No indices (or no interior separators) yield the single band
/// `(0, max)`; a zero-length axis yields no bands.
pub fn consolidate(indices: &[u32], max: u32, min_fraction: f32) -> Vec<Band> {
    if max == 0 {
        return Vec::new();
    }

    let mut bands = Vec::new();
    let mut start = 0u32;
    for separator in run_medians(indices) {
        // bounds are implicit boundaries, not separators
        if separator == 0 || separator >= max {
            continue;
        }
        if separator > start {
            bands.push(Band::new(start, separator));
        }
        start = separator + 1;
    }
    if start < max {
        bands.push(Band::new(start, max));
    }
    if bands.is_empty() {
        bands.push(Band::new(0, max));
    }

    merge_short_bands(bands, max, min_fraction)
}

/// Median (rounded half-up) of each maximal run of consecutive indices
fn run_medians(indices: &[u32]) -> Vec<u32> {
    let mut values: Vec<u32> = indices.to_vec();
    values.sort_unstable();
    values.dedup();

    let mut medians = Vec::new();
    let mut iter = values.into_iter();
    let Some(mut first) = iter.next() else {
        return medians;
    };
    let mut last = first;
    for value in iter {
        if value == last + 1 {
            last = value;
        } else {
            medians.push((first + last + 1) / 2);
            first = value;
            last = value;
        }
    }
    medians.push((first + last + 1) / 2);
    medians
}

/// Merge bands shorter than `min_fraction * max` into their neighbor.
///
/// A held-over short band is combined with the next band rather than
/// dropped, preserving total coverage; a short band at the end folds
/// into the previous output band. Idempotent: applying this to its own
/// output changes nothing.
pub fn merge_short_bands(bands: Vec<Band>, max: u32, min_fraction: f32) -> Vec<Band> {
    let min_len = (max as f32 * min_fraction) as u32;
    let mut out: Vec<Band> = Vec::with_capacity(bands.len());
    let mut pending: Option<u32> = None;

    let mut last_end = 0;
    for band in bands {
        let start = pending.take().unwrap_or(band.start);
        last_end = band.end;
        if band.end.saturating_sub(start) < min_len {
            pending = Some(start);
        } else {
            out.push(Band::new(start, band.end));
        }
    }

    if let Some(start) = pending {
        match out.pop() {
            Some(prev) => out.push(Band::new(prev.start, last_end)),
            // everything was short: keep one covering band
            None => out.push(Band::new(start, last_end)),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_solid_run_splits_in_middle() {
        // 100-long axis, every index solid: separator at the half-up
        // median 50, which belongs to neither band
        let indices: Vec<u32> = (0..100).collect();
        let bands = consolidate(&indices, 100, DEFAULT_MIN_BAND_FRACTION);
        assert_eq!(bands, vec![Band::new(0, 50), Band::new(51, 100)]);
    }

    #[test]
    fn test_median_rounds_half_up() {
        // run 0..=49: median 24.5 rounds up to 25
        let indices: Vec<u32> = (0..50).collect();
        let bands = consolidate(&indices, 100, 0.0);
        assert_eq!(bands, vec![Band::new(0, 25), Band::new(26, 100)]);
    }

    #[test]
    fn test_no_indices_yields_full_band() {
        let bands = consolidate(&[], 240, DEFAULT_MIN_BAND_FRACTION);
        assert_eq!(bands, vec![Band::new(0, 240)]);
    }

    #[test]
    fn test_zero_axis_yields_nothing() {
        assert!(consolidate(&[5], 0, DEFAULT_MIN_BAND_FRACTION).is_empty());
    }

    #[test]
    fn test_unsorted_duplicate_indices() {
        let bands = consolidate(&[42, 40, 41, 41, 40], 100, 0.0);
        // run 40..=42, median 41
        assert_eq!(bands, vec![Band::new(0, 41), Band::new(42, 100)]);
    }

    #[test]
    fn test_two_runs_two_separators() {
        let mut indices: Vec<u32> = (20..30).collect();
        indices.extend(70..80);
        let bands = consolidate(&indices, 100, 0.0);
        // medians 25 and 75
        assert_eq!(
            bands,
            vec![Band::new(0, 25), Band::new(26, 75), Band::new(76, 100)]
        );
    }

    #[test]
    fn test_edge_runs_merge_as_short_bands() {
        // solid margins at both ends of a 100-long axis
        let mut indices: Vec<u32> = (0..10).collect();
        indices.extend(90..100);
        // medians 5 and 95 leave short bands (0,5) and (96,100)
        let bands = consolidate(&indices, 100, DEFAULT_MIN_BAND_FRACTION);
        assert_eq!(bands, vec![Band::new(0, 100)]);
    }

    #[test]
    fn test_short_band_merges_into_next() {
        let bands = merge_short_bands(
            vec![Band::new(0, 5), Band::new(6, 60), Band::new(61, 100)],
            100,
            DEFAULT_MIN_BAND_FRACTION,
        );
        assert_eq!(bands, vec![Band::new(0, 60), Band::new(61, 100)]);
    }

    #[test]
    fn test_trailing_short_band_folds_backward() {
        let bands = merge_short_bands(
            vec![Band::new(0, 60), Band::new(61, 96), Band::new(97, 100)],
            100,
            DEFAULT_MIN_BAND_FRACTION,
        );
        assert_eq!(bands, vec![Band::new(0, 60), Band::new(61, 100)]);
    }

    #[test]
    fn test_merge_idempotent() {
        let cases = vec![
            vec![Band::new(0, 5), Band::new(6, 60), Band::new(61, 100)],
            vec![Band::new(0, 3), Band::new(4, 8), Band::new(9, 100)],
            vec![Band::new(0, 100)],
        ];
        for bands in cases {
            let once = merge_short_bands(bands, 100, DEFAULT_MIN_BAND_FRACTION);
            let twice = merge_short_bands(once.clone(), 100, DEFAULT_MIN_BAND_FRACTION);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_all_short_keeps_single_cover() {
        let bands = merge_short_bands(
            vec![Band::new(0, 4), Band::new(5, 9)],
            100,
            DEFAULT_MIN_BAND_FRACTION,
        );
        assert_eq!(bands, vec![Band::new(0, 9)]);
    }
}
